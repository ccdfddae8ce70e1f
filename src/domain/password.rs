//! Password value object - Domain layer password handling.
//!
//! DDD: Encapsulates strength validation, hashing and verification as a
//! domain value object. Hashing parameters are explicit configuration
//! (`HashingPolicy`), injected into the factory functions rather than read
//! from shared state.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::{MIN_PASSWORD_LENGTH, PASSWORD_SPECIAL_CHARACTERS};
use crate::errors::{AppError, AppResult};

/// Which strength rule a candidate plaintext failed.
///
/// Rules are checked in declaration order and the first failure wins, so a
/// caller always gets exactly one actionable reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    Lowercase,
    Uppercase,
    Digit,
    Special,
}

impl std::fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordRule::MinLength => {
                write!(f, "must be at least {} characters long", MIN_PASSWORD_LENGTH)
            }
            PasswordRule::Lowercase => write!(f, "must contain at least one lowercase letter"),
            PasswordRule::Uppercase => write!(f, "must contain at least one uppercase letter"),
            PasswordRule::Digit => write!(f, "must contain at least one digit"),
            PasswordRule::Special => write!(
                f,
                "must contain at least one special character ({})",
                PASSWORD_SPECIAL_CHARACTERS
            ),
        }
    }
}

/// Argon2id hashing parameters as explicit, injectable configuration.
#[derive(Clone)]
pub struct HashingPolicy {
    version: Version,
    params: Params,
}

impl HashingPolicy {
    /// Build a policy with custom cost parameters (memory in KiB,
    /// iterations, lanes).
    pub fn new(memory_cost: u32, time_cost: u32, parallelism: u32) -> AppResult<Self> {
        let params = Params::new(memory_cost, time_cost, parallelism, None)
            .map_err(|e| AppError::internal(format!("Invalid hashing parameters: {e}")))?;
        Ok(Self {
            version: Version::V0x13,
            params,
        })
    }

    fn hasher(&self) -> Argon2<'_> {
        Argon2::new(Algorithm::Argon2id, self.version, self.params.clone())
    }

    fn hash(&self, plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {e}")))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {e}")))?;
        Ok(self
            .hasher()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    /// Whether a stored hash was produced under a different algorithm or
    /// cost parameters than this policy. Unparseable hashes count as stale.
    fn is_stale(&self, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return true;
        };
        if parsed.algorithm.as_str() != Algorithm::Argon2id.as_str() {
            return true;
        }
        match Params::try_from(&parsed) {
            Ok(params) => {
                params.m_cost() != self.params.m_cost()
                    || params.t_cost() != self.params.t_cost()
                    || params.p_cost() != self.params.p_cost()
            }
            Err(_) => true,
        }
    }
}

impl Default for HashingPolicy {
    /// Argon2id with the library's recommended cost parameters.
    fn default() -> Self {
        Self {
            version: Version::V0x13,
            params: Params::default(),
        }
    }
}

impl std::fmt::Debug for HashingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashingPolicy")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

/// Password value object wrapping a salted Argon2 hash.
///
/// Two construction paths: `create` validates strength and hashes a
/// plaintext, discarding it; `from_hash` wraps already-validated data coming
/// back from storage and skips strength rules entirely. The plaintext is
/// never stored and never exposed.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by validating strength and hashing the
    /// plaintext under the given policy.
    ///
    /// # Errors
    /// `AppError::WeakPassword` naming the first failed rule.
    pub fn create(plain_text: &str, policy: &HashingPolicy) -> AppResult<Self> {
        Self::validate_strength(plain_text)?;
        let hash = policy.hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Reconstruct a Password from an existing hash (from storage).
    /// No strength validation: stored hashes are trusted data.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a candidate plaintext against this hash.
    /// Returns false on mismatch or malformed hash, never errors.
    pub fn verify(&self, plain_text: &str, policy: &HashingPolicy) -> bool {
        policy.verify(plain_text, &self.hash).unwrap_or(false)
    }

    /// Whether the stored hash should be recomputed under the current policy.
    pub fn needs_rehash(&self, policy: &HashingPolicy) -> bool {
        policy.is_stale(&self.hash)
    }

    /// Strength rules in fixed order; the first failure wins.
    fn validate_strength(plain_text: &str) -> AppResult<()> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::WeakPassword(PasswordRule::MinLength));
        }
        if !plain_text.chars().any(|c| c.is_lowercase()) {
            return Err(AppError::WeakPassword(PasswordRule::Lowercase));
        }
        if !plain_text.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::WeakPassword(PasswordRule::Uppercase));
        }
        if !plain_text.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::WeakPassword(PasswordRule::Digit));
        }
        if !plain_text
            .chars()
            .any(|c| PASSWORD_SPECIAL_CHARACTERS.contains(c))
        {
            return Err(AppError::WeakPassword(PasswordRule::Special));
        }
        Ok(())
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    // Low-cost parameters keep the hashing tests fast.
    fn test_policy() -> HashingPolicy {
        HashingPolicy::new(1024, 1, 1).unwrap()
    }

    fn assert_fails_with(plain: &str, rule: PasswordRule) {
        match Password::create(plain, &test_policy()) {
            Err(AppError::WeakPassword(failed)) => assert_eq!(failed, rule, "for {plain:?}"),
            other => panic!("expected WeakPassword({rule:?}) for {plain:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_strength_rules_in_order() {
        assert_fails_with("Sh0rt!", PasswordRule::MinLength);
        assert_fails_with("ABCDEFGH1!XY", PasswordRule::Lowercase);
        assert_fails_with("abcdefgh1!xy", PasswordRule::Uppercase);
        assert_fails_with("Abcdefgh!xyz", PasswordRule::Digit);
        assert_fails_with("Abcdefgh1xyz", PasswordRule::Special);
    }

    #[test]
    fn test_first_failure_wins() {
        // Too short AND missing everything else: length is reported.
        assert_fails_with("a", PasswordRule::MinLength);
    }

    #[test]
    fn test_strong_password_is_accepted() {
        let password = Password::create("Abcdef1!Ghij", &test_policy()).unwrap();
        assert!(password.verify("Abcdef1!Ghij", &test_policy()));
    }

    #[test]
    fn test_hashing_is_salted_per_call() {
        let policy = test_policy();
        let first = Password::create("StrongPass1!", &policy).unwrap();
        let second = Password::create("StrongPass1!", &policy).unwrap();

        assert_ne!(first.as_str(), second.as_str());
        assert!(first.verify("StrongPass1!", &policy));
        assert!(second.verify("StrongPass1!", &policy));
    }

    #[test]
    fn test_verify_wrong_password_returns_false() {
        let policy = test_policy();
        let password = Password::create("StrongPass1!", &policy).unwrap();
        assert!(!password.verify("WrongPass1!!", &policy));
    }

    #[test]
    fn test_from_hash_skips_strength_validation() {
        // "weak" would never pass Password::create; wrapping its hash is fine.
        let restored = Password::from_hash("$argon2id$not-even-parseable".to_string());
        assert!(!restored.verify("weak", &test_policy()));
    }

    #[test]
    fn test_roundtrip_through_stored_hash() {
        let policy = test_policy();
        let original = Password::create("StrongPass1!", &policy).unwrap();
        let restored = Password::from_hash(original.as_str().to_string());

        assert_eq!(original, restored);
        assert!(restored.verify("StrongPass1!", &policy));
    }

    #[test]
    fn test_needs_rehash_tracks_policy_parameters() {
        let old_policy = test_policy();
        let current_policy = HashingPolicy::new(2048, 2, 1).unwrap();

        let password = Password::create("StrongPass1!", &old_policy).unwrap();
        assert!(!password.needs_rehash(&old_policy));
        assert!(password.needs_rehash(&current_policy));
    }

    #[test]
    fn test_unparseable_hash_needs_rehash() {
        let password = Password::from_hash("plainly-not-a-phc-string".to_string());
        assert!(password.needs_rehash(&test_policy()));
    }
}
