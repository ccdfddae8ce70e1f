//! Email value object.
//!
//! DDD: Value object - immutable, compared by normalized value.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, AppResult};

/// Accepts a non-empty local part, a single `@`, and a domain containing at
/// least one dot. Whitespace is excluded by the character classes.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9.-]+$").expect("valid email pattern")
});

/// A validated, normalized email address.
///
/// Construction trims surrounding whitespace, validates the format and
/// lowercases the result, so two addresses differing only in case or
/// padding compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Parse a raw address into its normalized form.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        if !EMAIL_PATTERN.is_match(trimmed) {
            return Err(AppError::InvalidEmail(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// The normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the normalized address.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
