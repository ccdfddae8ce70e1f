//! Integration tests for the login flow.

use std::sync::Arc;

use jsonwebtoken::{decode, DecodingKey, Validation};

use membership_api::application::membership::{
    AuthenticateUser, AuthenticateUserHandler, Claims, RegisterUser, RegisterUserHandler,
};
use membership_api::application::CommandHandler;
use membership_api::config::Config;
use membership_api::domain::{HashingPolicy, Password};
use membership_api::errors::AppError;
use membership_api::infra::{InMemoryEventBus, MemoryStore, MemoryUnitOfWorkFactory};

fn test_policy() -> HashingPolicy {
    HashingPolicy::new(1024, 1, 1).unwrap()
}

struct Harness {
    store: MemoryStore,
    auth: AuthenticateUserHandler,
    register: RegisterUserHandler,
    config: Config,
}

/// Registration and login wired over one shared store. `auth_policy` lets a
/// test authenticate under different hashing parameters than registration.
fn harness_with_policies(register_policy: HashingPolicy, auth_policy: HashingPolicy) -> Harness {
    let store = MemoryStore::new();
    let config = Config::from_env();

    let register_factory = Arc::new(MemoryUnitOfWorkFactory::new(
        store.clone(),
        register_policy,
    ));
    let register = RegisterUserHandler::new(register_factory, Arc::new(InMemoryEventBus::new()));

    let auth_factory = Arc::new(MemoryUnitOfWorkFactory::new(
        store.clone(),
        auth_policy.clone(),
    ));
    let auth = AuthenticateUserHandler::new(auth_factory, auth_policy, config.clone());

    Harness {
        store,
        auth,
        register,
        config,
    }
}

fn harness() -> Harness {
    harness_with_policies(test_policy(), test_policy())
}

async fn register_member(h: &Harness, email: &str, password: &str) {
    let command = RegisterUser::new(email, password, "Existing", "User").unwrap();
    h.register.handle(command).await.unwrap();
}

#[tokio::test]
async fn test_login_returns_verifiable_token() {
    let h = harness();
    register_member(&h, "existing@example.com", "ExistingPass1!").await;

    let command = AuthenticateUser::new("existing@example.com", "ExistingPass1!").unwrap();
    let token = h.auth.handle(command).await.unwrap();

    assert_eq!(token.token_type, "Bearer");
    assert!(token.expires_in > 0);

    let decoded = decode::<Claims>(
        &token.access_token,
        &DecodingKey::from_secret(h.config.jwt_secret_bytes()),
        &Validation::default(),
    )
    .unwrap();
    assert_eq!(decoded.claims.email, "existing@example.com");
    assert_eq!(decoded.claims.role, "client");
}

#[tokio::test]
async fn test_login_normalizes_the_submitted_email() {
    let h = harness();
    register_member(&h, "existing@example.com", "ExistingPass1!").await;

    let command = AuthenticateUser::new("  EXISTING@example.COM ", "ExistingPass1!").unwrap();
    assert!(h.auth.handle(command).await.is_ok());
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let h = harness();
    register_member(&h, "existing@example.com", "ExistingPass1!").await;

    let command = AuthenticateUser::new("existing@example.com", "WrongPass123!").unwrap();
    let result = h.auth.handle(command).await;

    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_unknown_and_malformed_emails_fail_the_same_way() {
    let h = harness();

    let unknown = AuthenticateUser::new("nobody@example.com", "SomePass1234!").unwrap();
    let malformed = AuthenticateUser::new("not-an-email", "SomePass1234!").unwrap();

    for command in [unknown, malformed] {
        let result = h.auth.handle(command).await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }
}

#[tokio::test]
async fn test_login_upgrades_hash_to_current_policy() {
    let old_policy = HashingPolicy::new(1024, 1, 1).unwrap();
    let current_policy = HashingPolicy::new(2048, 2, 1).unwrap();
    let h = harness_with_policies(old_policy, current_policy.clone());

    register_member(&h, "existing@example.com", "ExistingPass1!").await;
    let before = h.store.get("existing@example.com").unwrap().password_hash;
    assert!(Password::from_hash(before.clone()).needs_rehash(&current_policy));

    let command = AuthenticateUser::new("existing@example.com", "ExistingPass1!").unwrap();
    h.auth.handle(command).await.unwrap();

    // The stored hash was transparently recomputed under the current policy
    // and still verifies the same plaintext.
    let after = h.store.get("existing@example.com").unwrap().password_hash;
    assert_ne!(before, after);
    let upgraded = Password::from_hash(after);
    assert!(!upgraded.needs_rehash(&current_policy));
    assert!(upgraded.verify("ExistingPass1!", &current_policy));
}
