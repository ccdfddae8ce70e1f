//! Membership use-case handlers.
//!
//! DDD: Pure orchestration over domain value objects, the Unit of Work and
//! the event bus. No persistence or hashing logic of its own.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::event_bus::EventBus;
use crate::application::handler::{CommandHandler, QueryHandler};
use crate::application::unit_of_work::UnitOfWorkFactory;
use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Email, HashingPolicy, Password, User, UserView};
use crate::errors::{AppError, AppResult};

use super::commands::{AuthenticateUser, RegisterUser};
use super::queries::GetUserByEmail;

/// Outcome of a successful registration: identity and normalized email,
/// never the password.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegisterUserResult {
    /// Identity of the newly registered member
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub user_id: Uuid,
    /// Normalized email the member registered with
    #[schema(example = "user@example.com")]
    pub email: String,
}

/// Orchestrates member registration against the transactional boundary.
///
/// Ordering guarantee: the registration event is never published before the
/// registration has durably committed. The converse does not hold - a bus
/// failure after commit propagates while the member stays persisted.
pub struct RegisterUserHandler {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
    event_bus: Arc<dyn EventBus>,
}

impl RegisterUserHandler {
    pub fn new(uow_factory: Arc<dyn UnitOfWorkFactory>, event_bus: Arc<dyn EventBus>) -> Self {
        Self {
            uow_factory,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<RegisterUser> for RegisterUserHandler {
    type Output = RegisterUserResult;

    async fn handle(&self, command: RegisterUser) -> AppResult<RegisterUserResult> {
        // Cheap validation first: no transaction is opened for a bad address.
        let email = Email::parse(command.email())?;

        let uow = self.uow_factory.begin().await?;

        // Pre-check narrows the duplicate window; the storage uniqueness
        // constraint remains the arbiter when two registrations race.
        if uow.users().exists_by_email(email.as_str()).await? {
            return Err(AppError::conflict("email"));
        }

        let mut user = uow
            .users()
            .create(
                email.as_str(),
                command.password(),
                command.first_name(),
                command.last_name(),
            )
            .await?;

        // Durability point: from here on the member exists regardless of
        // what happens to event delivery.
        uow.commit().await?;

        let events = user.drain_events();
        tracing::info!(user_id = %user.id(), email = %email, "user registered");
        self.event_bus.publish(events).await?;

        Ok(RegisterUserResult {
            user_id: user.id(),
            email: email.into_string(),
        })
    }
}

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Generate JWT token for a user (shared helper to avoid duplication)
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id(),
        email: user.email.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Hash that always fails verification, used when the member does not exist
/// so response timing does not reveal which emails are registered.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

/// Verifies credentials and issues an access token.
pub struct AuthenticateUserHandler {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
    hashing_policy: HashingPolicy,
    config: Config,
}

impl AuthenticateUserHandler {
    pub fn new(
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        hashing_policy: HashingPolicy,
        config: Config,
    ) -> Self {
        Self {
            uow_factory,
            hashing_policy,
            config,
        }
    }
}

#[async_trait]
impl CommandHandler<AuthenticateUser> for AuthenticateUserHandler {
    type Output = TokenResponse;

    async fn handle(&self, command: AuthenticateUser) -> AppResult<TokenResponse> {
        // A malformed address can never match an account; report it the same
        // way as a wrong password.
        let email =
            Email::parse(command.email()).map_err(|_| AppError::InvalidCredentials)?;

        let uow = self.uow_factory.begin().await?;
        let user = uow.users().get_by_email(email.as_str()).await?;

        // Verify even when the member is missing (dummy hash) so both paths
        // cost one Argon2 run.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => Password::from_hash(DUMMY_HASH.to_string()),
        };
        let password_valid = stored.verify(command.password(), &self.hashing_policy);

        let Some(user) = user else {
            return Err(AppError::InvalidCredentials);
        };
        if !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Transparently upgrade hashes produced under an older policy. Only
        // this path writes, so only this path commits.
        if stored.needs_rehash(&self.hashing_policy) {
            let upgraded = Password::create(command.password(), &self.hashing_policy)?;
            uow.users()
                .update_password_hash(user.id(), upgraded.into_string())
                .await?;
            uow.commit().await?;
            tracing::debug!(user_id = %user.id(), "password hash upgraded to current policy");
        }

        generate_token(&user, &self.config)
    }
}

/// Answers member lookups with a client-safe view.
pub struct GetUserByEmailHandler {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
}

impl GetUserByEmailHandler {
    pub fn new(uow_factory: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow_factory }
    }
}

#[async_trait]
impl QueryHandler<GetUserByEmail> for GetUserByEmailHandler {
    type Output = Option<UserView>;

    async fn handle(&self, query: GetUserByEmail) -> AppResult<Option<UserView>> {
        let email = Email::parse(query.email())?;

        // Read-only scope: dropped without commit on the way out.
        let uow = self.uow_factory.begin().await?;
        let user = uow.users().get_by_email(email.as_str()).await?;

        Ok(user.map(UserView::from))
    }
}
