//! User aggregate and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_CLIENT, ROLE_TRAINER};
use crate::domain::aggregate::AggregateRoot;
use crate::domain::event::DomainEvent;
use crate::domain::events::UserRegistered;
use crate::errors::AppResult;

/// Membership roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Client,
    Trainer,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            ROLE_TRAINER => UserRole::Trainer,
            _ => UserRole::Client,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::Client => write!(f, "{}", ROLE_CLIENT),
            UserRole::Trainer => write!(f, "{}", ROLE_TRAINER),
        }
    }
}

/// User aggregate - the consistency boundary for membership state changes.
///
/// State-changing factories record domain events on the embedded root;
/// rehydration from storage never does.
#[derive(Debug)]
pub struct User {
    root: AggregateRoot,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Register a new member with the default client role.
    ///
    /// Records a `UserRegistered` event carrying the registration outcome.
    pub fn register(
        id: Uuid,
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> AppResult<Self> {
        let now = Utc::now();
        let mut user = Self {
            root: AggregateRoot::new(id),
            email,
            password_hash,
            first_name,
            last_name,
            role: UserRole::Client,
            created_at: now,
            updated_at: now,
        };
        let event =
            UserRegistered::new(id, &user.email, &user.first_name, &user.last_name)?;
        user.root.record(Box::new(event));
        Ok(user)
    }

    /// Stable identity of this member.
    pub fn id(&self) -> Uuid {
        self.root.id()
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Replace the stored password hash (policy upgrades, resets).
    pub fn update_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Drain pending domain events in recording order.
    pub fn drain_events(&mut self) -> Vec<Box<dyn DomainEvent>> {
        self.root.drain_events()
    }
}

/// Snapshot of persisted user state, as repositories store and load it.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rehydrate the aggregate from storage. Never records events.
impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            root: AggregateRoot::new(record.id),
            email: record.email,
            password_hash: record.password_hash,
            first_name: record.first_name,
            last_name: record.last_name,
            role: record.role,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// User view (safe to return to clients - no password hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserView {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Normalized email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Member first name
    #[schema(example = "John")]
    pub first_name: String,
    /// Member last name
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Membership role
    #[schema(example = "client")]
    pub role: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}
