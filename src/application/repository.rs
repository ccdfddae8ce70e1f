//! Repository port for membership persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::User;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository port.
///
/// `create` re-validates password strength through the Password value object
/// and maps a storage uniqueness violation to the duplicate-email conflict,
/// so callers never see a raw constraint error.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Check whether a member with this normalized email exists
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Persist a new member record. Returns the aggregate with its
    /// registration event still pending.
    async fn create(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<User>;

    /// Load a member by normalized email
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Replace a member's stored password hash
    async fn update_password_hash(&self, id: Uuid, password_hash: String) -> AppResult<()>;
}
