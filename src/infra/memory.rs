//! In-memory persistence adapter.
//!
//! Implements the same Unit of Work protocol as the SeaORM adapter against a
//! process-local store: scopes stage their writes and apply them atomically
//! on commit, under the store lock. Used by the test suite and by demos that
//! run without a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::{UnitOfWork, UnitOfWorkFactory, UserRepository};
use crate::domain::{HashingPolicy, Password, User, UserRecord};
use crate::errors::{AppError, AppResult};

/// Shared storage keyed by normalized email.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<HashMap<String, UserRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, UserRecord>> {
        self.users.lock().expect("memory store mutex poisoned")
    }

    /// Number of committed user records.
    pub fn user_count(&self) -> usize {
        self.lock().len()
    }

    /// Committed record for a normalized email, if any.
    pub fn get(&self, email: &str) -> Option<UserRecord> {
        self.lock().get(email).cloned()
    }
}

/// Produces one staged scope over the shared store per call.
pub struct MemoryUnitOfWorkFactory {
    store: MemoryStore,
    hashing_policy: HashingPolicy,
}

impl MemoryUnitOfWorkFactory {
    pub fn new(store: MemoryStore, hashing_policy: HashingPolicy) -> Self {
        Self {
            store,
            hashing_policy,
        }
    }
}

#[async_trait]
impl UnitOfWorkFactory for MemoryUnitOfWorkFactory {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        Ok(Box::new(MemoryUnitOfWork {
            store: self.store.clone(),
            hashing_policy: self.hashing_policy.clone(),
            staged: Mutex::new(Vec::new()),
        }))
    }
}

enum StagedWrite {
    Insert(UserRecord),
    SetPasswordHash { id: Uuid, password_hash: String },
}

/// Scope that stages writes and applies them on commit.
///
/// Commit re-checks email uniqueness under the store lock: like the
/// relational unique index, the commit path is the final duplicate arbiter
/// when two scopes race past the existence pre-check. Dropping the scope
/// discards the staged writes.
pub struct MemoryUnitOfWork {
    store: MemoryStore,
    hashing_policy: HashingPolicy,
    staged: Mutex<Vec<StagedWrite>>,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    fn users(&self) -> &dyn UserRepository {
        self
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let this = *self;
        let staged = this
            .staged
            .into_inner()
            .expect("unit of work mutex poisoned");
        let mut users = this.store.lock();

        // Validate the whole batch before applying any of it.
        for write in &staged {
            if let StagedWrite::Insert(record) = write {
                if users.contains_key(&record.email) {
                    return Err(AppError::conflict("email"));
                }
            }
        }

        for write in staged {
            match write {
                StagedWrite::Insert(record) => {
                    users.insert(record.email.clone(), record);
                }
                StagedWrite::SetPasswordHash { id, password_hash } => {
                    if let Some(record) = users.values_mut().find(|r| r.id == id) {
                        record.password_hash = password_hash;
                        record.updated_at = chrono::Utc::now();
                    }
                }
            }
        }

        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        // Staged writes die with the scope.
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUnitOfWork {
    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.store.lock().contains_key(email))
    }

    async fn create(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<User> {
        // Same contract as the relational adapter: strength validation and
        // hashing through the Password value object.
        let hashed = Password::create(password, &self.hashing_policy)?;

        // Surface a duplicate already visible in committed state right away;
        // commit re-checks for writes racing in behind this.
        if self.store.lock().contains_key(email) {
            return Err(AppError::conflict("email"));
        }

        let user = User::register(
            Uuid::new_v4(),
            email.to_string(),
            hashed.into_string(),
            first_name.to_string(),
            last_name.to_string(),
        )?;

        self.staged
            .lock()
            .expect("unit of work mutex poisoned")
            .push(StagedWrite::Insert(UserRecord::from(&user)));

        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.store.get(email).map(User::from))
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: String) -> AppResult<()> {
        self.staged
            .lock()
            .expect("unit of work mutex poisoned")
            .push(StagedWrite::SetPasswordHash { id, password_hash });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> (MemoryStore, MemoryUnitOfWorkFactory) {
        let store = MemoryStore::new();
        let policy = HashingPolicy::new(1024, 1, 1).unwrap();
        (store.clone(), MemoryUnitOfWorkFactory::new(store, policy))
    }

    #[tokio::test]
    async fn test_commit_applies_staged_insert() {
        let (store, factory) = factory();

        let uow = factory.begin().await.unwrap();
        uow.users()
            .create("jo@example.com", "StrongPass1!", "Jo", "Doe")
            .await
            .unwrap();
        assert_eq!(store.user_count(), 0);

        uow.commit().await.unwrap();
        assert_eq!(store.user_count(), 1);
        assert!(store.get("jo@example.com").is_some());
    }

    #[tokio::test]
    async fn test_dropped_scope_discards_writes() {
        let (store, factory) = factory();

        {
            let uow = factory.begin().await.unwrap();
            uow.users()
                .create("jo@example.com", "StrongPass1!", "Jo", "Doe")
                .await
                .unwrap();
            // No commit: scope dropped here.
        }

        assert_eq!(store.user_count(), 0);
    }

    #[tokio::test]
    async fn test_rollback_discards_writes() {
        let (store, factory) = factory();

        let uow = factory.begin().await.unwrap();
        uow.users()
            .create("jo@example.com", "StrongPass1!", "Jo", "Doe")
            .await
            .unwrap();
        uow.rollback().await.unwrap();

        assert_eq!(store.user_count(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_committed_duplicate() {
        let (store, factory) = factory();

        let first = factory.begin().await.unwrap();
        first
            .users()
            .create("jo@example.com", "StrongPass1!", "Jo", "Doe")
            .await
            .unwrap();
        first.commit().await.unwrap();

        let second = factory.begin().await.unwrap();
        let result = second
            .users()
            .create("jo@example.com", "OtherPass12!", "Jane", "Doe")
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_commit_arbitrates_between_racing_scopes() {
        // Both scopes stage the same email before either commits, exactly
        // the window the existence pre-check cannot close.
        let (store, factory) = factory();

        let first = factory.begin().await.unwrap();
        let second = factory.begin().await.unwrap();
        first
            .users()
            .create("jo@example.com", "StrongPass1!", "Jo", "Doe")
            .await
            .unwrap();
        second
            .users()
            .create("jo@example.com", "OtherPass12!", "Jane", "Doe")
            .await
            .unwrap();

        first.commit().await.unwrap();
        let result = second.commit().await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.get("jo@example.com").unwrap().first_name, "Jo");
    }
}
