//! SeaORM-backed Unit of Work.
//!
//! One `DatabaseTransaction` per scope. The scope itself implements the
//! repository port over that transaction, so repository handles can never
//! outlive it. SeaORM rolls an unfinished transaction back when it is
//! dropped, which gives the release-on-every-exit-path guarantee the port
//! requires.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::application::{UnitOfWork, UnitOfWorkFactory, UserRepository};
use crate::domain::{HashingPolicy, Password, User, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};

/// Produces one transaction-backed scope per use-case invocation.
pub struct SeaOrmUnitOfWorkFactory {
    db: DatabaseConnection,
    hashing_policy: HashingPolicy,
}

impl SeaOrmUnitOfWorkFactory {
    pub fn new(db: DatabaseConnection, hashing_policy: HashingPolicy) -> Self {
        Self { db, hashing_policy }
    }
}

#[async_trait]
impl UnitOfWorkFactory for SeaOrmUnitOfWorkFactory {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        let txn = self.db.begin().await.map_err(AppError::from)?;
        Ok(Box::new(SeaOrmUnitOfWork {
            txn,
            hashing_policy: self.hashing_policy.clone(),
        }))
    }
}

/// Transactional scope over an open database transaction.
pub struct SeaOrmUnitOfWork {
    txn: DatabaseTransaction,
    hashing_policy: HashingPolicy,
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    fn users(&self) -> &dyn UserRepository {
        self
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.txn.commit().await.map_err(AppError::from)
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.txn.rollback().await.map_err(AppError::from)
    }
}

#[async_trait]
impl UserRepository for SeaOrmUnitOfWork {
    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn create(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<User> {
        // Strength check and hashing happen here, inside the transaction,
        // through the Password value object.
        let hashed = Password::create(password, &self.hashing_policy)?;

        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            password_hash: Set(hashed.into_string()),
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            role: Set(UserRole::Client.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.txn).await.map_err(|e| {
            // The unique index is the duplicate arbiter; the handler's
            // existence pre-check only narrows the race window.
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("email"),
                _ => AppError::from(e),
            }
        })?;

        User::register(
            model.id,
            model.email,
            model.password_hash,
            model.first_name,
            model.last_name,
        )
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: String) -> AppResult<()> {
        let user = UserEntity::find_by_id(id)
            .one(&self.txn)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(chrono::Utc::now());

        active.update(&self.txn).await.map_err(AppError::from)?;
        Ok(())
    }
}
