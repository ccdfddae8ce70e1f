//! Unit of Work port - one transactional scope per use-case invocation.

use async_trait::async_trait;

use super::repository::UserRepository;
use crate::errors::AppResult;

/// A transactional scope exposing repositories bound to one open transaction.
///
/// `commit` and `rollback` consume the scope, so at most one of them can ever
/// take effect and neither can run twice. Dropping an unfinished scope
/// releases the underlying transaction and discards its writes - the adapter
/// guarantees release on every exit path, including propagating errors.
///
/// Scopes are not shared: one scope serves exactly one handler invocation,
/// and nesting is not supported.
#[async_trait]
pub trait UnitOfWork: Send {
    /// User repository scoped to this transaction
    fn users(&self) -> &dyn UserRepository;

    /// Finalize all writes made through this scope. The durability point.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Discard all writes made through this scope.
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Produces a fresh scope with a newly begun transaction per call.
/// Transactional state is never shared across scopes.
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>>;
}
