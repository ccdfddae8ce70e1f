//! Event bus port.

use async_trait::async_trait;

use crate::domain::DomainEvent;
use crate::errors::AppResult;

/// Delivers drained domain events to interested consumers.
///
/// Called at most once per handler invocation, strictly after the owning
/// transaction has committed. Errors propagate to the caller verbatim;
/// persisted state is never unwound. Delivery is best-effort - callers that
/// need stronger guarantees compensate out of band (retry, reconciliation,
/// outbox).
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, events: Vec<Box<dyn DomainEvent>>) -> AppResult<()>;
}
