//! Handler contracts.
//!
//! SOLID (DIP): the API layer depends on these seams, never on concrete
//! persistence or hashing.

use async_trait::async_trait;

use super::message::{Command, Query};
use crate::errors::AppResult;

/// Executes one command against the transactional boundary.
#[async_trait]
pub trait CommandHandler<C: Command + Send>: Send + Sync {
    type Output: Send;

    async fn handle(&self, command: C) -> AppResult<Self::Output>;
}

/// Answers one query. Never mutates state.
#[async_trait]
pub trait QueryHandler<Q: Query + Send>: Send + Sync {
    type Output: Send;

    async fn handle(&self, query: Q) -> AppResult<Self::Output>;
}
