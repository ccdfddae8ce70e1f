//! Infrastructure layer - External systems integration
//!
//! Adapters for the application-layer ports: relational and in-memory
//! Unit of Work implementations, event bus transports, database bootstrap.

pub mod db;
pub mod entities;
pub mod event_bus;
pub mod memory;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use event_bus::{InMemoryEventBus, LoggingEventBus};
pub use memory::{MemoryStore, MemoryUnitOfWorkFactory};
pub use unit_of_work::{SeaOrmUnitOfWork, SeaOrmUnitOfWorkFactory};
