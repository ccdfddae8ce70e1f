//! Application layer - use cases and their contracts.
//!
//! Commands and queries enter as validated messages; handlers orchestrate
//! domain objects against the Unit of Work and publish domain events after
//! commit. Everything infrastructural is reached through the ports defined
//! here.

pub mod event_bus;
pub mod handler;
pub mod membership;
pub mod message;
pub mod repository;
pub mod unit_of_work;

pub use event_bus::EventBus;
pub use handler::{CommandHandler, QueryHandler};
pub use message::{Command, Message, Query};
pub use repository::UserRepository;
pub use unit_of_work::{UnitOfWork, UnitOfWorkFactory};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockUserRepository;
