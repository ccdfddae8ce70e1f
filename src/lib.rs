//! Membership API - registration and authentication backend
//!
//! Write operations enter as validated commands and read operations as
//! queries; handlers orchestrate domain value objects against a
//! transactional Unit of Work and publish domain events only after a
//! successful commit.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **config**: Application configuration and constants
//! - **domain**: Value objects, aggregates and domain events
//! - **application**: Message contracts, ports and use-case handlers
//! - **infra**: Infrastructure adapters (database, event transports)
//! - **api**: HTTP handlers, extractors, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Email, HashingPolicy, Password, User, UserRole};
pub use errors::{AppError, AppResult};
