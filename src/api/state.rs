//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::application::membership::{
    AuthenticateUserHandler, GetUserByEmailHandler, RegisterUserHandler,
};
use crate::application::{EventBus, UnitOfWorkFactory};
use crate::config::Config;
use crate::domain::HashingPolicy;
use crate::infra::{LoggingEventBus, SeaOrmUnitOfWorkFactory};

/// Application state containing the use-case handlers (DI container).
///
/// SOLID (DIP): handlers are wired against the Unit of Work and event bus
/// ports, so any adapter pair satisfies them.
#[derive(Clone)]
pub struct AppState {
    pub register_user: Arc<RegisterUserHandler>,
    pub authenticate_user: Arc<AuthenticateUserHandler>,
    pub get_user_by_email: Arc<GetUserByEmailHandler>,
}

impl AppState {
    /// Wire handlers against any Unit of Work factory and event bus.
    pub fn new(
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        event_bus: Arc<dyn EventBus>,
        hashing_policy: HashingPolicy,
        config: Config,
    ) -> Self {
        Self {
            register_user: Arc::new(RegisterUserHandler::new(uow_factory.clone(), event_bus)),
            authenticate_user: Arc::new(AuthenticateUserHandler::new(
                uow_factory.clone(),
                hashing_policy,
                config,
            )),
            get_user_by_email: Arc::new(GetUserByEmailHandler::new(uow_factory)),
        }
    }

    /// Production wiring: SeaORM persistence plus the logging event bus.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let hashing_policy = HashingPolicy::default();
        let uow_factory = Arc::new(SeaOrmUnitOfWorkFactory::new(db, hashing_policy.clone()));
        Self::new(
            uow_factory,
            Arc::new(LoggingEventBus),
            hashing_policy,
            config,
        )
    }
}
