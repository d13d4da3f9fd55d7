//! Application state - Dependency injection container.
//!
//! Holds the services handlers call, the notification hub the WebSocket feed
//! subscribes to, and the database handle used by the health check.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, NotificationHub};
use crate::services::{AccountService, AuthService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Bank account service
    pub account_service: Arc<dyn AccountService>,
    /// Notification hub shared by the account service and WebSocket listeners
    pub hub: Arc<NotificationHub>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    ///
    /// The same hub instance receives account events and serves subscribers.
    pub fn from_config(database: Arc<Database>, config: Config) -> AppResult<Self> {
        let hub = Arc::new(NotificationHub::new());
        let container = Services::from_connection(database.get_connection(), hub.clone(), config)?;

        Ok(Self::new(&container, hub, database))
    }

    /// Create application state from an existing service container.
    pub fn new(services: &dyn ServiceContainer, hub: Arc<NotificationHub>, database: Arc<Database>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            account_service: services.accounts(),
            hub,
            database,
        }
    }
}
