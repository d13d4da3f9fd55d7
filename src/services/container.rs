//! Service Container - Centralized service access.
//!
//! Wires the stores, the notifier and the configuration into the three
//! application services once at start-up.

use std::sync::Arc;

use super::{AccountManager, AccountService, AuthService, Authenticator, UserManager, UserService};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Notifier, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get bank account service
    fn accounts(&self) -> Arc<dyn AccountService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    account_service: Arc<dyn AccountService>,
}

impl Services {
    /// Create a service container from already-built services
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        account_service: Arc<dyn AccountService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            account_service,
        }
    }

    /// Create service container from database connection, notifier and config
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        notifier: Arc<dyn Notifier>,
        config: Config,
    ) -> AppResult<Self> {
        let uow = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), config)?);
        let user_service = Arc::new(UserManager::new(uow.clone()));
        let account_service = Arc::new(AccountManager::new(uow, notifier));

        Ok(Self::new(auth_service, user_service, account_service))
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }
}
