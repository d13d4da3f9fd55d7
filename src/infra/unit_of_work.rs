//! Unit of Work - centralized access to the stores.
//!
//! Services receive an `Arc<impl UnitOfWork>` instead of reaching for a
//! process-wide repository. Each store call is a single statement, so no
//! transaction spans more than one round trip.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{AccountRepository, AccountStore, UserRepository, UserStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get bank account repository
    fn accounts(&self) -> Arc<dyn AccountRepository>;
}

/// Concrete implementation of UnitOfWork over one connection pool
pub struct Persistence {
    user_repo: Arc<UserStore>,
    account_repo: Arc<AccountStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let account_repo = Arc::new(AccountStore::new(db));
        Self {
            user_repo,
            account_repo,
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.account_repo.clone()
    }
}
