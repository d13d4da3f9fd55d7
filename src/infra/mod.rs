//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and migrations
//! - Repositories (identity and account stores)
//! - Unit of Work for repository access
//! - Notification hub

pub mod db;
pub mod notifier;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use notifier::{HubEvent, NotificationHub, Notifier};
pub use repositories::{AccountRepository, AccountStore, UserRepository, UserStore};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use notifier::MockNotifier;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockAccountRepository, MockUserRepository};
