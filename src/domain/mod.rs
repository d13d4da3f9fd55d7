//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod account;
pub mod password;
pub mod user;

pub use account::{AccountState, Balance, BankAccount, BankAccountResponse};
pub use password::Password;
pub use user::{User, UserResponse};
