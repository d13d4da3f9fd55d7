//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod bank_account;
pub mod user;
