//! Banking API - user identities, owner-scoped bank accounts and a
//! bearer-token authentication gate.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, bank accounts, passwords
//! - **services**: Sign-up/sign-in, token gate, account use cases
//! - **infra**: Database, identity and account stores, notification hub
//! - **api**: HTTP handlers, middleware, routes and WebSocket feed
//! - **types**: Shared response shapes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (applies pending migrations first)
//! banking-api serve
//!
//! # Run migrations
//! banking-api migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{AccountState, Balance, BankAccount, Password, User};
pub use errors::{AppError, AppResult};
