//! HTTP request handlers.

pub mod account_handler;
pub mod auth_handler;
pub mod health_handler;
pub mod user_handler;
pub mod ws_handler;

pub use account_handler::account_routes;
pub use auth_handler::auth_routes;
pub use user_handler::user_routes;
