//! API middleware.

mod auth;

pub use auth::{auth_middleware, is_public, CurrentUser};
