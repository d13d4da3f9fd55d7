//! Response shapes shared across handlers.

mod response;

pub use response::{Created, IdResponse, NoContent, WelcomeResponse};
