//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{account_handler, auth_handler, health_handler, user_handler};
use crate::domain::{AccountState, BankAccountResponse, UserResponse};
use crate::services::TokenResponse;
use crate::types::{IdResponse, WelcomeResponse};

/// OpenAPI documentation for the banking API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Banking API",
        version = "0.1.0",
        description = "User identities, owner-scoped bank accounts and a JWT authentication gate",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        health_handler::home,
        health_handler::health_check,
        auth_handler::sign_up,
        auth_handler::sign_in,
        user_handler::get_current_user,
        account_handler::create_account,
        account_handler::list_accounts,
        account_handler::get_account,
        account_handler::update_account,
        account_handler::delete_account,
    ),
    components(
        schemas(
            AccountState,
            BankAccountResponse,
            UserResponse,
            IdResponse,
            WelcomeResponse,
            TokenResponse,
            health_handler::HealthResponse,
            health_handler::ServiceStatus,
            auth_handler::SignUpRequest,
            auth_handler::SignInRequest,
            account_handler::CreateAccountRequest,
            account_handler::UpdateAccountRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Welcome and health check"),
        (name = "Authentication", description = "Sign-up and sign-in"),
        (name = "Users", description = "Current user profile"),
        (name = "Bank Accounts", description = "Owner-scoped bank account operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/users/sign-in"))
                        .build(),
                ),
            );
        }
    }
}
