//! Application route configuration.

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{account_routes, auth_routes, health_handler, user_routes, ws_handler};
use super::middleware::auth_middleware;
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured.
///
/// Authentication is a single global layer; which paths skip it is decided
/// by the middleware's public-route list.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(health_handler::home))
        .route("/health", get(health_handler::health_check))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/users", auth_routes().merge(user_routes()))
        .nest("/api/bank-accounts", account_routes())
        .route("/api/ws", get(ws_handler::events))
        // Global middleware
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
