//! JWT authentication middleware.
//!
//! Applied to the whole router. A request either targets a public route or
//! carries a bearer token that resolves to an existing user; everything else
//! is rejected before a handler runs.

use axum::{
    extract::{OriginalUri, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, PUBLIC_PATHS, PUBLIC_PATH_TREES};
use crate::errors::AppError;

/// Authenticated user resolved from the bearer token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
}

/// Whether `path` may be served without a token.
///
/// Exact match against the public paths, or a whole-segment prefix match
/// against the public trees (`/swagger-ui/index.html` but not `/swagger-uix`).
pub fn is_public(path: &str) -> bool {
    if PUBLIC_PATHS.contains(&path) {
        return true;
    }

    PUBLIC_PATH_TREES.iter().any(|tree| {
        path.strip_prefix(tree)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// JWT authentication middleware.
///
/// Validates the token from the Authorization header, re-resolves its
/// subject and injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    if is_public(&path) {
        return Ok(next.run(request).await);
    }

    let token = bearer_token(&request).map(str::to_owned).ok_or_else(|| {
        tracing::debug!(path = %path, "Missing or malformed Authorization header");
        AppError::Unauthorized
    })?;

    let user_id = state.auth_service.authenticate(&token).await?;
    request.extensions_mut().insert(CurrentUser { id: user_id });

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
