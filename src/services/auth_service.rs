//! Authentication service - sign-up, sign-in and the per-request token gate.
//!
//! Every failure to establish who is calling collapses into `Unauthorized`,
//! and both ways of failing a sign-in collapse into `InvalidCredentials`.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Plain text hashed once at start-up so unknown emails cost one verification too.
const DUMMY_PASSWORD: &str = "dummy-password-never-matches";

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new identity
    async fn sign_up(&self, email: String, full_name: String, password: String) -> AppResult<User>;

    /// Verify credentials and issue a bearer token
    async fn sign_in(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Check signature and expiry, returning the claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Resolve a bearer token to the id of an existing user
    async fn authenticate(&self, token: &str) -> AppResult<Uuid>;
}

/// Issue a signed token for `user_id`, valid for the configured number of days
/// counted from `issued_at`.
pub fn issue_token(user_id: Uuid, config: &Config, issued_at: DateTime<Utc>) -> AppResult<TokenResponse> {
    let validity = Duration::try_days(config.jwt_expiration_days)
        .ok_or_else(|| AppError::internal("Token validity window out of range"))?;
    let expires_at = issued_at
        .checked_add_signed(validity)
        .ok_or_else(|| AppError::internal("Token expiry out of range"))?;

    let claims = Claims {
        sub: user_id,
        iat: issued_at.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: validity.num_seconds(),
    })
}

/// Verify signature and expiry against `now`.
///
/// Expiry has no leeway: a token is valid strictly before `exp`.
pub fn decode_token(token: &str, config: &Config, now: DateTime<Utc>) -> AppResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below against the caller's clock
    validation.validate_exp = false;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("Token rejected: {}", e);
        AppError::Unauthorized
    })?
    .claims;

    if now.timestamp() >= claims.exp {
        tracing::debug!(user_id = %claims.sub, "Token expired");
        return Err(AppError::Unauthorized);
    }

    Ok(claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
    dummy_password: Password,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work.
    ///
    /// Hashes the timing-equalization dummy with the configured cost.
    pub fn new(uow: Arc<U>, config: Config) -> AppResult<Self> {
        let dummy_password = Password::new(DUMMY_PASSWORD, config.hash_cost)?;
        Ok(Self {
            uow,
            config,
            dummy_password,
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn sign_up(&self, email: String, full_name: String, password: String) -> AppResult<User> {
        // Email format is validated by the handler's ValidatedJson extractor
        let password_hash = Password::new(&password, self.config.hash_cost)?.into_string();
        let user = self.uow.users().create(email, full_name, password_hash).await?;

        tracing::info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    async fn sign_in(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_email(&email).await?;

        // Verify against a dummy hash when the email is unknown so both
        // failure paths take the same time.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => self.dummy_password.clone(),
        };
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = %user.id, "User signed in");
                issue_token(user.id, &self.config, Utc::now())
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        decode_token(token, &self.config, Utc::now())
    }

    async fn authenticate(&self, token: &str) -> AppResult<Uuid> {
        let claims = self.verify_token(token)?;

        // Fail closed: a vanished user or a store failure both deny access.
        match self.uow.users().find_by_id(claims.sub).await {
            Ok(Some(user)) => Ok(user.id),
            Ok(None) => {
                tracing::warn!(user_id = %claims.sub, "Token subject no longer exists");
                Err(AppError::Unauthorized)
            }
            Err(e) => {
                tracing::warn!(user_id = %claims.sub, error = %e, "Could not resolve token subject");
                Err(AppError::Unauthorized)
            }
        }
    }
}
