//! Bank account handlers.
//!
//! All routes act on the caller's own accounts. An id owned by someone else
//! answers exactly like an id that does not exist.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedPath};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{AccountState, BankAccountResponse};
use crate::errors::AppResult;
use crate::types::{Created, IdResponse, NoContent};

/// Account creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    /// Account name, unique per owner
    #[validate(length(min = 1, max = 64, message = "Name must be between 1 and 64 characters"))]
    #[schema(example = "checking")]
    pub name: String,
}

/// Account update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAccountRequest {
    /// New account name
    #[validate(length(min = 1, max = 64, message = "Name must be between 1 and 64 characters"))]
    #[schema(example = "main")]
    pub name: String,
    /// New state label
    #[schema(value_type = AccountState, example = "closed")]
    pub state: String,
}

/// Create bank account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route(
            "/:id",
            get(get_account).put(update_account).delete(delete_account),
        )
}

/// Open a new bank account
#[utoipa::path(
    post,
    path = "/api/bank-accounts",
    tag = "Bank Accounts",
    security(("bearer_auth" = [])),
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = IdResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Account name already used by this owner")
    )
)]
pub async fn create_account(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAccountRequest>,
) -> AppResult<Created<IdResponse>> {
    let account = state
        .account_service
        .create_account(current_user.id, payload.name)
        .await?;

    Ok(Created(IdResponse::new(account.id)))
}

/// List the caller's bank accounts
#[utoipa::path(
    get,
    path = "/api/bank-accounts",
    tag = "Bank Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Accounts owned by the caller", body = Vec<BankAccountResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_accounts(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BankAccountResponse>>> {
    let accounts = state.account_service.list_accounts(current_user.id).await?;
    Ok(Json(accounts.into_iter().map(BankAccountResponse::from).collect()))
}

/// Get one of the caller's bank accounts
#[utoipa::path(
    get,
    path = "/api/bank-accounts/{id}",
    tag = "Bank Accounts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account", body = BankAccountResponse),
        (status = 400, description = "Malformed account ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_account(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> AppResult<Json<BankAccountResponse>> {
    let account = state.account_service.get_account(id, current_user.id).await?;
    Ok(Json(BankAccountResponse::from(account)))
}

/// Rename or relabel one of the caller's bank accounts
#[utoipa::path(
    put,
    path = "/api/bank-accounts/{id}",
    tag = "Bank Accounts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Updated account", body = BankAccountResponse),
        (status = 400, description = "Validation error or unknown state"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Account name already used by this owner")
    )
)]
pub async fn update_account(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateAccountRequest>,
) -> AppResult<Json<BankAccountResponse>> {
    let new_state: AccountState = payload.state.parse()?;

    let account = state
        .account_service
        .update_account(id, current_user.id, payload.name, new_state)
        .await?;

    Ok(Json(BankAccountResponse::from(account)))
}

/// Delete one of the caller's bank accounts
#[utoipa::path(
    delete,
    path = "/api/bank-accounts/{id}",
    tag = "Bank Accounts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Malformed account ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn delete_account(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> AppResult<NoContent> {
    state
        .account_service
        .delete_account(id, current_user.id)
        .await?;

    Ok(NoContent)
}
