use actix_web::{get, post, web, HttpResponse};
use tracing::info;

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::RecordId;
use crate::storage::Storage;

use super::models::{Account, NewAccount};

/// GET /api/accounts - List all accounts
#[utoipa::path(
    get,
    path = "/api/accounts",
    tag = "Accounts",
    responses(
        (status = 200, description = "All accounts ordered by id", body = Vec<Account>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[get("/api/accounts")]
pub async fn list_accounts(storage: web::Data<dyn Storage>) -> Result<HttpResponse, AppError> {
    let accounts = storage.list_accounts().await?;
    Ok(HttpResponse::Ok().json(accounts))
}

#[utoipa::path(
    get,
    path = "/api/accounts/{id}",
    tag = "Accounts",
    params(("id" = i32, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account found", body = Account),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse)
    )
)]
#[get("/api/accounts/{id}")]
pub async fn get_account(
    storage: web::Data<dyn Storage>,
    id: RecordId,
) -> Result<HttpResponse, AppError> {
    let account = storage
        .get_account(id.0)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    Ok(HttpResponse::Ok().json(account))
}

/// POST /api/accounts - Create a new account
#[utoipa::path(
    post,
    path = "/api/accounts",
    tag = "Accounts",
    request_body = NewAccount,
    responses(
        (status = 201, description = "Account created", body = Account),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
#[post("/api/accounts")]
pub async fn create_account(
    storage: web::Data<dyn Storage>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    let new = NewAccount::from_json(&body)?;
    let account = storage.create_account(new).await?;

    info!(account_id = account.id, name = %account.name, "Created account");
    Ok(HttpResponse::Created().json(account))
}
