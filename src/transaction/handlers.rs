use actix_web::{delete, get, patch, post, web, HttpResponse};
use tracing::{info, warn};

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::RecordId;
use crate::storage::Storage;

use super::models::{
    GroupType, NewTransaction, StatusUpdate, Transaction, TransactionPatch, TransactionType,
};

fn not_found() -> AppError {
    AppError::NotFound("Transaction not found".to_string())
}

/// GET /api/transactions - List all transactions, oldest date first
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    responses(
        (status = 200, description = "All transactions ordered by date, then id", body = Vec<Transaction>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[get("/api/transactions")]
pub async fn list_transactions(
    storage: web::Data<dyn Storage>,
) -> Result<HttpResponse, AppError> {
    let transactions = storage.list_transactions().await?;
    Ok(HttpResponse::Ok().json(transactions))
}

/// GET /api/transactions/{id} - Get a specific transaction
#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(("id" = i32, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction found", body = Transaction),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
#[get("/api/transactions/{id}")]
pub async fn get_transaction(
    storage: web::Data<dyn Storage>,
    id: RecordId,
) -> Result<HttpResponse, AppError> {
    let transaction = storage.get_transaction(id.0).await?.ok_or_else(not_found)?;
    Ok(HttpResponse::Ok().json(transaction))
}

/// POST /api/transactions - Create a new transaction
///
/// `status` defaults to PENDING. Unknown `categoryId`/`accountId` references
/// are rejected by storage as constraint violations.
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    request_body = NewTransaction,
    responses(
        (status = 201, description = "Transaction created", body = Transaction),
        (status = 400, description = "Validation error or unknown reference", body = ErrorResponse)
    )
)]
#[post("/api/transactions")]
pub async fn create_transaction(
    storage: web::Data<dyn Storage>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    let new = NewTransaction::from_json(&body)?;
    if new.breaks_income_group_convention() {
        warn!(description = %new.description, "EXPENSE transaction filed under the INCOME group");
    }

    let transaction = storage.create_transaction(new).await?;

    info!(
        transaction_id = transaction.id,
        amount = %transaction.amount,
        "Created transaction"
    );
    Ok(HttpResponse::Created().json(transaction))
}

/// PATCH /api/transactions/{id}/status - Update only the status
#[utoipa::path(
    patch,
    path = "/api/transactions/{id}/status",
    tag = "Transactions",
    params(("id" = i32, Path, description = "Transaction id")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = Transaction),
        (status = 400, description = "Invalid id or status", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
#[patch("/api/transactions/{id}/status")]
pub async fn update_transaction_status(
    storage: web::Data<dyn Storage>,
    id: RecordId,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    let update = StatusUpdate::from_json(&body)?;
    let transaction = storage
        .update_transaction_status(id.0, update.status)
        .await?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(transaction))
}

/// PATCH /api/transactions/{id} - Partially update a transaction
///
/// Any subset of the creation fields; nullable fields accept an explicit
/// `null` to clear them. An empty body returns the row unchanged.
#[utoipa::path(
    patch,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(("id" = i32, Path, description = "Transaction id")),
    request_body(content = NewTransaction, description = "Any subset of the transaction fields"),
    responses(
        (status = 200, description = "Transaction updated", body = Transaction),
        (status = 400, description = "Validation error or unknown reference", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
#[patch("/api/transactions/{id}")]
pub async fn update_transaction(
    storage: web::Data<dyn Storage>,
    id: RecordId,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    // Unknown ids answer 404 before the body is looked at
    storage.get_transaction(id.0).await?.ok_or_else(not_found)?;
    let patch = TransactionPatch::from_json(&body)?;
    let transaction = storage
        .update_transaction(id.0, patch)
        .await?
        .ok_or_else(not_found)?;

    if transaction.group_type == Some(GroupType::Income)
        && transaction.transaction_type == TransactionType::Expense
    {
        warn!(transaction_id = transaction.id, "EXPENSE transaction filed under the INCOME group");
    }

    Ok(HttpResponse::Ok().json(transaction))
}

/// DELETE /api/transactions/{id} - Delete a transaction
///
/// Succeeds whether or not the row existed.
#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(("id" = i32, Path, description = "Transaction id")),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse)
    )
)]
#[delete("/api/transactions/{id}")]
pub async fn delete_transaction(
    storage: web::Data<dyn Storage>,
    id: RecordId,
) -> Result<HttpResponse, AppError> {
    storage.delete_transaction(id.0).await?;

    info!(transaction_id = id.0, "Deleted transaction");
    Ok(HttpResponse::NoContent().finish())
}
