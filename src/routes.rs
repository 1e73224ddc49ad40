use actix_web::{get, web, HttpResponse, Responder};
use tracing::warn;

use crate::errors::AppError;
use crate::storage::Storage;
use crate::{account, category, dashboard, transaction};

/// Health check endpoint that verifies storage connectivity
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Storage reachable"),
        (status = 503, description = "Storage unreachable")
    )
)]
#[get("/health")]
pub async fn health_check(storage: web::Data<dyn Storage>) -> impl Responder {
    match storage.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(err) => {
            warn!(error = %err, "Health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "database": "disconnected"
            }))
        }
    }
}

/// Register every API route plus the body/query error handlers.
///
/// Expects a `web::Data<dyn Storage>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid JSON body: {err}")).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid query string: {err}")).into()
    }))
    .service(health_check)
    .service(category::list_categories)
    .service(category::create_category)
    .service(category::get_category)
    .service(account::list_accounts)
    .service(account::create_account)
    .service(account::get_account)
    // Transaction endpoints (order matters: specific routes before generic {id} routes)
    .service(transaction::list_transactions)
    .service(transaction::create_transaction)
    .service(transaction::update_transaction_status)
    .service(transaction::get_transaction)
    .service(transaction::update_transaction)
    .service(transaction::delete_transaction)
    .service(dashboard::get_summary)
    .service(dashboard::get_report);
}
