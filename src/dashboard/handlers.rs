use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use tracing::debug;

use crate::errors::{AppError, ErrorResponse};
use crate::storage::Storage;

use super::aggregation::{self, ReportFilter};
use super::models::{DashboardSummary, ReportQuery, ReportSummary};

/// GET /api/dashboard/summary - Balance and totals over all transactions
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard figures", body = DashboardSummary),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[get("/api/dashboard/summary")]
pub async fn get_summary(storage: web::Data<dyn Storage>) -> Result<HttpResponse, AppError> {
    let transactions = storage.list_transactions().await?;
    Ok(HttpResponse::Ok().json(aggregation::dashboard_summary(&transactions)))
}

/// GET /api/reports - Totals for a period, optionally narrowed by group and
/// payment method
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Dashboard",
    params(ReportQuery),
    responses(
        (status = 200, description = "Report over the matching transactions", body = ReportSummary),
        (status = 400, description = "Invalid filter value", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[get("/api/reports")]
pub async fn get_report(
    storage: web::Data<dyn Storage>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let filter: ReportFilter = query.into_inner().into();
    let today = Utc::now().date_naive();
    debug!(?filter, %today, "Building report");

    let transactions = storage.list_transactions().await?;
    Ok(HttpResponse::Ok().json(aggregation::report_summary(&transactions, filter, today)))
}
