use actix_web::{get, post, web, HttpResponse};
use tracing::info;

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::RecordId;
use crate::storage::Storage;

use super::models::{Category, NewCategory};

/// GET /api/categories - List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories ordered by id", body = Vec<Category>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[get("/api/categories")]
pub async fn list_categories(storage: web::Data<dyn Storage>) -> Result<HttpResponse, AppError> {
    let categories = storage.list_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// GET /api/categories/{id} - Get a specific category
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "Categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
#[get("/api/categories/{id}")]
pub async fn get_category(
    storage: web::Data<dyn Storage>,
    id: RecordId,
) -> Result<HttpResponse, AppError> {
    let category = storage
        .get_category(id.0)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    Ok(HttpResponse::Ok().json(category))
}

/// POST /api/categories - Create a new category
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Categories",
    request_body = NewCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
#[post("/api/categories")]
pub async fn create_category(
    storage: web::Data<dyn Storage>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    let new = NewCategory::from_json(&body)?;
    let category = storage.create_category(new).await?;

    info!(category_id = category.id, name = %category.name, "Created category");
    Ok(HttpResponse::Created().json(category))
}
