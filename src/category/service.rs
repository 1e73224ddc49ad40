use sqlx::PgPool;
use tracing::debug;

use super::models::{Category, CategoryRow, NewCategory};
use crate::storage::{db_error, EntityKind, PersistenceError, PersistenceErrorKind, StorageResult};
use crate::validation::WireEnum;

const ENTITY: EntityKind = EntityKind::Category;

/// Postgres queries for categories.
pub struct CategoryService;

impl CategoryService {
    fn decode(operation: &'static str, row: CategoryRow) -> StorageResult<Category> {
        let id = row.id;
        row.into_category().map_err(|detail| {
            PersistenceError::new(ENTITY, operation, Some(id), PersistenceErrorKind::Database, detail)
        })
    }

    pub async fn list(pool: &PgPool) -> StorageResult<Vec<Category>> {
        sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, type AS category_type, color FROM categories ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
        .map_err(db_error(ENTITY, "list", None))?
        .into_iter()
        .map(|row| Self::decode("list", row))
        .collect()
    }

    pub async fn get(pool: &PgPool, id: i32) -> StorageResult<Option<Category>> {
        sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, type AS category_type, color FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_error(ENTITY, "get", Some(id)))?
        .map(|row| Self::decode("get", row))
        .transpose()
    }

    pub async fn create(pool: &PgPool, new: NewCategory) -> StorageResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, type, color)
            VALUES ($1, $2, $3)
            RETURNING id, name, type AS category_type, color
            "#,
        )
        .bind(&new.name)
        .bind(new.category_type.as_str())
        .bind(&new.color)
        .fetch_one(pool)
        .await
        .map_err(db_error(ENTITY, "create", None))?;

        debug!(id = row.id, "Inserted category");
        Self::decode("create", row)
    }
}
