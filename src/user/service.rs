use sqlx::PgPool;

use super::models::{NewUser, User};
use crate::storage::{db_error, EntityKind, StorageResult};

const ENTITY: EntityKind = EntityKind::User;

/// Postgres queries for users.
pub struct UserService;

impl UserService {
    pub async fn get(pool: &PgPool, id: i32) -> StorageResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(db_error(ENTITY, "get", Some(id)))
    }

    pub async fn get_by_username(pool: &PgPool, username: &str) -> StorageResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await
            .map_err(db_error(ENTITY, "get_by_username", None))
    }

    pub async fn create(pool: &PgPool, new: NewUser) -> StorageResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password
            "#,
        )
        .bind(&new.username)
        .bind(&new.password_hash)
        .fetch_one(pool)
        .await
        .map_err(db_error(ENTITY, "create", None))
    }
}
