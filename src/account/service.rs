use sqlx::PgPool;
use tracing::debug;

use super::models::{Account, NewAccount};
use crate::storage::{db_error, EntityKind, StorageResult};

const ENTITY: EntityKind = EntityKind::Account;

/// Postgres queries for accounts.
pub struct AccountService;

impl AccountService {
    /// List all accounts in creation order.
    pub async fn list(pool: &PgPool) -> StorageResult<Vec<Account>> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, type AS account_type, balance, credit_limit, is_credit
            FROM accounts
            ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(db_error(ENTITY, "list", None))
    }

    pub async fn get(pool: &PgPool, id: i32) -> StorageResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, type AS account_type, balance, credit_limit, is_credit
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_error(ENTITY, "get", Some(id)))
    }

    pub async fn create(pool: &PgPool, new: NewAccount) -> StorageResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (name, type, balance, credit_limit, is_credit)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, type AS account_type, balance, credit_limit, is_credit
            "#,
        )
        .bind(&new.name)
        .bind(&new.account_type)
        .bind(new.balance)
        .bind(new.credit_limit)
        .bind(new.is_credit)
        .fetch_one(pool)
        .await
        .map_err(db_error(ENTITY, "create", None))
        .inspect(|account| debug!(id = account.id, "Inserted account"))
    }
}
