use sqlx::PgPool;
use tracing::debug;

use super::models::{
    NewTransaction, Transaction, TransactionPatch, TransactionRow, TransactionStatus,
};
use crate::storage::{db_error, EntityKind, PersistenceError, PersistenceErrorKind, StorageResult};
use crate::validation::WireEnum;

const ENTITY: EntityKind = EntityKind::Transaction;

const COLUMNS: &str = r#"
    id, description, amount, date, due_date, type AS transaction_type, status,
    group_type, payment_method, category_id, account_id, created_at
"#;

/// Postgres queries for transactions.
pub struct TransactionService;

impl TransactionService {
    fn decode(
        operation: &'static str,
        row: TransactionRow,
    ) -> StorageResult<Transaction> {
        let id = row.id;
        row.into_transaction().map_err(|detail| {
            PersistenceError::new(ENTITY, operation, Some(id), PersistenceErrorKind::Database, detail)
        })
    }

    /// List every transaction, oldest first
    pub async fn list(pool: &PgPool) -> StorageResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {COLUMNS} FROM transactions ORDER BY date ASC, id ASC"
        ))
        .fetch_all(pool)
        .await
        .map_err(db_error(ENTITY, "list", None))?;

        debug!(count = rows.len(), "Listed transactions");
        rows.into_iter().map(|row| Self::decode("list", row)).collect()
    }

    pub async fn get(pool: &PgPool, id: i32) -> StorageResult<Option<Transaction>> {
        sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {COLUMNS} FROM transactions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_error(ENTITY, "get", Some(id)))?
        .map(|row| Self::decode("get", row))
        .transpose()
    }

    pub async fn create(pool: &PgPool, new: NewTransaction) -> StorageResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            INSERT INTO transactions
                (description, amount, date, due_date, type, status,
                 group_type, payment_method, category_id, account_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&new.description)
        .bind(new.amount)
        .bind(new.date)
        .bind(new.due_date)
        .bind(new.transaction_type.as_str())
        .bind(new.status.as_str())
        .bind(new.group_type.map(|g| g.as_str()))
        .bind(new.payment_method.map(|p| p.as_str()))
        .bind(new.category_id)
        .bind(new.account_id)
        .fetch_one(pool)
        .await
        .map_err(db_error(ENTITY, "create", None))?;

        Self::decode("create", row)
    }

    /// Read-merge-write under a row lock. Concurrent updates are last write wins.
    pub async fn update(
        pool: &PgPool,
        id: i32,
        patch: TransactionPatch,
    ) -> StorageResult<Option<Transaction>> {
        let mut tx = pool
            .begin()
            .await
            .map_err(db_error(ENTITY, "update", Some(id)))?;

        let existing = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {COLUMNS} FROM transactions WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error(ENTITY, "update", Some(id)))?;

        let Some(existing) = existing else {
            return Ok(None);
        };
        let mut transaction = Self::decode("update", existing)?;

        if patch.is_empty() {
            return Ok(Some(transaction));
        }
        transaction.apply(patch);

        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            UPDATE transactions SET
                description = $2,
                amount = $3,
                date = $4,
                due_date = $5,
                type = $6,
                status = $7,
                group_type = $8,
                payment_method = $9,
                category_id = $10,
                account_id = $11
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&transaction.description)
        .bind(transaction.amount)
        .bind(transaction.date)
        .bind(transaction.due_date)
        .bind(transaction.transaction_type.as_str())
        .bind(transaction.status.as_str())
        .bind(transaction.group_type.map(|g| g.as_str()))
        .bind(transaction.payment_method.map(|p| p.as_str()))
        .bind(transaction.category_id)
        .bind(transaction.account_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error(ENTITY, "update", Some(id)))?;

        tx.commit()
            .await
            .map_err(db_error(ENTITY, "update", Some(id)))?;

        Self::decode("update", row).map(Some)
    }

    pub async fn update_status(
        pool: &PgPool,
        id: i32,
        status: TransactionStatus,
    ) -> StorageResult<Option<Transaction>> {
        sqlx::query_as::<_, TransactionRow>(&format!(
            "UPDATE transactions SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(pool)
        .await
        .map_err(db_error(ENTITY, "update_status", Some(id)))?
        .map(|row| Self::decode("update_status", row))
        .transpose()
    }

    pub async fn delete(pool: &PgPool, id: i32) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(db_error(ENTITY, "delete", Some(id)))?;

        debug!(id, rows = result.rows_affected(), "Deleted transaction");
        Ok(())
    }
}
