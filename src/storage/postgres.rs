use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{Storage, StorageResult};
use crate::account::models::{Account, NewAccount};
use crate::account::service::AccountService;
use crate::category::models::{Category, NewCategory};
use crate::category::service::CategoryService;
use crate::transaction::models::{NewTransaction, Transaction, TransactionPatch, TransactionStatus};
use crate::transaction::service::TransactionService;
use crate::user::models::{NewUser, User};
use crate::user::service::UserService;

/// PostgreSQL-backed storage. Queries live in each domain's `service` module.
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect with the production pool settings.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(3))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Apply the schema migrations in `migrations/`.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(super::db_error(super::EntityKind::User, "ping", None))
    }

    async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        UserService::get(&self.pool, id).await
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        UserService::get_by_username(&self.pool, username).await
    }

    async fn create_user(&self, new: NewUser) -> StorageResult<User> {
        UserService::create(&self.pool, new).await
    }

    async fn list_categories(&self) -> StorageResult<Vec<Category>> {
        CategoryService::list(&self.pool).await
    }

    async fn get_category(&self, id: i32) -> StorageResult<Option<Category>> {
        CategoryService::get(&self.pool, id).await
    }

    async fn create_category(&self, new: NewCategory) -> StorageResult<Category> {
        CategoryService::create(&self.pool, new).await
    }

    async fn list_accounts(&self) -> StorageResult<Vec<Account>> {
        AccountService::list(&self.pool).await
    }

    async fn get_account(&self, id: i32) -> StorageResult<Option<Account>> {
        AccountService::get(&self.pool, id).await
    }

    async fn create_account(&self, new: NewAccount) -> StorageResult<Account> {
        AccountService::create(&self.pool, new).await
    }

    async fn list_transactions(&self) -> StorageResult<Vec<Transaction>> {
        TransactionService::list(&self.pool).await
    }

    async fn get_transaction(&self, id: i32) -> StorageResult<Option<Transaction>> {
        TransactionService::get(&self.pool, id).await
    }

    async fn create_transaction(&self, new: NewTransaction) -> StorageResult<Transaction> {
        TransactionService::create(&self.pool, new).await
    }

    async fn update_transaction(
        &self,
        id: i32,
        patch: TransactionPatch,
    ) -> StorageResult<Option<Transaction>> {
        TransactionService::update(&self.pool, id, patch).await
    }

    async fn update_transaction_status(
        &self,
        id: i32,
        status: TransactionStatus,
    ) -> StorageResult<Option<Transaction>> {
        TransactionService::update_status(&self.pool, id, status).await
    }

    async fn delete_transaction(&self, id: i32) -> StorageResult<()> {
        TransactionService::delete(&self.pool, id).await
    }
}
