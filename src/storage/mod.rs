//! Storage access layer.
//!
//! Handlers receive a `web::Data<dyn Storage>`, so the backend is chosen at
//! startup: [`PgStorage`] against PostgreSQL, or [`MemoryStorage`] for tests and
//! database-less development runs.

mod error;
mod memory;
mod postgres;

pub use error::{db_error, EntityKind, PersistenceError, PersistenceErrorKind, StorageResult};
pub use memory::MemoryStorage;
pub use postgres::PgStorage;

use async_trait::async_trait;

use crate::account::models::{Account, NewAccount};
use crate::category::models::{Category, NewCategory};
use crate::transaction::models::{NewTransaction, Transaction, TransactionPatch, TransactionStatus};
use crate::user::models::{NewUser, User};

/// CRUD over the finance schema. Every call commits on its own.
///
/// Lookups by id return `Ok(None)` for absent rows; only storage faults are
/// errors.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Connectivity check used by the health endpoint.
    async fn ping(&self) -> StorageResult<()>;

    async fn get_user(&self, id: i32) -> StorageResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>>;
    /// Fails with a constraint violation when the username is taken.
    async fn create_user(&self, new: NewUser) -> StorageResult<User>;

    /// All categories ordered by id.
    async fn list_categories(&self) -> StorageResult<Vec<Category>>;
    async fn get_category(&self, id: i32) -> StorageResult<Option<Category>>;
    async fn create_category(&self, new: NewCategory) -> StorageResult<Category>;

    /// All accounts ordered by id.
    async fn list_accounts(&self) -> StorageResult<Vec<Account>>;
    async fn get_account(&self, id: i32) -> StorageResult<Option<Account>>;
    async fn create_account(&self, new: NewAccount) -> StorageResult<Account>;

    /// All transactions ordered by date ascending, ties in insertion order.
    async fn list_transactions(&self) -> StorageResult<Vec<Transaction>>;
    async fn get_transaction(&self, id: i32) -> StorageResult<Option<Transaction>>;
    /// Fails with a constraint violation when `categoryId` or `accountId`
    /// reference a missing row.
    async fn create_transaction(&self, new: NewTransaction) -> StorageResult<Transaction>;
    /// An empty patch returns the current row unchanged.
    async fn update_transaction(
        &self,
        id: i32,
        patch: TransactionPatch,
    ) -> StorageResult<Option<Transaction>>;
    async fn update_transaction_status(
        &self,
        id: i32,
        status: TransactionStatus,
    ) -> StorageResult<Option<Transaction>>;
    /// Deleting an absent id is not an error.
    async fn delete_transaction(&self, id: i32) -> StorageResult<()>;
}
