use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{EntityKind, PersistenceError, Storage, StorageResult};
use crate::account::models::{Account, NewAccount};
use crate::category::models::{Category, NewCategory};
use crate::transaction::models::{NewTransaction, Transaction, TransactionPatch, TransactionStatus};
use crate::user::models::{NewUser, User};

/// Rows keyed by id with a serial counter, like a SERIAL primary key.
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

#[derive(Default)]
struct State {
    users: Table<User>,
    categories: Table<Category>,
    accounts: Table<Account>,
    transactions: Table<Transaction>,
}

impl State {
    /// Foreign key checks for `transactions.category_id` / `account_id`.
    fn check_references(
        &self,
        operation: &'static str,
        id: Option<i32>,
        category_id: Option<i32>,
        account_id: Option<i32>,
    ) -> StorageResult<()> {
        if let Some(category_id) = category_id {
            if !self.categories.rows.contains_key(&category_id) {
                return Err(PersistenceError::constraint(
                    EntityKind::Transaction,
                    operation,
                    id,
                    format!("category {category_id} does not exist"),
                ));
            }
        }
        if let Some(account_id) = account_id {
            if !self.accounts.rows.contains_key(&account_id) {
                return Err(PersistenceError::constraint(
                    EntityKind::Transaction,
                    operation,
                    id,
                    format!("account {account_id} does not exist"),
                ));
            }
        }
        Ok(())
    }
}

/// In-process storage with the same contract as [`super::PgStorage`].
///
/// Nothing survives a restart. Writers take an exclusive lock, so concurrent
/// updates resolve as last write wins.
#[derive(Default)]
pub struct MemoryStorage {
    state: RwLock<State>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        Ok(self.state.read().await.users.get(id))
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, new: NewUser) -> StorageResult<User> {
        let mut state = self.state.write().await;
        if state.users.rows.values().any(|u| u.username == new.username) {
            return Err(PersistenceError::constraint(
                EntityKind::User,
                "create",
                None,
                format!("username '{}' already exists", new.username),
            ));
        }
        Ok(state.users.insert_with(|id| User {
            id,
            username: new.username,
            password: new.password_hash,
        }))
    }

    async fn list_categories(&self) -> StorageResult<Vec<Category>> {
        Ok(self.state.read().await.categories.all())
    }

    async fn get_category(&self, id: i32) -> StorageResult<Option<Category>> {
        Ok(self.state.read().await.categories.get(id))
    }

    async fn create_category(&self, new: NewCategory) -> StorageResult<Category> {
        let mut state = self.state.write().await;
        Ok(state.categories.insert_with(|id| Category {
            id,
            name: new.name,
            category_type: new.category_type,
            color: new.color,
        }))
    }

    async fn list_accounts(&self) -> StorageResult<Vec<Account>> {
        Ok(self.state.read().await.accounts.all())
    }

    async fn get_account(&self, id: i32) -> StorageResult<Option<Account>> {
        Ok(self.state.read().await.accounts.get(id))
    }

    async fn create_account(&self, new: NewAccount) -> StorageResult<Account> {
        let mut state = self.state.write().await;
        Ok(state.accounts.insert_with(|id| Account {
            id,
            name: new.name,
            account_type: new.account_type,
            balance: new.balance,
            credit_limit: new.credit_limit,
            is_credit: new.is_credit,
        }))
    }

    async fn list_transactions(&self) -> StorageResult<Vec<Transaction>> {
        let mut transactions = self.state.read().await.transactions.all();
        // Stable sort keeps id order for equal dates
        transactions.sort_by_key(|t| t.date);
        Ok(transactions)
    }

    async fn get_transaction(&self, id: i32) -> StorageResult<Option<Transaction>> {
        Ok(self.state.read().await.transactions.get(id))
    }

    async fn create_transaction(&self, new: NewTransaction) -> StorageResult<Transaction> {
        let mut state = self.state.write().await;
        state.check_references("create", None, new.category_id, new.account_id)?;

        let created_at = Utc::now();
        Ok(state.transactions.insert_with(|id| Transaction {
            id,
            description: new.description,
            amount: new.amount,
            date: new.date,
            due_date: new.due_date,
            transaction_type: new.transaction_type,
            status: new.status,
            group_type: new.group_type,
            payment_method: new.payment_method,
            category_id: new.category_id,
            account_id: new.account_id,
            created_at,
        }))
    }

    async fn update_transaction(
        &self,
        id: i32,
        patch: TransactionPatch,
    ) -> StorageResult<Option<Transaction>> {
        let mut state = self.state.write().await;
        let Some(mut transaction) = state.transactions.get(id) else {
            return Ok(None);
        };

        transaction.apply(patch);
        state.check_references(
            "update",
            Some(id),
            transaction.category_id,
            transaction.account_id,
        )?;

        state.transactions.rows.insert(id, transaction.clone());
        debug!(id, "Updated transaction in memory");
        Ok(Some(transaction))
    }

    async fn update_transaction_status(
        &self,
        id: i32,
        status: TransactionStatus,
    ) -> StorageResult<Option<Transaction>> {
        let mut state = self.state.write().await;
        Ok(state.transactions.rows.get_mut(&id).map(|transaction| {
            transaction.status = status;
            transaction.clone()
        }))
    }

    async fn delete_transaction(&self, id: i32) -> StorageResult<()> {
        let removed = self.state.write().await.transactions.rows.remove(&id);
        debug!(id, existed = removed.is_some(), "Deleted transaction in memory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::models::TransactionType;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn new_transaction(description: &str, day: u32) -> NewTransaction {
        NewTransaction {
            description: description.to_string(),
            amount: Decimal::from(10),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            due_date: None,
            transaction_type: TransactionType::Expense,
            status: TransactionStatus::default(),
            group_type: None,
            payment_method: None,
            category_id: None,
            account_id: None,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_date_then_insertion() {
        let storage = MemoryStorage::new();
        storage.create_transaction(new_transaction("late", 20)).await.unwrap();
        storage.create_transaction(new_transaction("early-a", 5)).await.unwrap();
        storage.create_transaction(new_transaction("early-b", 5)).await.unwrap();

        let names: Vec<String> = storage
            .list_transactions()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(names, ["early-a", "early-b", "late"]);
    }

    #[tokio::test]
    async fn test_dangling_category_is_a_constraint_violation() {
        let storage = MemoryStorage::new();
        let mut new = new_transaction("x", 1);
        new.category_id = Some(99);

        let err = storage.create_transaction(new).await.unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(err.entity, EntityKind::Transaction);
        assert!(storage.list_transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_leaves_row_unchanged() {
        let storage = MemoryStorage::new();
        let created = storage.create_transaction(new_transaction("x", 1)).await.unwrap();

        let patch = TransactionPatch {
            account_id: Some(Some(42)),
            description: Some("changed".to_string()),
            ..Default::default()
        };
        assert!(storage.update_transaction(created.id, patch).await.is_err());

        let stored = storage.get_transaction(created.id).await.unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let storage = MemoryStorage::new();
        let first = storage.create_transaction(new_transaction("a", 1)).await.unwrap();
        storage.delete_transaction(first.id).await.unwrap();
        let second = storage.create_transaction(new_transaction("b", 1)).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let storage = MemoryStorage::new();
        let new = || NewUser {
            username: "rafa".to_string(),
            password_hash: "$argon2id$stub".to_string(),
        };
        storage.create_user(new()).await.unwrap();
        let err = storage.create_user(new()).await.unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[tokio::test]
    async fn test_category_round_trip() {
        let storage = MemoryStorage::new();
        let created = storage
            .create_category(NewCategory::new("Lazer", TransactionType::Expense, "#8b5cf6"))
            .await
            .unwrap();
        let fetched = storage.get_category(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }
}
