//! First-run data: default categories, accounts and a month of sample
//! transactions. Each table is only seeded while it is empty.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use crate::account::models::NewAccount;
use crate::category::models::NewCategory;
use crate::storage::{Storage, StorageResult};
use crate::transaction::models::{
    GroupType, NewTransaction, PaymentMethod, TransactionStatus, TransactionType,
};
use crate::transaction::models::GroupType::{Group1, Group2};
use crate::transaction::models::PaymentMethod::{Inter, Nubank};
use crate::transaction::models::TransactionStatus::{Paid, Pending};

const CATEGORIES: &[(&str, TransactionType, &str)] = &[
    ("Moradia", TransactionType::Expense, "#ef4444"),
    ("Utilidades", TransactionType::Expense, "#f97316"),
    ("Educação", TransactionType::Expense, "#eab308"),
    ("Transporte", TransactionType::Expense, "#84cc16"),
    ("Alimentação", TransactionType::Expense, "#06b6d4"),
    ("Lazer", TransactionType::Expense, "#8b5cf6"),
    ("Salário", TransactionType::Income, "#4ade80"),
    ("Freelance", TransactionType::Income, "#22c55e"),
];

struct SampleTransaction {
    description: &'static str,
    cents: i64,
    due_day: u32,
    transaction_type: TransactionType,
    status: TransactionStatus,
    group_type: GroupType,
    payment_method: PaymentMethod,
    category: &'static str,
    account: Option<&'static str>,
}

#[allow(clippy::too_many_arguments)]
const fn expense(
    description: &'static str,
    cents: i64,
    due_day: u32,
    status: TransactionStatus,
    group_type: GroupType,
    payment_method: PaymentMethod,
    category: &'static str,
    account: &'static str,
) -> SampleTransaction {
    SampleTransaction {
        description,
        cents,
        due_day,
        transaction_type: TransactionType::Expense,
        status,
        group_type,
        payment_method,
        category,
        account: Some(account),
    }
}

const fn salary(description: &'static str, cents: i64) -> SampleTransaction {
    SampleTransaction {
        description,
        cents,
        due_day: 5,
        transaction_type: TransactionType::Income,
        status: TransactionStatus::Pending,
        group_type: GroupType::Income,
        payment_method: PaymentMethod::Other,
        category: "Salário",
        account: None,
    }
}

const SAMPLE_TRANSACTIONS: &[SampleTransaction] = &[
    expense("CELPE", 22943, 10, Pending, Group1, Nubank, "Utilidades", "Nubank"),
    expense("COMPESA", 13136, 15, Pending, Group1, Nubank, "Utilidades", "Nubank"),
    expense("CARTÃO INTER", 123035, 14, Pending, Group1, Inter, "Utilidades", "Inter"),
    expense("PUÇANET", 5500, 30, Paid, Group1, Nubank, "Utilidades", "Nubank"),
    expense("ESCOLA DE RAVI", 16500, 10, Paid, Group1, Nubank, "Educação", "Nubank"),
    expense("ALUGUEL", 80000, 15, Pending, Group2, Nubank, "Moradia", "Nubank"),
    expense("PLANO DE RAVI", 28273, 15, Pending, Group2, Inter, "Educação", "Inter"),
    expense("ANIV. MÃE DE RAFA", 20000, 15, Pending, Group2, Nubank, "Utilidades", "Nubank"),
    salary("JUDAS", 147335),
    salary("RAFAELA", 180000),
];

/// Day `day` of `today`'s month, or the month's last day when it is shorter.
fn day_of_month(today: NaiveDate, day: u32) -> NaiveDate {
    (1..=day)
        .rev()
        .find_map(|d| today.with_day(d))
        .unwrap_or(today)
}

fn default_accounts() -> Vec<NewAccount> {
    vec![
        NewAccount {
            name: "Nubank".to_string(),
            account_type: "CREDIT_CARD".to_string(),
            balance: Decimal::ZERO,
            credit_limit: Decimal::from(2000),
            is_credit: true,
        },
        NewAccount {
            name: "Inter".to_string(),
            account_type: "CREDIT_CARD".to_string(),
            balance: Decimal::ZERO,
            credit_limit: Decimal::from(700),
            is_credit: true,
        },
        NewAccount {
            name: "Conta Corrente".to_string(),
            account_type: "CHECKING".to_string(),
            balance: Decimal::new(304281, 2),
            credit_limit: Decimal::ZERO,
            is_credit: false,
        },
    ]
}

/// Seed every empty table. Sample transactions are dated `today` and link to
/// the seeded category and account of the same name when they exist.
pub async fn seed_defaults(storage: &dyn Storage, today: NaiveDate) -> StorageResult<()> {
    if storage.list_categories().await?.is_empty() {
        for (name, category_type, color) in CATEGORIES {
            storage
                .create_category(NewCategory::new(name, *category_type, color))
                .await?;
        }
        info!(count = CATEGORIES.len(), "Seeded default categories");
    }

    if storage.list_accounts().await?.is_empty() {
        let accounts = default_accounts();
        let count = accounts.len();
        for account in accounts {
            storage.create_account(account).await?;
        }
        info!(count, "Seeded default accounts");
    }

    if storage.list_transactions().await?.is_empty() {
        let categories = storage.list_categories().await?;
        let accounts = storage.list_accounts().await?;

        for sample in SAMPLE_TRANSACTIONS {
            let category_id = categories
                .iter()
                .find(|c| c.name == sample.category)
                .map(|c| c.id);
            let account_id = sample
                .account
                .and_then(|name| accounts.iter().find(|a| a.name == name))
                .map(|a| a.id);

            storage
                .create_transaction(NewTransaction {
                    description: sample.description.to_string(),
                    amount: Decimal::new(sample.cents, 2),
                    date: today,
                    due_date: Some(day_of_month(today, sample.due_day)),
                    transaction_type: sample.transaction_type,
                    status: sample.status,
                    group_type: Some(sample.group_type),
                    payment_method: Some(sample.payment_method),
                    category_id,
                    account_id,
                })
                .await?;
        }
        info!(count = SAMPLE_TRANSACTIONS.len(), "Seeded sample transactions");
    }

    Ok(())
}
