//! Folds over the transaction set behind the dashboard and report endpoints.
//!
//! Every function here is pure and order independent: it reads a slice and
//! never touches storage.

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::models::{DashboardSummary, ReportSummary};
use crate::transaction::models::{GroupType, PaymentMethod, Transaction, TransactionType};

fn sum<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Decimal {
    transactions.map(|t| t.amount).sum()
}

pub fn total_by_type(transactions: &[Transaction], transaction_type: TransactionType) -> Decimal {
    sum(transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type))
}

pub fn total_income(transactions: &[Transaction]) -> Decimal {
    total_by_type(transactions, TransactionType::Income)
}

pub fn total_expenses(transactions: &[Transaction]) -> Decimal {
    total_by_type(transactions, TransactionType::Expense)
}

/// Sum of every amount in the bucket, regardless of type.
pub fn total_by_group(transactions: &[Transaction], group: GroupType) -> Decimal {
    sum(transactions
        .iter()
        .filter(|t| t.group_type == Some(group)))
}

pub fn total_by_payment_method_and_type(
    transactions: &[Transaction],
    method: PaymentMethod,
    transaction_type: TransactionType,
) -> Decimal {
    sum(transactions
        .iter()
        .filter(|t| t.payment_method == Some(method) && t.transaction_type == transaction_type))
}

/// Net of settled transactions only. PENDING rows never move the balance.
pub fn current_balance(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.status.is_settled())
        .map(Transaction::signed_amount)
        .sum()
}

/// `current_balance + (income - expenses)`.
///
/// Settled rows are counted twice, once in each term. Clients depend on this
/// figure as-is.
pub fn remaining_balance(transactions: &[Transaction]) -> Decimal {
    current_balance(transactions) + (total_income(transactions) - total_expenses(transactions))
}

pub fn dashboard_summary(transactions: &[Transaction]) -> DashboardSummary {
    DashboardSummary {
        current_balance: current_balance(transactions),
        income: total_income(transactions),
        expenses: total_expenses(transactions),
        remaining_balance: remaining_balance(transactions),
    }
}

/// Look-back window for reports, relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    #[default]
    Month,
    Year,
    All,
}

impl Period {
    /// Earliest date kept by the window, or `None` for [`Period::All`].
    ///
    /// Month and year steps clamp to the end of a shorter month
    /// (2024-03-31 minus one month is 2024-02-29).
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::Week => today.checked_sub_days(Days::new(7)),
            Period::Month => today.checked_sub_months(Months::new(1)),
            Period::Year => today.checked_sub_months(Months::new(12)),
            Period::All => None,
        }
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.cutoff(today).map_or(true, |cutoff| date >= cutoff)
    }
}

/// Conjunction of the report filters. `None` means "do not filter".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub period: Period,
    pub group_type: Option<GroupType>,
    pub payment_method: Option<PaymentMethod>,
}

impl ReportFilter {
    pub fn matches(&self, transaction: &Transaction, today: NaiveDate) -> bool {
        self.period.contains(transaction.date, today)
            && self
                .group_type
                .map_or(true, |g| transaction.group_type == Some(g))
            && self
                .payment_method
                .map_or(true, |m| transaction.payment_method == Some(m))
    }

    /// Keep the matching transactions, preserving input order.
    pub fn apply(&self, transactions: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t, today))
            .cloned()
            .collect()
    }
}

pub fn report_summary(
    transactions: &[Transaction],
    filter: ReportFilter,
    today: NaiveDate,
) -> ReportSummary {
    let filtered = filter.apply(transactions, today);
    let income = total_income(&filtered);
    let expenses = total_expenses(&filtered);

    ReportSummary {
        period: filter.period,
        income,
        expenses,
        difference: income - expenses,
        group1_total: total_by_group(&filtered, GroupType::Group1),
        group2_total: total_by_group(&filtered, GroupType::Group2),
        nubank_expenses: total_by_payment_method_and_type(
            &filtered,
            PaymentMethod::Nubank,
            TransactionType::Expense,
        ),
        inter_expenses: total_by_payment_method_and_type(
            &filtered,
            PaymentMethod::Inter,
            TransactionType::Expense,
        ),
        transaction_count: filtered.len(),
        transactions: filtered,
    }
}
