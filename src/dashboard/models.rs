use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::aggregation::{Period, ReportFilter};
use crate::transaction::models::{GroupType, PaymentMethod, Transaction};

/// Headline figures over the full transaction set. Unlike row payloads these
/// are plain JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Net of PAID/RECEIVED transactions
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 2813.38)]
    pub current_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 3273.35)]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 229.43)]
    pub expenses: Decimal,
    /// currentBalance + (income - expenses)
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub remaining_balance: Decimal,
}

/// Totals over the transactions matching a report filter
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub period: Period,
    pub income: Decimal,
    pub expenses: Decimal,
    /// income - expenses
    pub difference: Decimal,
    pub group1_total: Decimal,
    pub group2_total: Decimal,
    /// EXPENSE transactions paid with NUBANK
    pub nubank_expenses: Decimal,
    /// EXPENSE transactions paid with INTER
    pub inter_expenses: Decimal,
    pub transaction_count: usize,
    pub transactions: Vec<Transaction>,
}

/// Query parameters for GET /api/reports
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// week, month, year or all (defaults to month)
    pub period: Option<Period>,
    pub group_type: Option<GroupType>,
    pub payment_method: Option<PaymentMethod>,
}

impl From<ReportQuery> for ReportFilter {
    fn from(query: ReportQuery) -> Self {
        ReportFilter {
            period: query.period.unwrap_or_default(),
            group_type: query.group_type,
            payment_method: query.payment_method,
        }
    }
}
