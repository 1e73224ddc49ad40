use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::validation::{self, FieldRules};

/// A persisted account
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account identifier
    pub id: i32,
    #[schema(example = "Nubank")]
    pub name: String,
    /// Free-form account type (e.g. CREDIT_CARD, CHECKING)
    #[serde(rename = "type")]
    #[schema(example = "CREDIT_CARD")]
    pub account_type: String,
    /// Current balance
    #[schema(example = "0.00")]
    pub balance: Decimal,
    /// Credit limit, meaningful only when `isCredit` is set
    #[schema(example = "2000.00")]
    pub credit_limit: Decimal,
    pub is_credit: bool,
}

/// Insertable shape of an account (request body for creation)
#[derive(Debug, Clone, PartialEq, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct NewAccount {
    /// Account name (1-50 characters)
    #[schema(example = "Conta Corrente")]
    pub name: String,
    #[schema(rename = "type", example = "CHECKING")]
    pub account_type: String,
    /// Initial balance (defaults to 0)
    #[schema(required = false, example = "3042.81")]
    pub balance: Decimal,
    /// Credit limit (defaults to 0)
    #[schema(required = false)]
    pub credit_limit: Decimal,
    /// Defaults to false
    #[schema(required = false)]
    pub is_credit: bool,
}

impl NewAccount {
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut rules = FieldRules::new(body)?;

        let name = rules.required("name", validation::text(50));
        let account_type = rules.required("type", validation::text(50));
        let balance = rules
            .optional("balance", validation::decimal)
            .unwrap_or(Decimal::ZERO);
        let credit_limit = rules
            .optional("creditLimit", validation::non_negative_decimal)
            .unwrap_or(Decimal::ZERO);
        let is_credit = rules
            .optional("isCredit", validation::boolean)
            .unwrap_or(false);

        match (name, account_type) {
            (Some(name), Some(account_type)) => rules.finish().map(|()| Self {
                name,
                account_type,
                balance,
                credit_limit,
                is_credit,
            }),
            _ => Err(rules.into_errors()),
        }
    }
}
