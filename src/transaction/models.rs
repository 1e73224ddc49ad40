use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::validation::{self, FieldRules, WireEnum};

/// Transaction type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money spent
    Expense,
    /// Money received
    Income,
}

impl WireEnum for TransactionType {
    const VARIANTS: &'static [Self] = &[TransactionType::Expense, TransactionType::Income];

    fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "EXPENSE",
            TransactionType::Income => "INCOME",
        }
    }
}

/// Settlement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Expected but not settled yet
    #[default]
    Pending,
    /// Expense that has been paid
    Paid,
    /// Income that has been received
    Received,
}

impl TransactionStatus {
    pub fn is_settled(&self) -> bool {
        matches!(self, TransactionStatus::Paid | TransactionStatus::Received)
    }
}

impl WireEnum for TransactionStatus {
    const VARIANTS: &'static [Self] = &[
        TransactionStatus::Pending,
        TransactionStatus::Paid,
        TransactionStatus::Received,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Paid => "PAID",
            TransactionStatus::Received => "RECEIVED",
        }
    }
}

/// Dashboard grouping bucket, independent of the transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupType {
    Group1,
    Group2,
    Income,
}

impl WireEnum for GroupType {
    const VARIANTS: &'static [Self] = &[GroupType::Group1, GroupType::Group2, GroupType::Income];

    fn as_str(&self) -> &'static str {
        match self {
            GroupType::Group1 => "GROUP1",
            GroupType::Group2 => "GROUP2",
            GroupType::Income => "INCOME",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Nubank,
    Inter,
    Cash,
    Other,
}

impl WireEnum for PaymentMethod {
    const VARIANTS: &'static [Self] = &[
        PaymentMethod::Nubank,
        PaymentMethod::Inter,
        PaymentMethod::Cash,
        PaymentMethod::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Nubank => "NUBANK",
            PaymentMethod::Inter => "INTER",
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Other => "OTHER",
        }
    }
}

/// A persisted transaction
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: i32,
    #[schema(example = "CELPE")]
    pub description: String,
    /// Always a non-negative magnitude; the sign comes from `type`
    #[schema(example = "229.43")]
    pub amount: Decimal,
    /// Date of the transaction
    pub date: NaiveDate,
    /// Due or settlement date
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub group_type: Option<GroupType>,
    pub payment_method: Option<PaymentMethod>,
    pub category_id: Option<i32>,
    pub account_id: Option<i32>,
    /// Server-assigned creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Signed contribution to a balance: `+amount` for income, `-amount` for expenses.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(transaction_type) = patch.transaction_type {
            self.transaction_type = transaction_type;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(group_type) = patch.group_type {
            self.group_type = group_type;
        }
        if let Some(payment_method) = patch.payment_method {
            self.payment_method = payment_method;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(account_id) = patch.account_id {
            self.account_id = account_id;
        }
    }
}

/// Database row for transactions; enum columns are stored as text
#[derive(Debug, Clone, FromRow)]
pub struct TransactionRow {
    pub id: i32,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub transaction_type: String,
    pub status: String,
    pub group_type: Option<String>,
    pub payment_method: Option<String>,
    pub category_id: Option<i32>,
    pub account_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl TransactionRow {
    /// Decode the text columns. Returns the name of the first column holding a
    /// value outside its domain.
    pub fn into_transaction(self) -> Result<Transaction, String> {
        fn decode<T: WireEnum>(column: &str, raw: &str) -> Result<T, String> {
            T::parse(raw).ok_or_else(|| format!("unexpected {column} value '{raw}'"))
        }

        Ok(Transaction {
            id: self.id,
            description: self.description,
            amount: self.amount,
            date: self.date,
            due_date: self.due_date,
            transaction_type: decode("type", &self.transaction_type)?,
            status: decode("status", &self.status)?,
            group_type: self
                .group_type
                .as_deref()
                .map(|raw| decode("group_type", raw))
                .transpose()?,
            payment_method: self
                .payment_method
                .as_deref()
                .map(|raw| decode("payment_method", raw))
                .transpose()?,
            category_id: self.category_id,
            account_id: self.account_id,
            created_at: self.created_at,
        })
    }
}

/// Insertable shape of a transaction (request body for creation)
#[derive(Debug, Clone, PartialEq, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct NewTransaction {
    /// Description (1-200 characters)
    #[schema(example = "CELPE")]
    pub description: String,
    /// Non-negative amount; numeric strings are accepted
    #[schema(example = "229.43")]
    pub amount: Decimal,
    #[schema(example = "2024-03-01")]
    pub date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    #[schema(rename = "type")]
    pub transaction_type: TransactionType,
    /// Defaults to PENDING
    #[schema(required = false)]
    pub status: TransactionStatus,
    pub group_type: Option<GroupType>,
    pub payment_method: Option<PaymentMethod>,
    pub category_id: Option<i32>,
    pub account_id: Option<i32>,
}

impl NewTransaction {
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut rules = FieldRules::new(body)?;

        let description = rules.required("description", validation::text(200));
        let amount = rules.required("amount", validation::non_negative_decimal);
        let date = rules.required("date", validation::date);
        let due_date = rules.optional("dueDate", validation::date);
        let transaction_type = rules.required("type", validation::one_of::<TransactionType>);
        let status = rules
            .optional("status", validation::one_of::<TransactionStatus>)
            .unwrap_or_default();
        let group_type = rules.optional("groupType", validation::one_of::<GroupType>);
        let payment_method = rules.optional("paymentMethod", validation::one_of::<PaymentMethod>);
        let category_id = rules.optional("categoryId", validation::record_id);
        let account_id = rules.optional("accountId", validation::record_id);

        match (description, amount, date, transaction_type) {
            (Some(description), Some(amount), Some(date), Some(transaction_type)) => {
                rules.finish().map(|()| Self {
                    description,
                    amount,
                    date,
                    due_date,
                    transaction_type,
                    status,
                    group_type,
                    payment_method,
                    category_id,
                    account_id,
                })
            }
            _ => Err(rules.into_errors()),
        }
    }

    /// Whether `groupType` breaks the convention that the INCOME bucket only
    /// holds INCOME transactions.
    pub fn breaks_income_group_convention(&self) -> bool {
        matches!(
            (self.group_type, self.transaction_type),
            (Some(GroupType::Income), TransactionType::Expense)
        )
    }
}

/// Partial update for a transaction. For nullable columns the outer `Option`
/// is "field present", the inner one is the new value (`None` clears it).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub due_date: Option<Option<NaiveDate>>,
    pub transaction_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub group_type: Option<Option<GroupType>>,
    pub payment_method: Option<Option<PaymentMethod>>,
    pub category_id: Option<Option<i32>>,
    pub account_id: Option<Option<i32>>,
}

impl TransactionPatch {
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut rules = FieldRules::new(body)?;

        let patch = Self {
            description: rules.optional("description", validation::text(200)),
            amount: rules.optional("amount", validation::non_negative_decimal),
            date: rules.optional("date", validation::date),
            due_date: rules.nullable("dueDate", validation::date),
            transaction_type: rules.optional("type", validation::one_of::<TransactionType>),
            status: rules.optional("status", validation::one_of::<TransactionStatus>),
            group_type: rules.nullable("groupType", validation::one_of::<GroupType>),
            payment_method: rules.nullable("paymentMethod", validation::one_of::<PaymentMethod>),
            category_id: rules.nullable("categoryId", validation::record_id),
            account_id: rules.nullable("accountId", validation::record_id),
        };

        rules.finish().map(|()| patch)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Request body for the status-only update
#[derive(Debug, Clone, Copy, ToSchema)]
pub struct StatusUpdate {
    pub status: TransactionStatus,
}

impl StatusUpdate {
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut rules = FieldRules::new(body)?;
        match rules.required("status", validation::one_of::<TransactionStatus>) {
            Some(status) => rules.finish().map(|()| Self { status }),
            None => Err(rules.into_errors()),
        }
    }
}
