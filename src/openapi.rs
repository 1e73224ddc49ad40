use utoipa::OpenApi;

use crate::account::models::{Account, NewAccount};
use crate::category::models::{Category, NewCategory};
use crate::dashboard::aggregation::Period;
use crate::dashboard::models::{DashboardSummary, ReportSummary};
use crate::errors::ErrorResponse;
use crate::transaction::models::{
    GroupType, NewTransaction, PaymentMethod, StatusUpdate, Transaction, TransactionStatus,
    TransactionType,
};

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Finanças API",
        version = "1.0.0",
        description = "REST API for personal income and expense tracking",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Categories", description = "Expense and income categories"),
        (name = "Accounts", description = "Bank accounts and credit cards"),
        (name = "Transactions", description = "Income and expense transactions"),
        (name = "Dashboard", description = "Balances, totals and period reports")
    ),
    paths(
        crate::routes::health_check,
        // Category endpoints
        crate::category::list_categories,
        crate::category::get_category,
        crate::category::create_category,
        // Account endpoints
        crate::account::list_accounts,
        crate::account::get_account,
        crate::account::create_account,
        // Transaction endpoints
        crate::transaction::list_transactions,
        crate::transaction::get_transaction,
        crate::transaction::create_transaction,
        crate::transaction::update_transaction_status,
        crate::transaction::update_transaction,
        crate::transaction::delete_transaction,
        // Dashboard endpoints
        crate::dashboard::get_summary,
        crate::dashboard::get_report,
    ),
    components(
        schemas(
            ErrorResponse,
            Category,
            NewCategory,
            Account,
            NewAccount,
            Transaction,
            NewTransaction,
            StatusUpdate,
            TransactionType,
            TransactionStatus,
            GroupType,
            PaymentMethod,
            DashboardSummary,
            ReportSummary,
            Period,
        )
    )
)]
pub struct ApiDoc;
