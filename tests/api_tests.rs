use chrono::{Days, Utc};
use serde_json::{json, Value};

mod common;
use common::TestApp;

fn celpe() -> Value {
    json!({
        "description": "CELPE",
        "amount": 229.43,
        "type": "EXPENSE",
        "status": "PENDING",
        "groupType": "GROUP1",
        "paymentMethod": "NUBANK",
        "date": "2024-03-01"
    })
}

fn income(description: &str, amount: &str) -> Value {
    json!({
        "description": description,
        "amount": amount,
        "type": "INCOME",
        "groupType": "INCOME",
        "paymentMethod": "OTHER",
        "date": "2024-03-05"
    })
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status(), 200);
    let body = response.json();
    assert_eq!(body["status"], "healthy");
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn test_create_category_applies_default_color() {
    let app = TestApp::new();

    let response = app
        .post("/api/categories", &json!({"name": "Lazer", "type": "EXPENSE"}))
        .await;

    assert_eq!(response.status(), 201);
    let body = response.json();
    assert_eq!(body["name"], "Lazer");
    assert_eq!(body["type"], "EXPENSE");
    assert_eq!(body["color"], "#6b21a8");
    assert!(body["id"].as_i64().unwrap() > 0);
}

#[actix_rt::test]
async fn test_list_and_get_categories() {
    let app = TestApp::new();
    app.post(
        "/api/categories",
        &json!({"name": "Moradia", "type": "EXPENSE", "color": "#ef4444"}),
    )
    .await;
    let created = app
        .post(
            "/api/categories",
            &json!({"name": "Salário", "type": "INCOME", "color": "#4ade80"}),
        )
        .await
        .json();

    let list = app.get("/api/categories").await;
    assert_eq!(list.status(), 200);
    let body = list.json();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Moradia", "Salário"]);

    let fetched = app.get(&format!("/api/categories/{}", created["id"])).await;
    assert_eq!(fetched.status(), 200);
    assert_eq!(fetched.json(), created);
}

#[actix_rt::test]
async fn test_create_category_lists_every_invalid_field() {
    let app = TestApp::new();

    let response = app
        .post("/api/categories", &json!({"type": "SAVINGS", "color": "purple"}))
        .await;

    assert_eq!(response.status(), 400);
    let body = response.json();
    assert_eq!(body["error"], "VALIDATION_ERROR");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("name: is required"), "{message}");
    assert!(message.contains("type: must be one of EXPENSE, INCOME"), "{message}");
    assert!(message.contains("color: must be in #RRGGBB format"), "{message}");
}

#[actix_rt::test]
async fn test_get_unknown_category_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/api/categories/42").await;

    assert_eq!(response.status(), 404);
    assert_eq!(response.json()["error"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn test_create_account_with_defaults() {
    let app = TestApp::new();

    let response = app
        .post("/api/accounts", &json!({"name": "Carteira", "type": "CASH"}))
        .await;

    assert_eq!(response.status(), 201);
    let body = response.json();
    assert_eq!(body["type"], "CASH");
    assert_eq!(body["balance"], "0");
    assert_eq!(body["creditLimit"], "0");
    assert_eq!(body["isCredit"], false);
}

#[actix_rt::test]
async fn test_create_account_accepts_numeric_strings() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/accounts",
            &json!({
                "name": "Nubank",
                "type": "CREDIT_CARD",
                "balance": "0",
                "creditLimit": "2000",
                "isCredit": true
            }),
        )
        .await;

    assert_eq!(response.status(), 201);
    let body = response.json();
    assert_eq!(body["creditLimit"], "2000");
    assert_eq!(body["isCredit"], true);

    let fetched = app.get(&format!("/api/accounts/{}", body["id"])).await;
    assert_eq!(fetched.status(), 200);
    assert_eq!(fetched.json()["name"], "Nubank");
}

#[actix_rt::test]
async fn test_create_account_rejects_negative_credit_limit() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/accounts",
            &json!({"name": "Inter", "type": "CREDIT_CARD", "creditLimit": -1}),
        )
        .await;

    assert_eq!(response.status(), 400);
    assert!(response.json()["message"]
        .as_str()
        .unwrap()
        .contains("creditLimit"));
}

#[actix_rt::test]
async fn test_account_path_id_must_be_positive_integer() {
    let app = TestApp::new();

    for path in ["/api/accounts/abc", "/api/accounts/0", "/api/accounts/-3"] {
        let response = app.get(path).await;
        assert_eq!(response.status(), 400, "{path}");
        assert_eq!(response.json()["error"], "VALIDATION_ERROR");
    }
    assert_eq!(app.get("/api/accounts/7").await.status(), 404);
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn test_create_then_get_transaction() {
    let app = TestApp::new();

    let response = app.post("/api/transactions", &celpe()).await;
    assert_eq!(response.status(), 201);
    let created = response.json();
    assert_eq!(created["description"], "CELPE");
    assert_eq!(created["amount"], "229.43");
    assert_eq!(created["date"], "2024-03-01");
    assert_eq!(created["dueDate"], Value::Null);
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["groupType"], "GROUP1");
    assert_eq!(created["paymentMethod"], "NUBANK");
    assert!(created["createdAt"].is_string());

    let fetched = app.get(&format!("/api/transactions/{}", created["id"])).await;
    assert_eq!(fetched.status(), 200);
    assert_eq!(fetched.json(), created);
}

#[actix_rt::test]
async fn test_text_fields_are_stored_as_sent() {
    let app = TestApp::new();
    let mut payload = celpe();
    payload["description"] = json!("  CELPE  ");

    let response = app.post("/api/transactions", &payload).await;
    assert_eq!(response.status(), 201);
    let created = response.json();
    assert_eq!(created["description"], "  CELPE  ");

    let fetched = app.get(&format!("/api/transactions/{}", created["id"])).await;
    assert_eq!(fetched.json(), created);

    let category = app
        .post("/api/categories", &json!({"name": " Lazer ", "type": "EXPENSE"}))
        .await;
    assert_eq!(category.status(), 201);
    assert_eq!(category.json()["name"], " Lazer ");
}

#[actix_rt::test]
async fn test_create_transaction_defaults_status_to_pending() {
    let app = TestApp::new();
    let mut payload = celpe();
    payload.as_object_mut().unwrap().remove("status");

    let response = app.post("/api/transactions", &payload).await;

    assert_eq!(response.status(), 201);
    assert_eq!(response.json()["status"], "PENDING");
}

#[actix_rt::test]
async fn test_create_transaction_reports_all_missing_fields() {
    let app = TestApp::new();

    let response = app
        .post("/api/transactions", &json!({"groupType": "GROUP9"}))
        .await;

    assert_eq!(response.status(), 400);
    let message = response.json()["message"].as_str().unwrap().to_string();
    for field in ["description", "amount", "date", "type", "groupType"] {
        assert!(message.contains(&format!("{field}:")), "{field} missing in {message}");
    }
    assert!(app.get("/api/transactions").await.json().as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_create_transaction_with_unknown_category_is_rejected() {
    let app = TestApp::new();
    let mut payload = celpe();
    payload["categoryId"] = json!(999);

    let response = app.post("/api/transactions", &payload).await;

    assert_eq!(response.status(), 400);
    let body = response.json();
    assert_eq!(body["error"], "CONSTRAINT_VIOLATION");
    assert!(!body["message"].as_str().unwrap().contains("999"));
}

#[actix_rt::test]
async fn test_create_transaction_links_existing_references() {
    let app = TestApp::new();
    let category = app
        .post("/api/categories", &json!({"name": "Utilidades", "type": "EXPENSE"}))
        .await
        .json();
    let account = app
        .post("/api/accounts", &json!({"name": "Nubank", "type": "CREDIT_CARD"}))
        .await
        .json();
    let mut payload = celpe();
    payload["categoryId"] = category["id"].clone();
    payload["accountId"] = account["id"].clone();

    let response = app.post("/api/transactions", &payload).await;

    assert_eq!(response.status(), 201);
    let body = response.json();
    assert_eq!(body["categoryId"], category["id"]);
    assert_eq!(body["accountId"], account["id"]);
}

#[actix_rt::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = TestApp::new();

    let response = app.post_raw("/api/transactions", "{\"description\": ").await;

    assert_eq!(response.status(), 400);
    assert_eq!(response.json()["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_list_transactions_orders_by_date_ascending() {
    let app = TestApp::new();
    for (description, date) in [("c", "2024-03-20"), ("a", "2024-03-01"), ("b", "2024-03-01")] {
        let mut payload = celpe();
        payload["description"] = json!(description);
        payload["date"] = json!(date);
        app.create_transaction(&payload).await;
    }

    let response = app.get("/api/transactions").await;

    assert_eq!(response.status(), 200);
    let descriptions: Vec<String> = response
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["description"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(descriptions, ["a", "b", "c"]);
}

#[actix_rt::test]
async fn test_update_status() {
    let app = TestApp::new();
    let id = app.create_transaction(&celpe()).await;

    let response = app
        .patch(
            &format!("/api/transactions/{id}/status"),
            &json!({"status": "PAID"}),
        )
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.json()["status"], "PAID");
    assert_eq!(response.json()["description"], "CELPE");
}

#[actix_rt::test]
async fn test_update_status_validation_and_not_found() {
    let app = TestApp::new();
    let id = app.create_transaction(&celpe()).await;

    let invalid = app
        .patch(
            &format!("/api/transactions/{id}/status"),
            &json!({"status": "DONE"}),
        )
        .await;
    assert_eq!(invalid.status(), 400);

    let missing = app
        .patch(&format!("/api/transactions/{id}/status"), &json!({}))
        .await;
    assert_eq!(missing.status(), 400);

    let unknown = app
        .patch("/api/transactions/99999/status", &json!({"status": "PAID"}))
        .await;
    assert_eq!(unknown.status(), 404);
    assert_eq!(unknown.json()["message"], "Transaction not found");
}

#[actix_rt::test]
async fn test_partial_update_changes_only_given_fields() {
    let app = TestApp::new();
    let mut payload = celpe();
    payload["dueDate"] = json!("2024-03-10");
    let id = app.create_transaction(&payload).await;

    let response = app
        .patch(
            &format!("/api/transactions/{id}"),
            &json!({"amount": "250", "dueDate": null, "paymentMethod": "INTER"}),
        )
        .await;

    assert_eq!(response.status(), 200);
    let body = response.json();
    assert_eq!(body["amount"], "250");
    assert_eq!(body["dueDate"], Value::Null);
    assert_eq!(body["paymentMethod"], "INTER");
    assert_eq!(body["description"], "CELPE");
    assert_eq!(body["groupType"], "GROUP1");
}

#[actix_rt::test]
async fn test_empty_patch_returns_row_unchanged() {
    let app = TestApp::new();
    let id = app.create_transaction(&celpe()).await;
    let before = app.get(&format!("/api/transactions/{id}")).await.json();

    let response = app.patch(&format!("/api/transactions/{id}"), &json!({})).await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.json(), before);
}

#[actix_rt::test]
async fn test_patch_rejects_invalid_fields_and_unknown_ids() {
    let app = TestApp::new();
    let id = app.create_transaction(&celpe()).await;

    let invalid = app
        .patch(
            &format!("/api/transactions/{id}"),
            &json!({"amount": -5, "type": "TRANSFER"}),
        )
        .await;
    assert_eq!(invalid.status(), 400);
    let message = invalid.json()["message"].as_str().unwrap().to_string();
    assert!(message.contains("amount:") && message.contains("type:"), "{message}");

    let unknown = app
        .patch("/api/transactions/99999", &json!({"description": "x"}))
        .await;
    assert_eq!(unknown.status(), 404);
}

#[actix_rt::test]
async fn test_patch_unknown_id_wins_over_invalid_body() {
    let app = TestApp::new();

    let response = app
        .patch("/api/transactions/99999", &json!({"amount": "abc"}))
        .await;

    assert_eq!(response.status(), 404);
    assert_eq!(response.json()["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_delete_transaction_is_idempotent() {
    let app = TestApp::new();
    let id = app.create_transaction(&celpe()).await;

    let first = app.delete(&format!("/api/transactions/{id}")).await;
    assert_eq!(first.status(), 204);
    assert!(first.is_empty());

    let second = app.delete(&format!("/api/transactions/{id}")).await;
    assert_eq!(second.status(), 204);

    assert_eq!(app.get(&format!("/api/transactions/{id}")).await.status(), 404);
}

#[actix_rt::test]
async fn test_delete_unknown_id_leaves_state_unchanged() {
    let app = TestApp::new();
    app.create_transaction(&celpe()).await;
    let before = app.get("/api/transactions").await.json();

    let response = app.delete("/api/transactions/99999").await;

    assert_eq!(response.status(), 204);
    assert_eq!(app.get("/api/transactions").await.json(), before);
}

#[actix_rt::test]
async fn test_delete_with_invalid_id_is_bad_request() {
    let app = TestApp::new();

    let response = app.delete("/api/transactions/abc").await;

    assert_eq!(response.status(), 400);
}

// ---------------------------------------------------------------------------
// Dashboard and reports
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn test_dashboard_summary_on_empty_store() {
    let app = TestApp::new();

    let response = app.get("/api/dashboard/summary").await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.json(),
        json!({
            "currentBalance": 0.0,
            "income": 0.0,
            "expenses": 0.0,
            "remainingBalance": 0.0
        })
    );
}

#[actix_rt::test]
async fn test_pending_expense_then_paid_flow() {
    let app = TestApp::new();

    // Pending expense counts in expenses only
    let id = app.create_transaction(&celpe()).await;
    let summary = app.get("/api/dashboard/summary").await.json();
    assert!(summary["expenses"].is_number());
    assert_eq!(summary["expenses"], json!(229.43));
    assert_eq!(summary["currentBalance"], json!(0.0));
    assert_eq!(summary["remainingBalance"], json!(-229.43));

    // Once paid it also moves the balance; remaining counts it twice
    app.patch(
        &format!("/api/transactions/{id}/status"),
        &json!({"status": "PAID"}),
    )
    .await;
    let summary = app.get("/api/dashboard/summary").await.json();
    assert_eq!(summary["currentBalance"], json!(-229.43));
    assert_eq!(summary["expenses"], json!(229.43));
    assert_eq!(summary["remainingBalance"], json!(-458.86));
}

#[actix_rt::test]
async fn test_dashboard_income_total() {
    let app = TestApp::new();
    app.create_transaction(&income("JUDAS", "1473.35")).await;
    app.create_transaction(&income("RAFAELA", "1800.00")).await;

    let summary = app.get("/api/dashboard/summary").await.json();

    assert_eq!(summary["income"], json!(3273.35));
    assert_eq!(summary["currentBalance"], json!(0.0));
}

#[actix_rt::test]
async fn test_report_filters_by_payment_method() {
    let app = TestApp::new();
    let today = Utc::now().date_naive();
    for (amount, method) in [("100", "NUBANK"), ("200", "NUBANK"), ("50", "NUBANK"), ("500", "INTER")] {
        let mut payload = celpe();
        payload["amount"] = json!(amount);
        payload["paymentMethod"] = json!(method);
        payload["date"] = json!(today.to_string());
        app.create_transaction(&payload).await;
    }

    let response = app.get("/api/reports?paymentMethod=NUBANK").await;

    assert_eq!(response.status(), 200);
    let body = response.json();
    assert_eq!(body["period"], "month");
    assert_eq!(body["expenses"], "350");
    assert_eq!(body["nubankExpenses"], "350");
    assert_eq!(body["interExpenses"], "0");
    assert_eq!(body["transactionCount"], 3);
}

#[actix_rt::test]
async fn test_report_period_window() {
    let app = TestApp::new();
    let today = Utc::now().date_naive();
    let dates = [
        today,
        today.checked_sub_days(Days::new(7)).unwrap(),
        today.checked_sub_days(Days::new(8)).unwrap(),
        today.checked_sub_days(Days::new(400)).unwrap(),
    ];
    for date in dates {
        let mut payload = celpe();
        payload["amount"] = json!("10");
        payload["date"] = json!(date.to_string());
        app.create_transaction(&payload).await;
    }

    let week = app.get("/api/reports?period=week").await.json();
    assert_eq!(week["transactionCount"], 2);
    assert_eq!(week["expenses"], "20");

    let month = app.get("/api/reports").await.json();
    assert_eq!(month["transactionCount"], 3);

    let all = app.get("/api/reports?period=all&groupType=GROUP1").await.json();
    assert_eq!(all["transactionCount"], 4);
    assert_eq!(all["group1Total"], "40");
    assert_eq!(all["difference"], "-40");
}

#[actix_rt::test]
async fn test_report_rejects_unknown_filter_values() {
    let app = TestApp::new();

    let response = app.get("/api/reports?period=decade").await;
    assert_eq!(response.status(), 400);
    assert_eq!(response.json()["error"], "VALIDATION_ERROR");

    let response = app.get("/api/reports?groupType=GROUP3").await;
    assert_eq!(response.status(), 400);
}
