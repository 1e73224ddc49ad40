#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{test, web, App};
use serde_json::Value;

use financas_be::routes;
use financas_be::storage::{MemoryStorage, Storage};

/// Application under test, backed by a fresh in-memory store per instance.
pub struct TestApp {
    pub storage: Arc<MemoryStorage>,
}

pub struct TestResponse {
    status: u16,
    body: bytes::Bytes,
}

impl TestResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl TestApp {
    pub fn new() -> Self {
        TestApp {
            storage: Arc::new(MemoryStorage::new()),
        }
    }

    async fn send(&self, req: test::TestRequest) -> TestResponse {
        let storage: Arc<dyn Storage> = self.storage.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(storage))
                .configure(routes::configure),
        )
        .await;

        let resp = test::call_service(&app, req.to_request()).await;

        let status = resp.status().as_u16();
        let body = test::read_body(resp).await;

        TestResponse { status, body }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(test::TestRequest::get().uri(path))
            .await
    }

    pub async fn post(&self, path: &str, payload: &Value) -> TestResponse {
        self.send(
            test::TestRequest::post()
                .uri(path)
                .set_json(payload),
        )
        .await
    }

    /// POST a raw body with a JSON content type, for malformed payloads.
    pub async fn post_raw(&self, path: &str, body: &'static str) -> TestResponse {
        self.send(
            test::TestRequest::post()
                .uri(path)
                .insert_header(("content-type", "application/json"))
                .set_payload(body),
        )
        .await
    }

    pub async fn patch(&self, path: &str, payload: &Value) -> TestResponse {
        self.send(
            test::TestRequest::patch()
                .uri(path)
                .set_json(payload),
        )
        .await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.send(test::TestRequest::delete().uri(path))
            .await
    }

    /// Create a transaction through the API and return its id.
    pub async fn create_transaction(&self, payload: &Value) -> i64 {
        let response = self.post("/api/transactions", payload).await;
        assert_eq!(response.status(), 201, "create failed: {}", response.json());
        response.json()["id"].as_i64().expect("id missing")
    }
}
