//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use property_search::app::{LanguageModel, LlmRequest};
use property_search::domain::property::PropertyRecord;
use property_search::storage::RecordStore;
use property_search::transport;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Binds the router to an ephemeral port and returns its base URL.
pub async fn spawn_app(state: transport::http::AppState) -> String {
    let router = transport::http::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

/// The three listings used throughout the search scenarios.
pub fn hartford_avon() -> Vec<PropertyRecord> {
    vec![
        PropertyRecord::new("p1")
            .with_address("12 Elm St")
            .with_city("Hartford")
            .with_price(300000.0)
            .with_property_type("Residential"),
        PropertyRecord::new("p2")
            .with_address("4 Oak Ave")
            .with_city("Hartford")
            .with_price(150000.0)
            .with_property_type("Condo"),
        PropertyRecord::new("p3")
            .with_address("88 Lovely St")
            .with_city("Avon")
            .with_price(500000.0)
            .with_property_type("Residential"),
    ]
}

/// Records every request and answers with a numbered reply.
#[derive(Default)]
pub struct FakeModel {
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<LlmRequest>>,
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn complete(&self, request: &LlmRequest) -> anyhow::Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push(request.clone());
        Ok(format!("generated #{}", n))
    }
}

pub struct FailingModel;

#[async_trait]
impl LanguageModel for FailingModel {
    async fn complete(&self, _request: &LlmRequest) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("model API returned 529: secret-upstream-detail"))
    }
}

/// A store whose scan always fails.
pub struct BrokenStore;

#[async_trait]
impl RecordStore for BrokenStore {
    async fn scan(&self) -> anyhow::Result<Vec<PropertyRecord>> {
        Err(anyhow::anyhow!("connection refused: db.internal:5432"))
    }

    async fn get(&self, _id: &str) -> anyhow::Result<Option<PropertyRecord>> {
        Err(anyhow::anyhow!("connection refused: db.internal:5432"))
    }

    async fn put(&self, _record: PropertyRecord) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("connection refused: db.internal:5432"))
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("connection refused: db.internal:5432"))
    }
}
