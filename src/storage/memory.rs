//! In-process implementations, used when no `DATABASE_URL` is configured and in tests.

use crate::domain::property::PropertyRecord;
use crate::storage::{RecordStore, ResponseCache};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<BTreeMap<String, PropertyRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `records`. Later duplicates of an id win.
    pub fn with_records(records: impl IntoIterator<Item = PropertyRecord>) -> Self {
        let map = records.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            records: RwLock::new(map),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn scan(&self) -> anyhow::Result<Vec<PropertyRecord>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> anyhow::Result<Option<PropertyRecord>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn put(&self, record: PropertyRecord) -> anyhow::Result<()> {
        self.records.write().await.insert(record.id.clone(), record);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryResponseCache {
    entries: RwLock<HashMap<String, JsonValue>>,
}

impl InMemoryResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ResponseCache for InMemoryResponseCache {
    async fn get(&self, key: &str) -> anyhow::Result<Option<JsonValue>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &JsonValue) -> anyhow::Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}
