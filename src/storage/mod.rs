//! Record store and AI response cache collaborators.
//!
//! Both are narrow key/value surfaces: the search path only ever scans the
//! whole record set and filters in-process.

use crate::domain::property::PropertyRecord;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::{InMemoryRecordStore, InMemoryResponseCache};
pub use postgres::{PostgresRecordStore, PostgresResponseCache};

/// Source of property listings, keyed by `id`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns every record, ordered by ascending `id`.
    async fn scan(&self) -> anyhow::Result<Vec<PropertyRecord>>;

    /// Returns the record with the given id, if any.
    async fn get(&self, id: &str) -> anyhow::Result<Option<PropertyRecord>>;

    /// Inserts or replaces a record by id.
    async fn put(&self, record: PropertyRecord) -> anyhow::Result<()>;

    /// Cheap reachability probe used by `/health`.
    async fn health_check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Stores previously computed AI responses under derived keys.
///
/// A missing key is a cache-miss (`Ok(None)`), never an error. Entries do
/// not expire.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<JsonValue>>;

    async fn put(&self, key: &str, value: &JsonValue) -> anyhow::Result<()>;
}
