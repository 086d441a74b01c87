//! Augments listings with extra fields from a secondary property-data service.
//!
//! Records are processed in fixed-size groups. Every call in a group runs
//! concurrently and the group completes before the next one starts, so at
//! most `concurrency` calls are in flight. A failed call never aborts the
//! batch: that record comes back unenriched.

use crate::domain::property::PropertyRecord;
use async_trait::async_trait;
use futures_util::future::join_all;
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use tracing::{debug, warn};

/// Wire names that enrichment must never overwrite.
const NAMED_FIELDS: &[&str] = &["id", "address", "city", "price", "propertyType", "saleDate"];

/// Secondary data service queried per listing.
#[async_trait]
pub trait PropertyDataSource: Send + Sync {
    /// Returns extra fields (bedrooms, bathrooms, squareFeet, ...) for `record`.
    async fn fetch_details(&self, record: &PropertyRecord) -> anyhow::Result<Map<String, JsonValue>>;
}

pub struct EnrichmentService {
    source: Arc<dyn PropertyDataSource>,
    concurrency: usize,
}

impl EnrichmentService {
    /// `concurrency` is clamped to at least 1.
    pub fn new(source: Arc<dyn PropertyDataSource>, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Enriches `records`, returning new records in the same order.
    pub async fn enrich_all(&self, records: &[&PropertyRecord]) -> Vec<PropertyRecord> {
        let mut enriched = Vec::with_capacity(records.len());
        for (batch_no, batch) in records.chunks(self.concurrency).enumerate() {
            debug!(batch = batch_no, size = batch.len(), "enriching batch");
            let results = join_all(batch.iter().map(|record| self.enrich_one(record))).await;
            enriched.extend(results);
        }
        enriched
    }

    async fn enrich_one(&self, record: &PropertyRecord) -> PropertyRecord {
        match self.source.fetch_details(record).await {
            Ok(fields) => merge_details(record, fields),
            Err(e) => {
                warn!(property_id = %record.id, error = %e, "enrichment failed, returning unenriched record");
                record.clone()
            }
        }
    }
}

/// Copies `record` and adds `fields` to its metadata without replacing existing keys.
pub fn merge_details(record: &PropertyRecord, fields: Map<String, JsonValue>) -> PropertyRecord {
    let mut out = record.clone();
    for (key, value) in fields {
        if NAMED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        out.metadata.entry(key).or_insert(value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_keeps_existing_and_named_fields() {
        let record = PropertyRecord::new("p1")
            .with_city("Avon")
            .with_metadata("bedrooms", json!(3));
        let fields = json!({"bedrooms": 4, "bathrooms": 2, "city": "Elsewhere", "id": "x"});
        let JsonValue::Object(fields) = fields else {
            unreachable!()
        };

        let merged = merge_details(&record, fields);
        assert_eq!(merged.id, "p1");
        assert_eq!(merged.city.as_deref(), Some("Avon"));
        assert_eq!(merged.metadata.get("bedrooms"), Some(&json!(3)));
        assert_eq!(merged.metadata.get("bathrooms"), Some(&json!(2)));
        assert!(!merged.metadata.contains_key("city"));
        assert!(record.metadata.get("bathrooms").is_none());
    }

    #[test]
    fn test_concurrency_floor() {
        struct Nothing;
        #[async_trait]
        impl PropertyDataSource for Nothing {
            async fn fetch_details(&self, _record: &PropertyRecord) -> anyhow::Result<Map<String, JsonValue>> {
                Ok(Map::new())
            }
        }
        assert_eq!(EnrichmentService::new(Arc::new(Nothing), 0).concurrency(), 1);
    }
}
