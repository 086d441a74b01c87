//! Loads a JSON array of listings into a record store.

use crate::domain::property::PropertyRecord;
use crate::storage::RecordStore;
use anyhow::{anyhow, Context, Result};
use serde_json::Value as JsonValue;
use std::path::Path;

/// Parses a JSON array of flat property objects.
pub fn parse_seed(json: &str) -> Result<Vec<PropertyRecord>> {
    let values: Vec<JsonValue> = serde_json::from_str(json).context("seed must be a JSON array")?;
    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            serde_json::from_value::<PropertyRecord>(value)
                .map_err(|e| anyhow!("seed record #{} is invalid: {}", idx, e))
        })
        .collect()
}

/// Upserts every record from the file at `path`. Returns the number written.
pub async fn seed_from_file(store: &dyn RecordStore, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let records = parse_seed(&raw)?;
    let count = records.len();
    for record in records {
        store.put(record).await?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryRecordStore;

    #[test]
    fn test_parse_seed() {
        let records = parse_seed(
            r#"[{"id": "a", "city": "Avon", "price": 1}, {"id": "b", "bedrooms": 2}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].metadata["bedrooms"], 2);
    }

    #[test]
    fn test_parse_seed_reports_bad_record() {
        let err = parse_seed(r#"[{"id": "a"}, {"city": "no id"}]"#).unwrap_err();
        assert!(err.to_string().contains("#1"));
        assert!(parse_seed(r#"{"id": "a"}"#).is_err());
    }

    #[tokio::test]
    async fn test_seed_from_file() {
        let path = std::env::temp_dir().join(format!("property-seed-{}.json", std::process::id()));
        tokio::fs::write(&path, r#"[{"id": "x"}, {"id": "y"}, {"id": "x", "price": 5}]"#)
            .await
            .unwrap();
        let store = InMemoryRecordStore::new();
        let written = seed_from_file(&store, &path).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();

        assert_eq!(written, 3);
        assert_eq!(store.len().await, 2);
        assert_eq!(store.get("x").await.unwrap().unwrap().price, Some(5.0));
    }
}
