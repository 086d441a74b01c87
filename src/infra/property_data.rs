// Client for the secondary property-data service used by enrichment.

use crate::app::enrichment::PropertyDataSource;
use crate::domain::property::PropertyRecord;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::{Map, Value as JsonValue};
use std::time::Duration;

/// Fetches `GET {base}/properties/{id}`, expecting a JSON object of extra fields.
pub struct HttpPropertyDataSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpPropertyDataSource {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).with_context(|| format!("invalid ENRICHMENT_API_URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("ENRICHMENT_API_URL cannot be used as a base URL"));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Details URL for a listing id; the id is percent-encoded as a path segment.
    pub fn details_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("properties").push(id);
        }
        url
    }
}

#[async_trait]
impl PropertyDataSource for HttpPropertyDataSource {
    async fn fetch_details(&self, record: &PropertyRecord) -> anyhow::Result<Map<String, JsonValue>> {
        let body: JsonValue = self
            .client
            .get(self.details_url(&record.id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        match body {
            JsonValue::Object(fields) => Ok(fields),
            other => Err(anyhow!("expected a JSON object of property details, got {}", other)),
        }
    }
}
