use crate::app::{AiService, EnrichmentService};
use crate::domain::property::PropertyRecord;
use crate::domain::query::{QueryProcessor, SortOrder};
use crate::storage::RecordStore;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

/// Shared handler dependencies. Built once in `main` (or a test) and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub processor: QueryProcessor,
    /// `None` when no enrichment service is configured; `enrich=true` is then ignored.
    pub enrichment: Option<Arc<EnrichmentService>>,
    /// `None` when no model API is configured; AI endpoints answer 503.
    pub ai: Option<Arc<AiService>>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, processor: QueryProcessor) -> Self {
        Self {
            store,
            processor,
            enrichment: None,
            ai: None,
        }
    }

    pub fn with_enrichment(mut self, enrichment: Arc<EnrichmentService>) -> Self {
        self.enrichment = Some(enrichment);
        self
    }

    pub fn with_ai(mut self, ai: Arc<AiService>) -> Self {
        self.ai = Some(ai);
        self
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Payload of a successful search. Paging values are the effective ones
/// after defaulting, not the raw query string.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<PropertyRecord>,
    pub total_count: usize,
    pub limit: usize,
    pub offset: usize,
    pub sort_by: String,
    pub sort_order: SortOrder,
    /// True when the page was passed through the enrichment service.
    pub enriched: bool,
}

/// OpenAPI shape of a listing body. Handlers accept any extra keys as metadata.
#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    /// Required, non-empty. Integers are accepted and stored as strings.
    pub id: String,
    pub address: Option<String>,
    pub city: Option<String>,
    /// Non-negative.
    pub price: Option<f64>,
    pub property_type: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339.
    pub sale_date: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionRequest {
    #[serde(default)]
    pub property_id: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisionRequest {
    /// Publicly reachable image URL (http or https).
    #[serde(default)]
    pub image_url: Option<String>,
    /// Inline image bytes, standard base64.
    #[serde(default)]
    pub image_base64: Option<String>,
    /// Media type of `imageBase64`; defaults to `image/jpeg`.
    #[serde(default)]
    pub media_type: Option<String>,
}
