//! Listing description generation and photo analysis through an external LLM.
//!
//! Every call first checks the response cache under a key derived from its
//! inputs; the LLM is only invoked on a miss. Cache failures are logged and
//! treated as misses (reads) or ignored (writes).

use crate::crypto::hashing::{cache_key, hash_bytes};
use crate::domain::property::PropertyRecord;
use crate::storage::ResponseCache;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, warn};
use utoipa::ToSchema;

const DESCRIPTION_PROMPT: &str = "Write a concise, appealing real-estate listing description \
(two short paragraphs) for the property below. Use only the facts given and do not invent features.";

const VISION_PROMPT: &str = "Analyze this property photo for a real-estate listing. Describe what \
the photo shows, notable features and finishes, apparent condition, and any visible issues a buyer \
should know about.";

/// An image to analyze: either a URL the model can fetch or inline base64 bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageInput {
    Url(String),
    Inline {
        data: String,
        media_type: String,
        /// Hex SHA-256 of the decoded bytes.
        digest: String,
    },
}

impl ImageInput {
    /// Validates `data` as standard base64 and records the digest of its bytes.
    pub fn inline(data: &str, media_type: &str) -> Result<Self, base64::DecodeError> {
        let data = data.trim();
        let bytes = BASE64.decode(data)?;
        Ok(ImageInput::Inline {
            data: data.to_string(),
            media_type: media_type.to_string(),
            digest: hash_bytes(&bytes),
        })
    }

    fn cache_inputs(&self) -> JsonValue {
        match self {
            ImageInput::Url(url) => json!({ "url": url }),
            ImageInput::Inline { digest, .. } => json!({ "sha256": digest }),
        }
    }
}

/// A single-turn request to the language model.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub prompt: String,
    pub image: Option<ImageInput>,
}

/// Opaque text-generation API.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, request: &LlmRequest) -> anyhow::Result<String>;
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    pub property_id: String,
    pub description: String,
    /// True when served from the response cache.
    pub cached: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisionAnalysis {
    pub analysis: String,
    pub cached: bool,
}

pub struct AiService {
    llm: Arc<dyn LanguageModel>,
    cache: Arc<dyn ResponseCache>,
}

impl AiService {
    pub fn new(llm: Arc<dyn LanguageModel>, cache: Arc<dyn ResponseCache>) -> Self {
        Self { llm, cache }
    }

    /// Generates (or recalls) a listing description for `record`.
    ///
    /// The key covers the whole record, so any change to the listing produces
    /// a fresh description.
    pub async fn describe(&self, record: &PropertyRecord) -> anyhow::Result<Description> {
        let key = cache_key("description", &serde_json::to_value(record)?);

        if let Some(text) = self.cached_text(&key, "description").await {
            return Ok(Description {
                property_id: record.id.clone(),
                description: text,
                cached: true,
            });
        }

        let request = LlmRequest {
            prompt: format!("{}\n\n{}", DESCRIPTION_PROMPT, listing_facts(record)),
            image: None,
        };
        let text = self.llm.complete(&request).await?;
        self.store(&key, json!({ "description": text })).await;

        Ok(Description {
            property_id: record.id.clone(),
            description: text,
            cached: false,
        })
    }

    /// Analyzes (or recalls the analysis of) a property photo.
    pub async fn analyze_image(&self, image: ImageInput) -> anyhow::Result<VisionAnalysis> {
        let key = cache_key("vision", &image.cache_inputs());

        if let Some(text) = self.cached_text(&key, "analysis").await {
            return Ok(VisionAnalysis {
                analysis: text,
                cached: true,
            });
        }

        let request = LlmRequest {
            prompt: VISION_PROMPT.to_string(),
            image: Some(image),
        };
        let text = self.llm.complete(&request).await?;
        self.store(&key, json!({ "analysis": text })).await;

        Ok(VisionAnalysis {
            analysis: text,
            cached: false,
        })
    }

    async fn cached_text(&self, key: &str, field: &str) -> Option<String> {
        match self.cache.get(key).await {
            Ok(Some(value)) => {
                let text = value.get(field).and_then(JsonValue::as_str).map(str::to_string);
                if text.is_some() {
                    debug!(%key, "ai cache hit");
                } else {
                    warn!(%key, "ai cache entry has unexpected shape, ignoring");
                }
                text
            }
            Ok(None) => None,
            Err(e) => {
                warn!(%key, error = %e, "ai cache read failed, treating as miss");
                None
            }
        }
    }

    async fn store(&self, key: &str, value: JsonValue) {
        if let Err(e) = self.cache.put(key, &value).await {
            warn!(%key, error = %e, "ai cache write failed");
        }
    }
}

/// Renders the facts of a listing as `Label: value` lines for the prompt.
pub fn listing_facts(record: &PropertyRecord) -> String {
    let mut out = String::new();
    if let Some(address) = &record.address {
        let _ = writeln!(out, "Address: {}", address);
    }
    if let Some(city) = &record.city {
        let _ = writeln!(out, "City: {}", city);
    }
    if let Some(property_type) = &record.property_type {
        let _ = writeln!(out, "Type: {}", property_type);
    }
    if let Some(price) = record.price {
        let _ = writeln!(out, "Price: ${:.0}", price);
    }
    if let Some(sale_date) = record.sale_date {
        let _ = writeln!(out, "Last sale: {}", sale_date);
    }
    for (key, value) in &record.metadata {
        match value {
            JsonValue::String(s) => {
                let _ = writeln!(out, "{}: {}", key, s);
            }
            JsonValue::Number(_) | JsonValue::Bool(_) => {
                let _ = writeln!(out, "{}: {}", key, value);
            }
            _ => {}
        }
    }
    out
}
