//! HTTP client for the external text/vision model.
//!
//! Speaks a messages-style JSON API: one user turn made of content blocks,
//! answered by a list of content blocks of which the `text` ones are kept.

use crate::app::ai_service::{ImageInput, LanguageModel, LlmRequest};
use crate::infra::config::LlmConfig;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;

pub struct HttpLanguageModel {
    client: reqwest::Client,
    config: LlmConfig,
}

impl HttpLanguageModel {
    pub fn new(config: LlmConfig, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }
}

/// Builds the request body sent to the model API.
pub fn request_body(model: &str, max_tokens: u32, request: &LlmRequest) -> JsonValue {
    let mut content = Vec::new();
    match &request.image {
        Some(ImageInput::Url(url)) => content.push(json!({
            "type": "image",
            "source": { "type": "url", "url": url }
        })),
        Some(ImageInput::Inline { data, media_type, .. }) => content.push(json!({
            "type": "image",
            "source": { "type": "base64", "media_type": media_type, "data": data }
        })),
        None => {}
    }
    content.push(json!({ "type": "text", "text": request.prompt }));

    json!({
        "model": model,
        "max_tokens": max_tokens,
        "messages": [{ "role": "user", "content": content }]
    })
}

/// Concatenates the `text` blocks of a model response.
pub fn response_text(body: &JsonValue) -> anyhow::Result<String> {
    let blocks = body
        .get("content")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| anyhow!("model response has no content array"))?;
    let text: String = blocks
        .iter()
        .filter_map(|b| b.get("text").and_then(JsonValue::as_str))
        .collect::<Vec<_>>()
        .join("\n");
    if text.trim().is_empty() {
        return Err(anyhow!("model response contained no text"));
    }
    Ok(text)
}

#[async_trait]
impl LanguageModel for HttpLanguageModel {
    async fn complete(&self, request: &LlmRequest) -> anyhow::Result<String> {
        let body = request_body(&self.config.model, self.config.max_tokens, request);
        let resp = self
            .client
            .post(&self.config.api_url)
            .header("x-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .context("model API request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(anyhow!("model API returned {}: {}", status, detail));
        }

        let body: JsonValue = resp.json().await.context("model API returned invalid JSON")?;
        response_text(&body)
    }
}
