//! Centralized configuration (environment variables + defaults).
//!
//! Everything is read once at startup into [`AppConfig`] and handed to the
//! components that need it.

use anyhow::{anyhow, Context, Result};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_ENRICHMENT_CONCURRENCY: usize = 5;
const DEFAULT_LLM_MAX_TOKENS: u32 = 1024;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address for the API server.
    pub bind_addr: String,
    /// PostgreSQL URL. When absent the service runs on in-memory stores.
    pub database_url: Option<String>,
    /// JSON array of listings loaded into the store at startup.
    pub seed_file: Option<String>,
    /// Lower-case both sides of `city` / `propertyType` filters.
    pub filter_case_insensitive: bool,
    pub enrichment: Option<EnrichmentConfig>,
    pub llm: Option<LlmConfig>,
    pub http_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    pub api_url: String,
    /// Maximum number of enrichment calls in flight (always >= 1).
    pub concurrency: usize,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let enrichment = match get("ENRICHMENT_API_URL") {
            Some(api_url) => Some(EnrichmentConfig {
                api_url,
                concurrency: parse_or(
                    get("ENRICHMENT_CONCURRENCY"),
                    "ENRICHMENT_CONCURRENCY",
                    DEFAULT_ENRICHMENT_CONCURRENCY,
                )?
                .max(1),
            }),
            None => None,
        };

        let llm = match get("LLM_API_URL") {
            Some(api_url) => Some(LlmConfig {
                api_url,
                api_key: get("LLM_API_KEY")
                    .ok_or_else(|| anyhow!("LLM_API_KEY must be set when LLM_API_URL is set"))?,
                model: get("LLM_MODEL")
                    .ok_or_else(|| anyhow!("LLM_MODEL must be set when LLM_API_URL is set"))?,
                max_tokens: parse_or(get("LLM_MAX_TOKENS"), "LLM_MAX_TOKENS", DEFAULT_LLM_MAX_TOKENS)?,
            }),
            None => None,
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            database_url: get("DATABASE_URL"),
            seed_file: get("SEED_FILE"),
            filter_case_insensitive: parse_or(
                get("FILTER_CASE_INSENSITIVE"),
                "FILTER_CASE_INSENSITIVE",
                false,
            )?,
            enrichment,
            llm,
            http_timeout: Duration::from_secs(parse_or(
                get("HTTP_TIMEOUT_SECS"),
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value: {:?}", key, v)),
        None => Ok(default),
    }
}
