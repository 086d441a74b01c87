// src/main.rs

use anyhow::Context;
use property_search::app::{AiService, EnrichmentService};
use property_search::domain::query::{QueryProcessor, TextMatch};
use property_search::infra::config::AppConfig;
use property_search::infra::llm::HttpLanguageModel;
use property_search::infra::logging;
use property_search::infra::property_data::HttpPropertyDataSource;
use property_search::storage::{
    postgres, seed, InMemoryRecordStore, InMemoryResponseCache, PostgresRecordStore,
    PostgresResponseCache, RecordStore, ResponseCache,
};
use property_search::transport;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let config = AppConfig::from_env()?;

    // --- Record store / response cache ---
    let (store, cache): (Arc<dyn RecordStore>, Arc<dyn ResponseCache>) = match &config.database_url {
        Some(url) => {
            info!("Connecting to PostgreSQL record store...");
            let pool = postgres::connect(url).await?;
            let store: Arc<dyn RecordStore> = Arc::new(PostgresRecordStore::new(pool.clone()).await?);
            let cache: Arc<dyn ResponseCache> = Arc::new(PostgresResponseCache::new(pool).await?);
            (store, cache)
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory record store and cache (lost on restart)");
            let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
            let cache: Arc<dyn ResponseCache> = Arc::new(InMemoryResponseCache::new());
            (store, cache)
        }
    };

    if let Some(path) = &config.seed_file {
        let written = seed::seed_from_file(store.as_ref(), path).await?;
        info!(records = written, file = %path, "Seeded record store");
    }

    // --- Query processing ---
    let text_match = if config.filter_case_insensitive {
        TextMatch::CaseInsensitive
    } else {
        TextMatch::Exact
    };
    let mut app_state = transport::http::AppState::new(store, QueryProcessor::new(text_match));
    info!(?text_match, "Query processor ready");

    // --- Optional collaborators ---
    match &config.enrichment {
        Some(enrichment) => {
            let source = HttpPropertyDataSource::new(&enrichment.api_url, config.http_timeout)?;
            app_state = app_state.with_enrichment(Arc::new(EnrichmentService::new(
                Arc::new(source),
                enrichment.concurrency,
            )));
            info!(concurrency = enrichment.concurrency, "Enrichment enabled");
        }
        None => info!("ENRICHMENT_API_URL not set, enrichment disabled"),
    }

    match &config.llm {
        Some(llm) => {
            let model = HttpLanguageModel::new(llm.clone(), config.http_timeout)?;
            app_state = app_state.with_ai(Arc::new(AiService::new(Arc::new(model), cache)));
            info!(model = %llm.model, "AI endpoints enabled");
        }
        None => info!("LLM_API_URL not set, AI endpoints will answer 503"),
    }

    // --- API Server ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("API server listening on http://{}", config.bind_addr);
    info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    info!("Graceful shutdown complete.");
    Ok(())
}
