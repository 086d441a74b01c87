use anyhow::{anyhow, Context};
use property_search::infra::config::AppConfig;
use property_search::infra::logging;
use property_search::storage::{postgres, seed, PostgresRecordStore, RecordStore};
use std::time::Duration;
use tracing::{info, warn};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--seed <file.json>]\n\
         \n\
         Checks configuration and connectivity. Reads env vars:\n\
           DATABASE_URL (required for --seed), ENRICHMENT_API_URL, LLM_API_URL, LLM_API_KEY, LLM_MODEL\n\
         \n\
         --seed <file>  upserts a JSON array of property records into the PostgreSQL store\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let seed_path = match args.iter().position(|a| a == "--seed") {
        Some(i) => Some(args.get(i + 1).cloned().unwrap_or_else(|| usage_and_exit())),
        None => None,
    };

    // Force-read config (nice error messages if something is malformed)
    let config = AppConfig::from_env()?;
    info!("Preflight:");
    info!("  BIND_ADDR={}", config.bind_addr);
    info!("  FILTER_CASE_INSENSITIVE={}", config.filter_case_insensitive);
    info!("  HTTP_TIMEOUT_SECS={}", config.http_timeout.as_secs());

    // Record store
    match &config.database_url {
        Some(url) => {
            let pool = postgres::connect(url).await?;
            let store = PostgresRecordStore::new(pool).await?;
            store.health_check().await.context("PostgreSQL health check failed")?;
            let existing = store.scan().await?.len();
            info!("  PostgreSQL reachable, {} properties stored.", existing);

            if let Some(path) = &seed_path {
                let written = seed::seed_from_file(&store, path).await?;
                info!("  Seeded {} properties from {}.", written, path);
            }
        }
        None => {
            if seed_path.is_some() {
                return Err(anyhow!("--seed requires DATABASE_URL (the in-memory store lives only inside the server; use SEED_FILE there)"));
            }
            warn!("  DATABASE_URL not set: the server will use an in-memory store.");
        }
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    // Optional upstreams: any HTTP answer counts as reachable.
    if let Some(enrichment) = &config.enrichment {
        match client.get(&enrichment.api_url).send().await {
            Ok(resp) => info!("  Enrichment API reachable ({}), concurrency={}.", resp.status(), enrichment.concurrency),
            Err(e) => warn!("  Enrichment API unreachable: {}", e),
        }
    } else {
        info!("  Enrichment disabled.");
    }

    if let Some(llm) = &config.llm {
        match client.head(&llm.api_url).send().await {
            Ok(resp) => info!("  Model API reachable ({}), model={}.", resp.status(), llm.model),
            Err(e) => warn!("  Model API unreachable: {}", e),
        }
    } else {
        info!("  AI endpoints disabled.");
    }

    info!("Preflight OK.");
    Ok(())
}
