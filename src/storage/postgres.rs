//! Persistent record store and response cache using PostgreSQL.
//!
//! Each listing is stored whole as JSONB under its id; filtering happens in
//! process, so the table needs no columns beyond the key.

use crate::domain::property::PropertyRecord;
use crate::storage::{RecordStore, ResponseCache};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

/// Opens a connection pool against `database_url`.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .context("failed to connect to DATABASE_URL")?;
    Ok(pool)
}

#[derive(Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Wraps `pool` and creates the `properties` table if it does not exist.
    pub async fn new(pool: PgPool) -> Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS properties (
                id TEXT PRIMARY KEY,
                record JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn scan(&self) -> Result<Vec<PropertyRecord>> {
        let rows = sqlx::query("SELECT id, record FROM properties ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("id")?;
            let record: JsonValue = row.try_get("record")?;
            let record: PropertyRecord = serde_json::from_value(record)
                .with_context(|| format!("stored property '{}' is not a valid record", id))?;
            records.push(record);
        }
        Ok(records)
    }

    async fn get(&self, id: &str) -> Result<Option<PropertyRecord>> {
        let row = sqlx::query("SELECT record FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => {
                let record: JsonValue = row.try_get("record")?;
                Ok(Some(serde_json::from_value(record)?))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, record: PropertyRecord) -> Result<()> {
        let body = serde_json::to_value(&record)?;
        sqlx::query(
            "INSERT INTO properties (id, record) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET record = $2, updated_at = now()",
        )
        .bind(&record.id)
        .bind(body)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PostgresResponseCache {
    pool: PgPool,
}

impl PostgresResponseCache {
    /// Wraps `pool` and creates the `ai_response_cache` table if it does not exist.
    pub async fn new(pool: PgPool) -> Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS ai_response_cache (
                cache_key TEXT PRIMARY KEY,
                response JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl ResponseCache for PostgresResponseCache {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>> {
        let row = sqlx::query("SELECT response FROM ai_response_cache WHERE cache_key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(row.try_get("response")?)),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &JsonValue) -> Result<()> {
        sqlx::query(
            "INSERT INTO ai_response_cache (cache_key, response) VALUES ($1, $2)
             ON CONFLICT (cache_key) DO UPDATE SET response = $2, created_at = now()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
