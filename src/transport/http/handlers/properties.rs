use crate::domain::query::QueryParameters;
use crate::transport::http::error::{ApiError, ApiResult};
use crate::transport::http::handlers::common::{ok_json, parse_record_payload, query_flag};
use crate::transport::http::types::{ApiResponse, AppState, PropertyInput, SearchResponse};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tracing::{debug, info};

#[utoipa::path(
    get,
    path = "/api/properties",
    params(
        ("city" = Option<String>, Query, description = "Exact-match city filter"),
        ("minPrice" = Option<f64>, Query, description = "Inclusive lower price bound"),
        ("maxPrice" = Option<f64>, Query, description = "Inclusive upper price bound"),
        ("propertyType" = Option<String>, Query, description = "Exact-match property type filter (e.g. Condo)"),
        ("sortBy" = Option<String>, Query, description = "Field to sort by (default price)"),
        ("sortOrder" = Option<String>, Query, description = "asc (default) or desc"),
        ("limit" = Option<i64>, Query, description = "Page size; non-positive values fall back to 50"),
        ("offset" = Option<i64>, Query, description = "Records to skip; negative values fall back to 0"),
        ("enrich" = Option<bool>, Query, description = "Enrich the returned page from the property-data service")
    ),
    responses(
        (status = 200, description = "One page of matching properties", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn search_properties_handler(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query?;
    let params = QueryParameters::from_query(&query);

    let records = state.store.scan().await?;
    let page = state.processor.process(&records, &params);

    let (items, enriched) = match (&state.enrichment, query_flag(&query, "enrich")) {
        (Some(enrichment), true) => (enrichment.enrich_all(&page.items).await, true),
        (None, true) => {
            debug!("enrichment requested but not configured");
            (page.to_owned_items(), false)
        }
        (_, false) => (page.to_owned_items(), false),
    };

    info!(
        scanned = records.len(),
        total = page.total_count,
        returned = items.len(),
        sort_by = %params.sort_by,
        enriched,
        "property search"
    );

    ok_json(&SearchResponse {
        items,
        total_count: page.total_count,
        limit: params.effective_limit(),
        offset: params.effective_offset(),
        sort_by: params.sort_by.clone(),
        sort_order: params.sort_order,
        enriched,
    })
}

#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    params(
        ("id" = String, Path, description = "Property id")
    ),
    responses(
        (status = 200, description = "The property", body = ApiResponse),
        (status = 404, description = "No property with this id", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_property_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let record = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Property '{}' not found", id)))?;
    ok_json(&record)
}

#[utoipa::path(
    put,
    path = "/api/properties",
    request_body(content = PropertyInput, description = "Flat property record; `id` is required"),
    responses(
        (status = 200, description = "Property stored", body = ApiResponse),
        (status = 400, description = "Missing id or invalid field", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn put_property_handler(
    State(state): State<AppState>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = request?;
    let record = parse_record_payload(payload)?;
    state.store.put(record.clone()).await?;
    info!(property_id = %record.id, "property stored");
    ok_json(&record)
}
