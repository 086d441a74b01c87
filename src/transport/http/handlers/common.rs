use crate::domain::property::PropertyRecord;
use crate::transport::http::error::{ApiError, ApiResult};
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Wraps `data` in a successful envelope.
pub fn ok_json<T: Serialize>(data: &T) -> ApiResult<(StatusCode, Json<ApiResponse>)> {
    let value = serde_json::to_value(data).map_err(anyhow::Error::from)?;
    Ok((StatusCode::OK, Json(ApiResponse::ok(value))))
}

/// Reads a boolean query flag: `true`/`1`/`yes` (any case) are on, anything else off.
pub fn query_flag(query: &HashMap<String, String>, key: &str) -> bool {
    query
        .get(key)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

pub fn pk_json_to_string(pk: &JsonValue) -> Option<String> {
    if let Some(s) = pk.as_str() {
        return Some(s.trim().to_string()).filter(|s| !s.is_empty());
    }
    if let Some(i) = pk.as_i64() {
        return Some(i.to_string());
    }
    if let Some(u) = pk.as_u64() {
        return Some(u.to_string());
    }
    None
}

/// Validates a raw listing body and decodes it.
///
/// Requires an object with a non-empty `id` (string or integer). A present
/// `price` must be a non-negative number.
pub fn parse_record_payload(payload: JsonValue) -> ApiResult<PropertyRecord> {
    let JsonValue::Object(mut obj) = payload else {
        return Err(ApiError::Validation("Property must be a JSON object".to_string()));
    };

    let id = obj
        .get("id")
        .and_then(pk_json_to_string)
        .ok_or_else(|| ApiError::Validation("Missing required field 'id'".to_string()))?;
    obj.insert("id".to_string(), JsonValue::from(id));

    match obj.get("price") {
        None | Some(JsonValue::Null) => {}
        Some(JsonValue::Number(n)) if n.as_f64().map_or(false, |p| p >= 0.0) => {}
        Some(other) => {
            return Err(ApiError::Validation(format!(
                "Field 'price' must be a non-negative number, got {}",
                other
            )));
        }
    }

    serde_json::from_value(JsonValue::Object(obj))
        .map_err(|e| ApiError::Validation(format!("Invalid property: {}", e)))
}
