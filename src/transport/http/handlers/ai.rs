use crate::app::{AiService, ImageInput};
use crate::transport::http::error::{ApiError, ApiResult};
use crate::transport::http::handlers::common::ok_json;
use crate::transport::http::types::{ApiResponse, AppState, DescriptionRequest, VisionRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::Url;
use std::sync::Arc;
use tracing::info;

const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

fn ai_service(state: &AppState) -> ApiResult<Arc<AiService>> {
    state
        .ai
        .clone()
        .ok_or_else(|| ApiError::Unavailable("AI service is not configured".to_string()))
}

#[utoipa::path(
    post,
    path = "/api/ai/description",
    request_body = DescriptionRequest,
    responses(
        (status = 200, description = "Generated or cached description", body = ApiResponse),
        (status = 400, description = "Missing propertyId", body = ApiResponse),
        (status = 404, description = "No property with this id", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse),
        (status = 503, description = "AI service not configured", body = ApiResponse)
    )
)]
pub async fn description_handler(
    State(state): State<AppState>,
    request: Result<Json<DescriptionRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = request?;
    let property_id = request
        .property_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("Missing required field 'propertyId'".to_string()))?;
    let ai = ai_service(&state)?;

    let record = state
        .store
        .get(&property_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Property '{}' not found", property_id)))?;

    let description = ai.describe(&record).await?;
    info!(property_id = %property_id, cached = description.cached, "description served");
    ok_json(&description)
}

#[utoipa::path(
    post,
    path = "/api/ai/vision",
    request_body = VisionRequest,
    responses(
        (status = 200, description = "Generated or cached photo analysis", body = ApiResponse),
        (status = 400, description = "Missing or invalid image", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse),
        (status = 503, description = "AI service not configured", body = ApiResponse)
    )
)]
pub async fn vision_handler(
    State(state): State<AppState>,
    request: Result<Json<VisionRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = request?;
    let image = parse_image(request)?;
    let ai = ai_service(&state)?;

    let analysis = ai.analyze_image(image).await?;
    info!(cached = analysis.cached, "vision analysis served");
    ok_json(&analysis)
}

/// Exactly one of `imageUrl` / `imageBase64` must be given.
pub fn parse_image(request: VisionRequest) -> ApiResult<ImageInput> {
    let url = request.image_url.filter(|s| !s.trim().is_empty());
    let data = request.image_base64.filter(|s| !s.trim().is_empty());

    match (url, data) {
        (Some(url), None) => {
            let parsed = Url::parse(url.trim())
                .map_err(|e| ApiError::Validation(format!("Invalid imageUrl: {}", e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ApiError::Validation("imageUrl must be http or https".to_string()));
            }
            Ok(ImageInput::Url(parsed.to_string()))
        }
        (None, Some(data)) => {
            let media_type = request
                .media_type
                .filter(|m| m.starts_with("image/"))
                .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string());
            ImageInput::inline(&data, &media_type)
                .map_err(|e| ApiError::Validation(format!("Invalid imageBase64: {}", e)))
        }
        (Some(_), Some(_)) => Err(ApiError::Validation(
            "Provide either imageUrl or imageBase64, not both".to_string(),
        )),
        (None, None) => Err(ApiError::Validation(
            "Missing required field 'imageUrl' or 'imageBase64'".to_string(),
        )),
    }
}
