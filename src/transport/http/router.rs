use crate::app::{Description, VisionAnalysis};
use crate::domain::query::SortOrder;
use crate::transport::http::handlers::{ai, health, properties};
use crate::transport::http::types::{
    ApiResponse, DescriptionRequest, PropertyInput, SearchResponse, VisionRequest,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        properties::search_properties_handler,
        properties::get_property_handler,
        properties::put_property_handler,
        ai::description_handler,
        ai::vision_handler
    ),
    components(schemas(
        ApiResponse,
        SearchResponse,
        PropertyInput,
        SortOrder,
        DescriptionRequest,
        VisionRequest,
        Description,
        VisionAnalysis
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/properties",
            get(properties::search_properties_handler).put(properties::put_property_handler),
        )
        .route("/api/properties/:id", get(properties::get_property_handler))
        .route("/api/ai/description", post(ai::description_handler))
        .route("/api/ai/vision", post(ai::vision_handler))
        .with_state(app_state)
}
