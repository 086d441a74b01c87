//! Handler error type and its mapping onto the `ApiResponse` envelope.

use crate::transport::http::types::ApiResponse;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

/// Body returned for every upstream failure; details only go to the log.
pub const GENERIC_ERROR: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The request body is not valid JSON for the endpoint.
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    NotFound(String),

    /// An optional collaborator is not configured.
    #[error("{0}")]
    Unavailable(String),

    /// Record store, data service or model API failed.
    #[error("upstream failure: {0:#}")]
    Upstream(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Upstream(e) => {
                error!(error = %format!("{:#}", e), "request failed upstream");
                GENERIC_ERROR.to_string()
            }
            other => {
                warn!(code = status.as_u16(), error = %other, "request rejected");
                other.to_string()
            }
        };
        (status, Json(ApiResponse::error(message))).into_response()
    }
}
