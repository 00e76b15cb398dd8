//! Maps domain errors to HTTP status codes and a `{"error": "..."}` body.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use journal::StoreError;
use oneir::DreamError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Dream(#[from] DreamError),
    #[error(transparent)]
    Journal(#[from] StoreError),
    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Dream(DreamError::MissingInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Dream(DreamError::UpstreamStatus { .. })
            | ApiError::Dream(DreamError::UpstreamMalformed(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Dream(DreamError::UpstreamUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Journal(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Journal(StoreError::Invalid(_)) => StatusCode::BAD_REQUEST,
            ApiError::Journal(StoreError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
