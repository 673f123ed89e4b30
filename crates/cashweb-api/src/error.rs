//! Error types for cashweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cashweb_core::{CoreError, ErrorCode, ErrorDetails};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Bad request: {message}")]
    BadRequest { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(CoreError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Core(CoreError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Core(CoreError::ConfigError { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Core(_) => StatusCode::BAD_GATEWAY,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn details(&self) -> ErrorDetails {
        match self {
            ApiError::Core(error) => error.to_details(),
            ApiError::BadRequest { message } => ErrorDetails::new(ErrorCode::ValidationError, message.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": self.details(),
        });
        (self.status(), Json(body)).into_response()
    }
}
