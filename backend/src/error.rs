//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting workflow errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diacheck_shared::CheckError;
use serde::Serialize;
use thiserror::Error;

/// API error type that can be converted to HTTP responses
///
/// Startup failures use `anyhow`; once serving, every failure is a
/// [`CheckError`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// A risk check failed; the message is already user-facing
    #[error(transparent)]
    Check(#[from] CheckError),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        let ApiError::Check(err) = self;
        match err {
            CheckError::ServerError(_) => StatusCode::BAD_GATEWAY,
            CheckError::ConnectionError | CheckError::InvalidResponse => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let ApiError::Check(err) = &self;
        let detail = ErrorDetail {
            code: err.code().to_string(),
            message: err.to_string(),
            field: err.field().filter(|f| !f.is_empty()).map(str::to_string),
        };

        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
