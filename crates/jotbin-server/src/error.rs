//! Handler error types.
//!
//! No handler catches store failures; every error here surfaces as a
//! failure of the whole invocation. At the HTTP boundary that failure is
//! deliberately undifferentiated: a 500 with a plain-text message, no
//! structured error body, and no distinction between caller error and
//! backend failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use jotbin_store::StoreError;

/// Errors a handler invocation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Store-adapter failure, propagated as-is.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Request body or response payload failed to (de)serialize.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The matched route requires a path parameter the envelope lacks.
    #[error("missing path parameter: {0}")]
    MissingPathParam(&'static str),

    /// A path parameter that must reconstruct a typed identifier did not
    /// parse as one.
    #[error("invalid path parameter {name}: {source}")]
    InvalidPathParam {
        name: &'static str,
        source: uuid::Error,
    },

    /// The matched route requires a query parameter the envelope lacks.
    #[error("missing query parameter: {0}")]
    MissingQueryParam(&'static str),

    /// The matched route requires a request body the envelope lacks.
    #[error("missing request body")]
    MissingBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Result type for handler invocations.
pub type ApiResult<T> = Result<T, ApiError>;
