//! HTTP-facing error type.
//!
//! Handlers return `Result<T, AppError>`; the error renders as a JSON body of
//! the form `{"detail": "..."}` with a matching status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::services::completion::CompletionError;

#[derive(Debug, Error)]
pub enum AppError {
    /// The caller sent a request the relay refuses to forward.
    #[error("{0}")]
    BadRequest(String),

    /// The language model call failed. The description goes back to the
    /// caller unchanged.
    #[error(transparent)]
    Upstream(#[from] CompletionError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();
        if status.is_server_error() {
            tracing::error!(error = %detail, "chat request failed upstream");
        } else {
            tracing::debug!(error = %detail, "rejected chat request");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
