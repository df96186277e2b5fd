//! HTTP error mapping

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::StoreError;

/// Error returned by the HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// Error from the task layer or the store
    Store(StoreError),

    /// The blocking store call never completed (panicked or was cancelled)
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

/// Unreadable request bodies are answered like any other validation failure
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Store(StoreError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Store(StoreError::Validation(message)) => {
                (StatusCode::BAD_REQUEST, Json(message)).into_response()
            }
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND.into_response(),
            ApiError::Store(err) => {
                tracing::error!("Request failed: {}", err);
                internal_error()
            }
            ApiError::Internal(reason) => {
                tracing::error!("Request failed: {}", reason);
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json("Internal server error"),
    )
        .into_response()
}
