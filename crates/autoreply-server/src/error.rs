//! HTTP error mapping
//!
//! - 400: missing request fields, JSON body `{"error": ...}`
//! - 403: verification failures, empty body
//! - 404: unrecognized webhook object, empty body
//! - 500: malformed webhook notifications (plain text, for the platform),
//!   reply pipeline failures, and everything else (JSON with the
//!   underlying error text)

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use autoreply::DomainError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    /// Failure while processing a platform webhook delivery
    #[error("Webhook processing failed: {0}")]
    Webhook(String),

    /// Failure of the reply pipeline triggered by the manual test endpoint
    #[error("Error procesando webhook: {0}")]
    Pipeline(String),

    #[error("{0}")]
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ApiError::BadRequest(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": msg })),
            )
                .into_response(),
            ApiError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Webhook(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response()
            }
            ApiError::Pipeline(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": format!("Error procesando webhook: {msg}") })),
            )
                .into_response(),
            ApiError::Internal(msg) => internal_error(&msg),
        }
    }
}

/// 500 with the generic message plus the underlying error text
pub fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": INTERNAL_ERROR_MESSAGE,
            "message": message,
        })),
    )
        .into_response()
}

/// Terminal handler for panics escaping a request handler
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    tracing::error!(error = %message, "💥 Unhandled error");
    internal_error(&message)
}
