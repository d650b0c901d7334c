//! Manual Trigger Route
//!
//! Runs the reply pipeline for a hand-written message, without going
//! through the platform. Useful to check credentials end to end.

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use chrono::Utc;

use crate::error::ApiError;
use crate::models::{DeliveryResponse, TestWebhookRequest, TestWebhookResponse};
use crate::routes::status::not_found;
use crate::AppState;

/// Simulate an inbound message
#[utoipa::path(
    post,
    path = "/test-webhook",
    request_body = TestWebhookRequest,
    responses(
        (status = 200, description = "Message processed", body = TestWebhookResponse),
        (status = 400, description = "Missing from or message"),
        (status = 500, description = "Reply pipeline failed")
    ),
    tag = "Webhook"
)]
pub async fn test_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TestWebhookResponse>, ApiError> {
    let request: TestWebhookRequest = if body.is_empty() {
        TestWebhookRequest::default()
    } else {
        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(|e| ApiError::Internal(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string()))?
    };

    tracing::info!(from = ?request.from, message = ?request.message, "🧪 Manual webhook test");

    let (from, message) = request.validate()?;
    let message_id = format!("test_{}", Utc::now().timestamp_millis());

    let outcome = state
        .reply_service
        .spawn_reply(from, Some(message), message_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "💥 Reply pipeline failed");
            ApiError::Pipeline(e.to_string())
        })?;

    Ok(Json(TestWebhookResponse {
        success: true,
        message: "Webhook procesado correctamente".to_string(),
        reply: outcome.reply,
        delivery: DeliveryResponse::from_domain(outcome.delivery),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/test-webhook", post(test_webhook).fallback(not_found))
}
