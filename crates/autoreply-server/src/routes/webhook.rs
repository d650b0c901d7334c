//! Webhook Routes - WhatsApp platform callbacks
//!
//! - GET /webhook: subscription handshake
//! - POST /webhook: message notifications, acknowledged before replies are delivered

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    routing::get,
    Router,
};

use autoreply_integration_whatsapp::SIGNATURE_HEADER;

use crate::error::ApiError;
use crate::models::VerifyQuery;
use crate::routes::status::not_found;
use crate::AppState;

/// Verify webhook subscription
#[utoipa::path(
    get,
    path = "/webhook",
    params(
        ("hub.mode" = Option<String>, Query, description = "Must be \"subscribe\""),
        ("hub.verify_token" = Option<String>, Query, description = "Configured verify token"),
        ("hub.challenge" = Option<String>, Query, description = "Value echoed back on success")
    ),
    responses(
        (status = 200, description = "Challenge echoed", body = String, content_type = "text/plain"),
        (status = 403, description = "Verification failed")
    ),
    tag = "Webhook"
)]
pub async fn verify_webhook(
    State(state): State<AppState>,
    query: Result<Query<VerifyQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    let Query(query) = query.map_err(|e| {
        tracing::warn!(error = %e, "❌ Webhook verification query rejected");
        ApiError::Forbidden
    })?;

    tracing::info!(
        mode = ?query.mode,
        challenge = ?query.challenge,
        "🔍 Webhook verification received"
    );

    match state.webhook_handler.verify_subscription(
        query.mode.as_deref(),
        query.verify_token.as_deref(),
        query.challenge.as_deref(),
    ) {
        Some(challenge) => {
            tracing::info!("✅ Webhook verified");
            Ok(challenge)
        }
        None => {
            tracing::warn!(mode = ?query.mode, "❌ Webhook verification failed");
            Err(ApiError::Forbidden)
        }
    }
}

/// Receive WhatsApp notifications
#[utoipa::path(
    post,
    path = "/webhook",
    responses(
        (status = 200, description = "Notification accepted", body = String, content_type = "text/plain"),
        (status = 403, description = "Invalid payload signature"),
        (status = 404, description = "Not a WhatsApp Business notification"),
        (status = 500, description = "Notification could not be processed")
    ),
    tag = "Webhook"
)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    if !state.webhook_handler.verify_signature(signature, &body) {
        tracing::warn!("❌ Webhook signature rejected");
        return Err(ApiError::Forbidden);
    }

    let payload: serde_json::Value = if body.is_empty() {
        serde_json::Value::Object(Default::default())
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(error = %e, "💥 Webhook body is not valid JSON");
            ApiError::Internal(e.to_string())
        })?
    };

    tracing::debug!(payload = %payload, "📨 Webhook POST received");

    let messages = match state.webhook_handler.parse_messages(&payload) {
        Ok(Some(messages)) => messages,
        Ok(None) => {
            tracing::warn!(object = ?payload.get("object"), "❌ Unrecognized webhook object");
            return Err(ApiError::NotFound);
        }
        Err(e) => {
            tracing::error!(error = %e, "💥 Error processing webhook");
            return Err(ApiError::Webhook(e.to_string()));
        }
    };

    for message in messages {
        tracing::info!(
            from = %message.sender_id,
            contact = %message.display_name(),
            message_id = %message.message_id,
            timestamp = %message.timestamp,
            sent_at = ?message.sent_at(),
            text = ?message.body,
            "📱 Message received"
        );
        state.reply_service.dispatch(message);
    }

    Ok("OK")
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/webhook",
        get(verify_webhook)
            .post(receive_webhook)
            .fallback(not_found),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::test_support::{
        read_json, read_text, sign, test_app, test_app_over, test_app_with, test_config,
        wait_for_calls, BlockingTransport, HELLO_REPLY,
    };

    fn post(body: serde_json::Value) -> Request<Body> {
        Request::post("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_verification_echoes_challenge() {
        let (app, _) = test_app();
        let response = app
            .oneshot(
                Request::get(
                    "/webhook?hub.mode=subscribe&hub.verify_token=verify-me&hub.challenge=1158201444",
                )
                .body(Body::empty())
                .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_text(response).await, "1158201444");
    }

    #[tokio::test]
    async fn test_verification_rejects_wrong_token_or_mode() {
        for uri in [
            "/webhook?hub.mode=subscribe&hub.verify_token=VERIFY-ME&hub.challenge=1",
            "/webhook?hub.mode=unsubscribe&hub.verify_token=verify-me&hub.challenge=1",
            "/webhook?hub.challenge=1",
            "/webhook?hub.mode=subscribe&hub.verify_token=x&hub.verify_token=y&hub.challenge=1",
            "/webhook?hub.mode=subscribe&hub.verify_token=verify-me&hub.verify_token=verify-me&hub.challenge=1",
            "/webhook",
        ] {
            let (app, _) = test_app();
            let response = app
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
            assert_eq!(read_text(response).await, "", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_foreign_object_is_not_found() {
        let (app, transport) = test_app();
        let response = app
            .oneshot(post(serde_json::json!({ "object": "page", "entry": [] })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_entry_is_acknowledged() {
        let (app, transport) = test_app();
        let response = app
            .oneshot(post(serde_json::json!({ "object": "whatsapp_business_account" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_text(response).await, "OK");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_message_gets_auto_reply() {
        let (app, transport) = test_app();
        let response = app
            .oneshot(post(serde_json::json!({
                "object": "whatsapp_business_account",
                "entry": [{
                    "changes": [{
                        "field": "messages",
                        "value": {
                            "contacts": [{ "wa_id": "573001234567", "profile": { "name": "Ana" } }],
                            "messages": [{
                                "from": "573001234567",
                                "id": "wamid.IN",
                                "timestamp": "1700000000",
                                "text": { "body": "Hola, quiero una cita" }
                            }]
                        }
                    }]
                }]
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_text(response).await, "OK");

        wait_for_calls(&transport, 1).await;
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0]["to"], "573001234567");
        assert_eq!(calls[0]["text"]["body"], HELLO_REPLY);
    }

    #[tokio::test]
    async fn test_malformed_json_is_internal_error() {
        let (app, _) = test_app();
        let response = app
            .oneshot(
                Request::post("/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = read_json(response).await;
        assert_eq!(json["error"], "Error interno del servidor");
        assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn test_malformed_entry_is_internal_error() {
        let (app, _) = test_app();
        let response = app
            .oneshot(post(serde_json::json!({
                "object": "whatsapp_business_account",
                "entry": 42
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_text(response).await, "Error interno del servidor");
    }

    #[tokio::test]
    async fn test_mistyped_message_does_not_block_siblings() {
        let (app, transport) = test_app();
        let response = app
            .oneshot(post(serde_json::json!({
                "object": "whatsapp_business_account",
                "entry": [{
                    "changes": [{
                        "field": "messages",
                        "value": {
                            "messages": [
                                { "from": "573001111111", "id": "wamid.1", "text": "hola" },
                                { "from": "573002222222", "id": "wamid.2", "text": { "body": "hola" } }
                            ]
                        }
                    }]
                }]
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_text(response).await, "OK");

        wait_for_calls(&transport, 2).await;
        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        let reply_to = |to: &str| {
            calls
                .iter()
                .find(|c| c["to"] == to)
                .map(|c| c["text"]["body"].clone())
        };
        // Text of the wrong shape counts as no text
        assert_eq!(reply_to("573001111111"), Some(autoreply::DEFAULT_REPLY.into()));
        assert_eq!(reply_to("573002222222"), Some(HELLO_REPLY.into()));
    }

    #[tokio::test]
    async fn test_acknowledged_while_reply_pending() {
        let transport = Arc::new(BlockingTransport::default());
        let app = test_app_over(test_config(), transport.clone());

        let response = tokio::time::timeout(
            Duration::from_secs(2),
            app.oneshot(post(serde_json::json!({
                "object": "whatsapp_business_account",
                "entry": [{ "changes": [{
                    "field": "messages",
                    "value": { "messages": [{ "from": "573001234567", "text": { "body": "hola" } }] }
                }] }]
            }))),
        )
        .await
        .expect("webhook must answer before the send completes")
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_text(response).await, "OK");

        transport.started.notified().await;
        assert_eq!(transport.completed.load(Ordering::SeqCst), 0);

        transport.release.notify_one();
        for _ in 0..100 {
            if transport.completed.load(Ordering::SeqCst) == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(transport.completed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_signature_required_when_app_secret_set() {
        let mut config = test_config();
        config.whatsapp.app_secret = Some("app-secret".to_string());
        let body = serde_json::json!({ "object": "whatsapp_business_account" }).to_string();

        let (app, _) = test_app_with(config.clone());
        let unsigned = app
            .oneshot(
                Request::post("/webhook")
                    .body(Body::from(body.clone()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(unsigned.status(), StatusCode::FORBIDDEN);

        let (app, _) = test_app_with(config);
        let signed = app
            .oneshot(
                Request::post("/webhook")
                    .header("x-hub-signature-256", sign("app-secret", body.as_bytes()))
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(signed.status(), StatusCode::OK);
    }
}
