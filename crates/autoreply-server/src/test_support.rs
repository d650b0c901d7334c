//! Shared helpers for router tests
//!
//! Builds the full router over an in-memory Graph transport, so outbound
//! sends are recorded instead of hitting the network.

use async_trait::async_trait;
use axum::response::Response;
use axum::Router;
use hmac::{Hmac, Mac};
use http_body_util::BodyExt;
use sha2::Sha256;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use autoreply_integration_whatsapp::{
    GraphTransport, TransportError, TransportResponse, WhatsAppClient, WhatsAppMessenger,
};

use crate::config::ServerConfig;
use crate::{app, AppState};

pub const HELLO_REPLY: &str = "¡Hola! 👋 Gracias por contactarnos. ¿En qué podemos ayudarte?";

/// Transport answering every send with a fixed platform success
#[derive(Default)]
pub struct FakeTransport {
    calls: Mutex<Vec<serde_json::Value>>,
}

impl FakeTransport {
    pub fn calls(&self) -> Vec<serde_json::Value> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GraphTransport for FakeTransport {
    async fn post_json(
        &self,
        _url: &str,
        _bearer_token: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(body.clone());
        Ok(TransportResponse::new(
            200,
            serde_json::json!({
                "messages": [{ "id": "wamid.X", "wa_id": "573001234567" }]
            }),
        ))
    }
}

/// Transport that holds every send until `release` is notified
#[derive(Default)]
pub struct BlockingTransport {
    pub started: Notify,
    pub release: Notify,
    pub completed: AtomicUsize,
}

#[async_trait]
impl GraphTransport for BlockingTransport {
    async fn post_json(
        &self,
        _url: &str,
        _bearer_token: &str,
        _body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError> {
        self.started.notify_one();
        self.release.notified().await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(TransportResponse::new(200, serde_json::json!({})))
    }
}

/// Transport whose sends blow up inside the reply task
pub struct PanickingTransport;

#[async_trait]
impl GraphTransport for PanickingTransport {
    async fn post_json(
        &self,
        _url: &str,
        _bearer_token: &str,
        _body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError> {
        panic!("graph transport exploded");
    }
}

/// Configuration with credentials and a known verify token
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|name| match name {
        "WEBHOOK_VERIFY_TOKEN" => Some("verify-me".to_string()),
        "WHATSAPP_TOKEN" => Some("test-token".to_string()),
        "WHATSAPP_PHONE_ID" => Some("1234567890".to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn test_app() -> (Router, Arc<FakeTransport>) {
    test_app_with(test_config())
}

pub fn test_app_with(config: ServerConfig) -> (Router, Arc<FakeTransport>) {
    let transport = Arc::new(FakeTransport::default());
    (test_app_over(config, transport.clone()), transport)
}

pub fn test_app_over(config: ServerConfig, transport: Arc<dyn GraphTransport>) -> Router {
    let client = WhatsAppClient::with_transport(config.whatsapp.clone(), transport);
    app(AppState::new(config, WhatsAppMessenger::from_client(client)))
}

/// Wait for background replies to reach the transport
pub async fn wait_for_calls(transport: &FakeTransport, expected: usize) {
    for _ in 0..100 {
        if transport.call_count() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

pub async fn read_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `X-Hub-Signature-256` value for a body
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}
