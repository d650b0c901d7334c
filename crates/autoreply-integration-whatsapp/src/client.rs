//! WhatsApp Cloud API client

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use autoreply::OutboundResult;

use crate::config::WhatsAppConfig;
use crate::transport::{GraphTransport, ReqwestTransport, TransportError};

pub const MISSING_CREDENTIALS_ERROR: &str = "Credenciales de WhatsApp no configuradas";
pub const GENERIC_API_ERROR: &str = "Error de la API de WhatsApp";
const CONNECTION_ERROR_PREFIX: &str = "Error de conexión: ";

/// Characters of the reply shown in send logs
const LOG_PREVIEW_CHARS: usize = 100;

/// WhatsApp Cloud API client
pub struct WhatsAppClient {
    transport: Arc<dyn GraphTransport>,
    config: WhatsAppConfig,
}

#[derive(Debug, Default, Deserialize)]
struct SendResponse {
    #[serde(default)]
    messages: Vec<SentMessage>,
    error: Option<GraphError>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    id: Option<String>,
    wa_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: Option<String>,
    code: Option<i64>,
}

impl WhatsAppClient {
    /// Create a client backed by reqwest, using the configured timeout
    pub fn new(config: WhatsAppConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: WhatsAppConfig, transport: Arc<dyn GraphTransport>) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &WhatsAppConfig {
        &self.config
    }

    /// Keep only the digits of a phone number ("+57 300-123" -> "57300123")
    pub fn normalize_recipient(to: &str) -> String {
        to.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// Send a text message
    pub async fn send_text(&self, to: &str, body: &str) -> OutboundResult {
        let Some((token, phone_number_id)) = self.config.credentials() else {
            error!("❌ WhatsApp credentials missing, reply not sent");
            return OutboundResult::failed(MISSING_CREDENTIALS_ERROR);
        };

        let recipient = Self::normalize_recipient(to);
        let preview: String = body.chars().take(LOG_PREVIEW_CHARS).collect();
        info!(to = %recipient, preview = %preview, "📡 Sending WhatsApp message");

        let payload = serde_json::json!({
            "messaging_product": "whatsapp",
            "to": recipient,
            "type": "text",
            "text": { "body": body },
        });

        let url = self.config.messages_url(phone_number_id);
        let response = match self.transport.post_json(&url, token, &payload).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "💥 Failed to reach WhatsApp API");
                return OutboundResult::failed(format!("{CONNECTION_ERROR_PREFIX}{e}"));
            }
        };

        debug!(status = %response.status, body = %response.body, "📥 WhatsApp API response");

        let parsed: SendResponse =
            serde_json::from_value(response.body.clone()).unwrap_or_default();

        if response.is_success() {
            let first = parsed.messages.into_iter().next();
            let (message_id, whatsapp_id) = match first {
                Some(m) => (m.id, m.wa_id),
                None => (None, None),
            };
            OutboundResult::delivered(message_id, whatsapp_id)
        } else {
            let (message, code) = match parsed.error {
                Some(e) => (e.message, e.code),
                None => (None, None),
            };
            error!(
                status = %response.status,
                code = ?code,
                "❌ WhatsApp API rejected message"
            );
            OutboundResult::failed(message.unwrap_or_else(|| GENERIC_API_ERROR.to_string()))
                .with_code(code)
        }
    }
}
