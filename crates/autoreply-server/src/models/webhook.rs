//! Webhook DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use autoreply::{DomainError, OutboundResult};

pub const MISSING_PARAMS_ERROR: &str = "Faltan parámetros: from y message son requeridos";

/// Subscription handshake query (`hub.*` parameters)
#[derive(Debug, Default, Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Request to simulate an inbound message
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TestWebhookRequest {
    /// Sender phone number
    pub from: Option<String>,
    /// Message text
    pub message: Option<String>,
}

impl TestWebhookRequest {
    /// Both fields are required and non-empty
    pub fn validate(self) -> Result<(String, String), DomainError> {
        match (self.from, self.message) {
            (Some(from), Some(message)) if !from.is_empty() && !message.is_empty() => {
                Ok((from, message))
            }
            _ => Err(DomainError::validation(MISSING_PARAMS_ERROR)),
        }
    }
}

/// Manual trigger response
#[derive(Debug, Serialize, ToSchema)]
pub struct TestWebhookResponse {
    pub success: bool,
    pub message: String,
    /// Reply selected for the message
    pub reply: String,
    pub delivery: DeliveryResponse,
}

/// Outcome of the outbound send
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

impl DeliveryResponse {
    pub fn from_domain(result: OutboundResult) -> Self {
        Self {
            success: result.success,
            message_id: result.message_id,
            whatsapp_id: result.whatsapp_id,
            error: result.error,
            code: result.code,
        }
    }
}
