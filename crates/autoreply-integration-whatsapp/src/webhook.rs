//! WhatsApp webhook handling
//!
//! Verification handshake, payload signature check, and extraction of
//! inbound messages from `whatsapp_business_account` notifications.

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use tracing::{debug, warn};

use autoreply::{DomainError, InboundMessage};

type HmacSha256 = Hmac<Sha256>;

/// Top-level `object` value of WhatsApp Business notifications
pub const BUSINESS_ACCOUNT_OBJECT: &str = "whatsapp_business_account";
/// Header carrying the payload signature
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

const SUBSCRIBE_MODE: &str = "subscribe";
const MESSAGES_FIELD: &str = "messages";

/// WhatsApp webhook handler for incoming events
pub struct WhatsAppWebhookHandler {
    verify_token: String,
    /// App secret for signature verification (optional)
    app_secret: Option<String>,
}

impl WhatsAppWebhookHandler {
    /// Create a handler that accepts subscriptions carrying `verify_token`
    pub fn new(verify_token: impl Into<String>) -> Self {
        Self {
            verify_token: verify_token.into(),
            app_secret: None,
        }
    }

    /// Require `X-Hub-Signature-256` signed with this app secret
    pub fn with_app_secret(mut self, app_secret: impl Into<String>) -> Self {
        self.app_secret = Some(app_secret.into()).filter(|s: &String| !s.is_empty());
        self
    }

    pub fn signature_required(&self) -> bool {
        self.app_secret.is_some()
    }

    /// Answer the subscription handshake
    ///
    /// Returns the challenge to echo back, or `None` when the mode is not
    /// `subscribe` or the token does not match exactly.
    pub fn verify_subscription(
        &self,
        mode: Option<&str>,
        token: Option<&str>,
        challenge: Option<&str>,
    ) -> Option<String> {
        if mode == Some(SUBSCRIBE_MODE) && token == Some(self.verify_token.as_str()) {
            Some(challenge.unwrap_or_default().to_string())
        } else {
            None
        }
    }

    /// Check the `sha256=<hex>` signature of a raw payload
    ///
    /// Always passes when no app secret is configured.
    pub fn verify_signature(&self, signature: Option<&str>, body: &[u8]) -> bool {
        let Some(ref secret) = self.app_secret else {
            return true;
        };

        let Some(hex_digest) = signature.and_then(|s| s.strip_prefix("sha256=")) else {
            warn!("Webhook signature missing or malformed");
            return false;
        };

        let Ok(expected) = hex::decode(hex_digest) else {
            warn!("Webhook signature is not valid hex");
            return false;
        };

        let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
            return false;
        };
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }

    /// Extract inbound messages from a webhook notification
    ///
    /// Returns `Ok(None)` when the payload is not a WhatsApp Business
    /// notification. Missing `entry`, `changes`, `value` or `messages`
    /// simply yield no messages, as do fields of an unexpected type.
    /// Only `entry`, `changes`, `messages` or `contacts` present as
    /// something other than a list fail the whole notification.
    pub fn parse_messages(
        &self,
        payload: &Value,
    ) -> Result<Option<Vec<InboundMessage>>, DomainError> {
        let object = payload.get("object").and_then(Value::as_str);
        if object != Some(BUSINESS_ACCOUNT_OBJECT) {
            debug!(object = ?object, "Ignoring webhook for unknown object");
            return Ok(None);
        }

        let mut inbound = Vec::new();

        for entry in list_field(payload, "entry")? {
            for change in list_field(entry, "changes")? {
                if change.get("field").and_then(Value::as_str) != Some(MESSAGES_FIELD) {
                    continue;
                }
                let Some(value) = change.get("value") else {
                    continue;
                };
                let contacts = list_field(value, "contacts")?;

                for message in list_field(value, "messages")? {
                    let Some(sender_id) = string_field(message, "from").filter(|s| !s.is_empty())
                    else {
                        warn!(raw = %message, "Skipping message without sender");
                        continue;
                    };

                    let contact_name = contacts
                        .iter()
                        .find(|c| {
                            c.get("wa_id").and_then(Value::as_str) == Some(sender_id.as_str())
                        })
                        .and_then(|c| c.get("profile"))
                        .and_then(|p| p.get("name"))
                        .and_then(Value::as_str)
                        .map(str::to_string);

                    inbound.push(InboundMessage {
                        sender_id,
                        body: message
                            .get("text")
                            .and_then(|t| t.get("body"))
                            .and_then(Value::as_str)
                            .map(str::to_string),
                        message_id: string_field(message, "id").unwrap_or_default(),
                        timestamp: string_field(message, "timestamp").unwrap_or_default(),
                        contact_name,
                    });
                }
            }
        }

        Ok(Some(inbound))
    }
}

/// List under `key`; absent or null is an empty list
fn list_field<'a>(value: &'a Value, key: &str) -> Result<&'a [Value], DomainError> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(DomainError::validation(format!(
            "Invalid WhatsApp notification: `{key}` is not a list ({other})"
        ))),
    }
}

/// String or number under `key`, as text
fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
