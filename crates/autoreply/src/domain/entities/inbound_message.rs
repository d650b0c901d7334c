//! Inbound Message Entity
//!
//! A single user-sent text event delivered by the platform webhook.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label used in logs when the webhook carries no contact profile for the sender.
pub const DEFAULT_CONTACT_NAME: &str = "Usuario";

/// A message received from the messaging platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Sender's platform identifier (phone number for WhatsApp)
    pub sender_id: String,
    /// Message text; absent for non-text messages (images, stickers, ...)
    pub body: Option<String>,
    /// Platform-specific message ID
    pub message_id: String,
    /// Epoch seconds as sent by the platform
    pub timestamp: String,
    /// Contact display name, when the payload carries one
    pub contact_name: Option<String>,
}

impl InboundMessage {
    /// Create a new inbound message without body or contact metadata
    pub fn new(sender_id: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            body: None,
            message_id: message_id.into(),
            timestamp: String::new(),
            contact_name: None,
        }
    }

    /// Set the message text
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the raw platform timestamp
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Set the contact display name
    pub fn with_contact_name(mut self, name: impl Into<String>) -> Self {
        self.contact_name = Some(name.into());
        self
    }

    /// Contact name for logging, falling back to [`DEFAULT_CONTACT_NAME`]
    pub fn display_name(&self) -> &str {
        self.contact_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CONTACT_NAME)
    }

    /// Parsed send time, if the platform timestamp is valid epoch seconds
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_defaults() {
        let msg = InboundMessage::new("573001234567", "wamid.1");
        assert_eq!(msg.display_name(), "Usuario");

        let named = msg.with_contact_name("Ana");
        assert_eq!(named.display_name(), "Ana");
    }

    #[test]
    fn test_sent_at() {
        let msg = InboundMessage::new("1", "wamid.1").with_timestamp("1700000000");
        assert_eq!(msg.sent_at().map(|t| t.timestamp()), Some(1_700_000_000));

        let bad = InboundMessage::new("1", "wamid.1").with_timestamp("yesterday");
        assert!(bad.sent_at().is_none());
    }
}
