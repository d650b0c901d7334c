//! Outbound Result Entity
//!
//! Outcome of one attempt to send a reply through the platform's send API.

use serde::{Deserialize, Serialize};

/// Structured success/failure of an outbound send
///
/// Sending never fails with an `Err`; every failure mode
/// (missing credentials, API error, transport error) is carried here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResult {
    pub success: bool,
    /// Platform-assigned message ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Platform-assigned recipient ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Platform error code, when the API reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

impl OutboundResult {
    /// Successful delivery
    pub fn delivered(message_id: Option<String>, whatsapp_id: Option<String>) -> Self {
        Self {
            success: true,
            message_id,
            whatsapp_id,
            ..Default::default()
        }
    }

    /// Failed delivery
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Attach the platform error code
    pub fn with_code(mut self, code: Option<i64>) -> Self {
        self.code = code;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let result = OutboundResult::delivered(Some("wamid.X".into()), Some("57300".into()));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "messageId": "wamid.X",
                "whatsappId": "57300"
            })
        );
    }

    #[test]
    fn test_failed_with_code() {
        let result = OutboundResult::failed("Invalid token").with_code(Some(190));
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Invalid token"));
        assert_eq!(result.code, Some(190));
        assert!(result.message_id.is_none());
    }
}
