//! OutboundMessenger implementation for WhatsApp

use async_trait::async_trait;

use autoreply::{OutboundMessenger, OutboundResult};

use crate::client::WhatsAppClient;
use crate::config::WhatsAppConfig;
use crate::transport::TransportError;

/// WhatsApp messenger implementing the OutboundMessenger port
pub struct WhatsAppMessenger {
    client: WhatsAppClient,
}

impl WhatsAppMessenger {
    /// Create a messenger backed by the reqwest transport
    pub fn new(config: WhatsAppConfig) -> Result<Self, TransportError> {
        Ok(Self::from_client(WhatsAppClient::new(config)?))
    }

    pub fn from_client(client: WhatsAppClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OutboundMessenger for WhatsAppMessenger {
    async fn send_text(&self, to: &str, body: &str) -> OutboundResult {
        self.client.send_text(to, body).await
    }

    fn name(&self) -> &str {
        "whatsapp"
    }

    fn is_configured(&self) -> bool {
        self.client.config().credentials().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::RecordingTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_messenger_delegates_to_client() {
        let transport = Arc::new(RecordingTransport::new(
            200,
            serde_json::json!({ "messages": [{ "id": "wamid.Z" }] }),
        ));
        let client =
            WhatsAppClient::with_transport(WhatsAppConfig::new("token", "1"), transport.clone());
        let messenger = WhatsAppMessenger::from_client(client);

        assert_eq!(messenger.name(), "whatsapp");
        assert!(messenger.is_configured());

        let result = messenger.send_text("573001234567", "hola").await;
        assert_eq!(result.message_id.as_deref(), Some("wamid.Z"));
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_unconfigured_messenger() {
        let messenger = WhatsAppMessenger::new(WhatsAppConfig::default()).unwrap();
        assert!(!messenger.is_configured());
    }
}
