//! Messaging Platform Port
//!
//! Abstract interface for delivering replies through a messaging platform.
//!
//! Implementations live in separate crates
//! (e.g., autoreply-integration-whatsapp).

use async_trait::async_trait;

use crate::domain::entities::OutboundResult;

/// Outbound messaging interface
///
/// # Example
///
/// ```rust,ignore
/// use autoreply::ports::OutboundMessenger;
///
/// struct WhatsAppMessenger { /* Graph API client */ }
///
/// #[async_trait]
/// impl OutboundMessenger for WhatsAppMessenger {
///     async fn send_text(&self, to: &str, body: &str) -> OutboundResult {
///         // POST to the send endpoint
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait OutboundMessenger: Send + Sync {
    /// Send a text reply to a recipient
    ///
    /// Never fails with an error: missing credentials, API errors and
    /// transport errors are all reported through the returned result.
    async fn send_text(&self, to: &str, body: &str) -> OutboundResult;

    /// Get the platform name (e.g., "whatsapp")
    fn name(&self) -> &str;

    /// Whether the messenger has the credentials it needs to send
    fn is_configured(&self) -> bool {
        true
    }
}
