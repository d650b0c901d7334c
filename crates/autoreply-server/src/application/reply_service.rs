//! Reply Application Service (Use Case)
//!
//! Selects the canned reply for an inbound message and sends it through
//! the messaging platform.

use std::sync::Arc;
use tokio::task::JoinHandle;

use autoreply::{InboundMessage, OutboundMessenger, OutboundResult, Responder};

/// Reply chosen for a message and the outcome of sending it
#[derive(Debug, Clone)]
pub struct ReplyOutcome {
    pub reply: String,
    pub delivery: OutboundResult,
}

/// Application service for automatic replies
pub struct ReplyService<M: OutboundMessenger> {
    responder: Arc<Responder>,
    messenger: Arc<M>,
}

impl<M: OutboundMessenger + 'static> ReplyService<M> {
    pub fn new(responder: Arc<Responder>, messenger: Arc<M>) -> Self {
        Self {
            responder,
            messenger,
        }
    }

    /// Select a reply and send it, logging the outcome
    pub async fn respond(
        &self,
        from: &str,
        text: Option<&str>,
        message_id: &str,
    ) -> ReplyOutcome {
        tracing::info!(
            from = %from,
            message_id = %message_id,
            "🤖 Processing message for auto-reply"
        );

        let reply = self.responder.select(text).to_string();
        tracing::info!("🎯 Reply selected: {:?}", reply);

        let delivery = self.messenger.send_text(from, &reply).await;

        if delivery.success {
            tracing::info!(
                message_id = ?delivery.message_id,
                platform = %self.messenger.name(),
                "✅ Auto-reply sent"
            );
        } else {
            tracing::error!(
                error = ?delivery.error,
                code = ?delivery.code,
                "❌ Failed to send auto-reply"
            );
        }

        ReplyOutcome { reply, delivery }
    }

    /// Run [`Self::respond`] on its own task
    pub fn spawn_reply(
        self: &Arc<Self>,
        from: String,
        text: Option<String>,
        message_id: String,
    ) -> JoinHandle<ReplyOutcome> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            service
                .respond(&from, text.as_deref(), &message_id)
                .await
        })
    }

    /// Fire-and-forget reply for a webhook message
    ///
    /// The task is never joined: the webhook is acknowledged without
    /// waiting for delivery, whose outcome is only visible in the logs.
    pub fn dispatch(self: &Arc<Self>, message: InboundMessage) {
        let _detached = self.spawn_reply(message.sender_id, message.body, message.message_id);
    }
}
