//! Domain Entities
//!
//! Request-scoped values of the relay.
//! - InboundMessage: one user message delivered by the webhook
//! - ReplyRule: keyword trigger and canned response
//! - OutboundResult: outcome of sending a reply

mod inbound_message;
mod outbound_result;
mod reply_rule;

pub use inbound_message::*;
pub use outbound_result::*;
pub use reply_rule::*;
