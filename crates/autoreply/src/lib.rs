//! Autoreply Domain Library
//!
//! Core domain types and interfaces for the WhatsApp auto-reply webhook relay.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure entities and logic
//!   - `entities/`: InboundMessage, ReplyRule, OutboundResult
//!   - `services/`: Responder (keyword reply selection)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `messenger`: outbound messaging platform
//!
//! # Usage
//!
//! ```rust,ignore
//! use autoreply::{Responder, OutboundMessenger};
//!
//! let responder = Responder::default();
//! let reply = responder.select(Some("hola"));
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    DomainError, InboundMessage, OutboundResult, ReplyRule, Responder, DEFAULT_CONTACT_NAME,
    DEFAULT_REPLY,
};
pub use ports::OutboundMessenger;
