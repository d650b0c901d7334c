//! WhatsApp Integration for Autoreply
//!
//! This crate provides WhatsApp Cloud API integration for the auto-reply relay:
//! webhook verification and parsing, and outbound text messages.
//!
//! # Usage
//!
//! ```rust,ignore
//! use autoreply_integration_whatsapp::{WhatsAppConfig, WhatsAppMessenger};
//!
//! let config = WhatsAppConfig::new("access-token", "phone-number-id");
//! let messenger = WhatsAppMessenger::new(config)?;
//! ```

mod client;
mod config;
mod integration;
mod transport;
mod webhook;

pub use client::{WhatsAppClient, GENERIC_API_ERROR, MISSING_CREDENTIALS_ERROR};
pub use config::{
    WhatsAppConfig, DEFAULT_API_BASE_URL, DEFAULT_API_VERSION, DEFAULT_TIMEOUT_SECS,
};
pub use integration::WhatsAppMessenger;
pub use transport::{GraphTransport, ReqwestTransport, TransportError, TransportResponse};
pub use webhook::{WhatsAppWebhookHandler, BUSINESS_ACCOUNT_OBJECT, SIGNATURE_HEADER};
