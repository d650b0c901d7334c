//! Autoreply API Routes
//!
//! - / and /health - status and liveness
//! - /webhook - WhatsApp verification handshake and notifications
//! - /test-webhook - manual reply trigger
//! - /swagger-ui - OpenAPI documentation

pub mod status;
pub mod swagger;
pub mod test_webhook;
pub mod webhook;
