//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates with the
//! messaging platform.

mod reply_service;

pub use reply_service::{ReplyOutcome, ReplyService};
