//! Request and response DTOs
//!
//! - status: root info, health, route listing
//! - webhook: verification query, manual test trigger

mod status;
mod webhook;

pub use status::*;
pub use webhook::*;
