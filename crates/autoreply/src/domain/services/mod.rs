//! Domain Services
//!
//! Pure logic operating on domain entities.

mod responder;

pub use responder::*;
