//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain interacts with the outside world.

pub mod messenger;

pub use messenger::OutboundMessenger;
