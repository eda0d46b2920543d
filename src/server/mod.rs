//! Loopback TCP listener and its owned lifecycle handle.

pub mod listener;

pub use listener::{ServerHandle, ServerOptions, start};
