//! Typed failures surfaced outside a single connection.

use std::io;

use thiserror::Error;

/// The listener could not take its port. Fatal to `start`.
#[derive(Debug, Error)]
#[error("failed to bind 127.0.0.1:{port}: {source}")]
pub struct BindError {
    pub port: u16,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("notes folder not chosen")]
    NotConfigured,

    #[error("invalid ticketId: {0:?}")]
    InvalidTicketId(String),

    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}
