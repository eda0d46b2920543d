//! Ticket Notes - loopback note server for a browser extension
//!
//! A minimal HTTP/1.1 server over raw TCP that stores one JSON note per
//! ticket in a user-chosen folder.

pub mod config;
pub mod error;
pub mod http;
pub mod notes;
pub mod router;
pub mod server;
