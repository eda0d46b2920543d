//! HTTP protocol implementation.
//!
//! Just enough HTTP/1.1 for a loopback helper: one request per connection,
//! `Content-Length` framing only, and `Connection: close` on every response.
//!
//! # Architecture
//!
//! - **`reader`**: buffers socket reads until a full request is available
//! - **`parser`**: turns request bytes into a [`request::Request`]
//! - **`request`** / **`response`**: the values handlers consume and produce
//! - **`writer`**: serializes a response, adding CORS and framing headers
//! - **`connection`**: ties the above together per socket
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for a complete request
//!        └──────┬──────┘
//!               │ Request parsed (or degraded to GET /)
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Route to a handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! Any error along the way goes straight to `Closed`.

pub mod connection;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
