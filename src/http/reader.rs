//! Incremental request framing.
//!
//! The reader pulls bytes off a stream until one full request is buffered.
//! It interprets exactly one header, `Content-Length`, to know how much body
//! to wait for:
//!
//! ```text
//! AwaitingHeaders ──"\r\n\r\n" seen──▶ AwaitingBody { .. } ──body buffered──▶ Complete
//!        │                                                                       ▲
//!        └──────────────────────── no Content-Length ────────────────────────────┘
//! ```

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::parser::{HEADERS_END, find_headers_end};

/// Largest single read from the socket.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Upper bound on a whole request (head plus body).
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    AwaitingHeaders,
    AwaitingBody { head_len: usize, content_length: usize },
    Complete { len: usize },
}

/// What a finished read produced.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Head plus declared body, or whatever the peer sent before closing.
    Request(Bytes),
    /// The peer closed without sending anything.
    Closed,
    /// The request would not fit in the configured limit.
    TooLarge,
}

pub struct RequestReader {
    buffer: BytesMut,
    state: ReadState,
    chunk_size: usize,
    max_bytes: usize,
}

impl RequestReader {
    pub fn new(chunk_size: usize, max_bytes: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
            state: ReadState::AwaitingHeaders,
            chunk_size: chunk_size.max(1),
            max_bytes,
        }
    }

    pub fn state(&self) -> ReadState {
        self.state
    }

    /// Reads until a complete request is buffered, the peer closes, or the
    /// size limit is hit.
    pub async fn read_request<S>(&mut self, stream: &mut S) -> std::io::Result<ReadOutcome>
    where
        S: AsyncRead + Unpin,
    {
        let mut chunk = vec![0u8; self.chunk_size];

        loop {
            self.advance();

            match self.state {
                ReadState::Complete { len } => {
                    return Ok(ReadOutcome::Request(self.buffer.split_to(len).freeze()));
                }
                ReadState::AwaitingBody { head_len, content_length }
                    if body_end(head_len, content_length).is_none_or(|end| end > self.max_bytes) =>
                {
                    return Ok(ReadOutcome::TooLarge);
                }
                ReadState::AwaitingHeaders if self.buffer.len() > self.max_bytes => {
                    return Ok(ReadOutcome::TooLarge);
                }
                _ => {}
            }

            let n = stream.read(&mut chunk).await?;

            if n == 0 {
                // Peer closed; hand over whatever arrived and let the parser cope.
                if self.buffer.is_empty() {
                    return Ok(ReadOutcome::Closed);
                }
                let len = self.buffer.len();
                self.state = ReadState::Complete { len };
                return Ok(ReadOutcome::Request(self.buffer.split().freeze()));
            }

            self.buffer.extend_from_slice(&chunk[..n]);
        }
    }

    /// Moves the state machine forward based on what is buffered.
    fn advance(&mut self) {
        if self.state == ReadState::AwaitingHeaders {
            let Some(end) = find_headers_end(&self.buffer) else {
                return;
            };
            let head_len = end + HEADERS_END.len();

            self.state = match content_length(&self.buffer[..end]) {
                Some(content_length) => ReadState::AwaitingBody { head_len, content_length },
                // Nothing declared: take whatever came along with the head.
                None => ReadState::Complete { len: self.buffer.len() },
            };
        }

        if let ReadState::AwaitingBody { head_len, content_length } = self.state {
            if let Some(end) = body_end(head_len, content_length) {
                if self.buffer.len() >= end {
                    self.state = ReadState::Complete { len: end };
                }
            }
        }
    }
}

impl Default for RequestReader {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_MAX_REQUEST_BYTES)
    }
}

/// Offset one past the declared body; `None` when the client-supplied
/// length does not fit in `usize`.
fn body_end(head_len: usize, content_length: usize) -> Option<usize> {
    head_len.checked_add(content_length)
}

/// Finds a parseable `Content-Length` in a header block (name compared
/// case-insensitively).
fn content_length(head: &[u8]) -> Option<usize> {
    let head = std::str::from_utf8(head).ok()?;

    head.split("\r\n")
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
}
