use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Headers sent on every response so the browser extension may call us from
/// any origin.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
];

/// Serializes a response into the exact bytes put on the wire.
///
/// Handler headers come first, in order, minus any `Content-Length` or
/// `Connection` they tried to set; those two are always computed here.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(256 + resp.body.len());

    // Status line
    buf.extend_from_slice(format!("{} {}\r\n", HTTP_VERSION, resp.status).as_bytes());

    let handler_headers = resp.headers.iter().filter(|(k, _)| {
        !k.eq_ignore_ascii_case("content-length") && !k.eq_ignore_ascii_case("connection")
    });

    for (k, v) in handler_headers {
        push_header(&mut buf, k, v);
    }

    for (k, v) in CORS_HEADERS {
        push_header(&mut buf, k, v);
    }

    push_header(&mut buf, "Content-Length", &resp.body.len().to_string());
    push_header(&mut buf, "Connection", "close");

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf.extend_from_slice(&resp.body);

    buf
}

fn push_header(buf: &mut Vec<u8>, name: &str, value: &str) {
    buf.extend_from_slice(name.as_bytes());
    buf.extend_from_slice(b": ");
    buf.extend_from_slice(value.as_bytes());
    buf.extend_from_slice(b"\r\n");
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
        }
    }

    /// Sends the whole response and shuts down the write half. Any failure
    /// is returned as-is; the caller drops the connection without retrying.
    pub async fn write_to_stream<S>(&self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        stream.write_all(&self.buffer).await?;
        stream.flush().await?;
        stream.shutdown().await?;

        Ok(())
    }
}
