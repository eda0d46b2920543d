use crate::http::request::{Method, Request};
use std::collections::HashMap;

pub(crate) const HEADERS_END: &[u8] = b"\r\n\r\n";

/// Turns raw request bytes into a [`Request`].
///
/// This never fails. Input without a usable request line (empty, not UTF-8,
/// missing the target) degrades to [`Request::fallback`].
pub fn parse_request(buf: &[u8]) -> Request {
    let (head, body) = match find_headers_end(buf) {
        Some(end) => (&buf[..end], Some(&buf[end + HEADERS_END.len()..])),
        None => (buf, None),
    };

    let Ok(head) = std::str::from_utf8(head) else {
        tracing::warn!("request head is not valid UTF-8, using fallback request");
        return Request::fallback();
    };

    let request_line = head.split("\r\n").next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();

    let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
        tracing::warn!(line = %request_line, "malformed request line, using fallback request");
        return Request::fallback();
    };

    let (raw_path, raw_query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    };

    Request {
        method: Method::parse(method),
        path: percent_decode(raw_path).unwrap_or_else(|| raw_path.to_string()),
        query: raw_query.map(parse_query).unwrap_or_default(),
        body: body.filter(|b| !b.is_empty()).map(<[u8]>::to_vec),
    }
}

/// Splits a query string into key/value pairs.
///
/// Pairs without `=` are dropped. Only values are percent-decoded; a value
/// that fails to decode is kept as written.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };

        let value = percent_decode(value).unwrap_or_else(|| value.to_string());
        params.insert(key.to_string(), value);
    }

    params
}

/// Decodes `%XX` escapes.
///
/// Returns `None` on a truncated or non-hex escape, or when the decoded bytes
/// are not UTF-8. `+` is left alone.
pub fn percent_decode(s: &str) -> Option<String> {
    let mut out = Vec::with_capacity(s.len());
    let mut bytes = s.bytes();

    while let Some(byte) = bytes.next() {
        if byte == b'%' {
            let hi = char::from(bytes.next()?).to_digit(16)?;
            let lo = char::from(bytes.next()?).to_digit(16)?;
            out.push((hi * 16 + lo) as u8);
        } else {
            out.push(byte);
        }
    }

    String::from_utf8(out).ok()
}

pub(crate) fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADERS_END.len())
        .position(|w| w == HEADERS_END)
}
