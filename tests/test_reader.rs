use std::time::Duration;

use ticket_notes::http::reader::{ReadOutcome, ReadState, RequestReader};
use tokio::io::AsyncWriteExt;

#[tokio::test]
async fn test_read_request_without_body() {
    let raw = b"GET /ping HTTP/1.1\r\nHost: x\r\n\r\n";
    let mut stream = &raw[..];
    let mut reader = RequestReader::default();

    let outcome = reader.read_request(&mut stream).await.unwrap();

    assert_eq!(outcome, ReadOutcome::Request(raw.to_vec().into()));
    assert!(matches!(reader.state(), ReadState::Complete { .. }));
}

#[tokio::test]
async fn test_read_body_arriving_after_headers() {
    let (mut client, mut server) = tokio::io::duplex(1024);
    let mut reader = RequestReader::default();

    let writer = tokio::spawn(async move {
        client
            .write_all(b"POST /save?ticketId=A-1 HTTP/1.1\r\nContent-Length: 10\r\n\r\n")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        client.write_all(b"{\"text\":").await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        client.write_all(b"1}").await.unwrap();
        // Keep the stream open: the reader must finish on length alone.
        client
    });

    let outcome = reader.read_request(&mut server).await.unwrap();
    let _client = writer.await.unwrap();

    let ReadOutcome::Request(bytes) = outcome else {
        panic!("expected a request, got {outcome:?}");
    };
    assert!(bytes.ends_with(b"\r\n\r\n{\"text\":1}"));
}

#[tokio::test]
async fn test_read_stops_at_declared_length() {
    let raw = b"POST /save HTTP/1.1\r\nContent-Length: 2\r\n\r\n{}trailing";
    let mut stream = &raw[..];
    let mut reader = RequestReader::default();

    let outcome = reader.read_request(&mut stream).await.unwrap();

    assert_eq!(
        outcome,
        ReadOutcome::Request(b"POST /save HTTP/1.1\r\nContent-Length: 2\r\n\r\n{}".to_vec().into())
    );
}

#[tokio::test]
async fn test_read_with_small_chunks() {
    let raw = b"POST /save HTTP/1.1\r\ncontent-length: 5\r\n\r\nhello";
    let mut stream = &raw[..];
    let mut reader = RequestReader::new(3, 1024);

    let outcome = reader.read_request(&mut stream).await.unwrap();

    assert_eq!(outcome, ReadOutcome::Request(raw.to_vec().into()));
}

#[tokio::test]
async fn test_read_closed_without_data() {
    let mut stream = &b""[..];
    let mut reader = RequestReader::default();

    let outcome = reader.read_request(&mut stream).await.unwrap();

    assert_eq!(outcome, ReadOutcome::Closed);
}

#[tokio::test]
async fn test_read_partial_request_on_close() {
    let raw = b"POST /save HTTP/1.1\r\nContent-Length: 100\r\n\r\nshort";
    let mut stream = &raw[..];
    let mut reader = RequestReader::default();

    let outcome = reader.read_request(&mut stream).await.unwrap();

    assert_eq!(outcome, ReadOutcome::Request(raw.to_vec().into()));
}

#[tokio::test]
async fn test_read_rejects_oversized_declared_body() {
    let raw = b"POST /save HTTP/1.1\r\nContent-Length: 4096\r\n\r\n";
    let mut stream = &raw[..];
    let mut reader = RequestReader::new(1024, 256);

    let outcome = reader.read_request(&mut stream).await.unwrap();

    assert_eq!(outcome, ReadOutcome::TooLarge);
}

#[tokio::test]
async fn test_read_rejects_endless_headers() {
    let mut raw = b"GET / HTTP/1.1\r\n".to_vec();
    raw.extend(std::iter::repeat_n(b'a', 1024));
    let mut stream = &raw[..];
    let mut reader = RequestReader::new(64, 256);

    let outcome = reader.read_request(&mut stream).await.unwrap();

    assert_eq!(outcome, ReadOutcome::TooLarge);
}

#[tokio::test]
async fn test_read_rejects_content_length_that_overflows() {
    let raw = format!(
        "POST /save?ticketId=A-1 HTTP/1.1\r\nContent-Length: {}\r\n\r\n{{}}",
        u64::MAX
    );
    let mut stream = raw.as_bytes();
    let mut reader = RequestReader::default();

    let outcome = reader.read_request(&mut stream).await.unwrap();

    assert_eq!(outcome, ReadOutcome::TooLarge);
}
