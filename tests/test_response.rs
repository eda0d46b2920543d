use serde_json::{Value, json};
use ticket_notes::http::response::{Response, ResponseBuilder, StatusCode};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::NoContent.as_u16(), 204);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
}

#[test]
fn test_status_code_display() {
    assert_eq!(StatusCode::Ok.to_string(), "200 OK");
    assert_eq!(StatusCode::NoContent.to_string(), "204 No Content");
    assert_eq!(StatusCode::BadRequest.to_string(), "400 Bad Request");
    assert_eq!(StatusCode::NotFound.to_string(), "404 Not Found");
}

#[test]
fn test_response_builder_preserves_header_order_and_duplicates() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("X-Trace", "one")
        .header("Content-Type", "text/plain")
        .header("X-Trace", "two")
        .body(b"test".to_vec())
        .build();

    assert_eq!(
        response.headers,
        vec![
            ("X-Trace".to_string(), "one".to_string()),
            ("Content-Type".to_string(), "text/plain".to_string()),
            ("X-Trace".to_string(), "two".to_string()),
        ]
    );
    assert_eq!(response.header("x-trace"), Some("one"));
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::NoContent).build();

    assert!(response.body.is_empty());
    assert!(response.headers.is_empty());
}

#[test]
fn test_response_ok_json() {
    let response = Response::ok_json(&json!({ "ok": true }));

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Content-Type"), Some("application/json"));
    assert_eq!(response.body, b"{\"ok\":true}".to_vec());
}

#[test]
fn test_response_ok_json_text_is_passed_through() {
    let response = Response::ok_json_text("{ \"text\": \"as stored\" }");

    assert_eq!(response.body, b"{ \"text\": \"as stored\" }".to_vec());
}

#[test]
fn test_response_bad_request_escapes_message() {
    let response = Response::bad_request("write failed: \"disk\" full");

    assert_eq!(response.status, StatusCode::BadRequest);
    assert_eq!(response.header("Content-Type"), Some("application/json"));

    let body: Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body["error"], "write failed: \"disk\" full");
}

#[test]
fn test_response_not_found_helper() {
    let response = Response::not_found();

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert_eq!(response.body, b"Not Found".to_vec());
}

#[test]
fn test_response_no_content_helper() {
    let response = Response::no_content();

    assert_eq!(response.status, StatusCode::NoContent);
    assert!(response.body.is_empty());
}
