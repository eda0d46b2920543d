//! Request routing
//!
//! Routes are exact `(method, path)` pairs:
//!
//! | Method  | Path      | Handler                      |
//! |---------|-----------|------------------------------|
//! | GET     | `/ping`   | health check                 |
//! | POST    | `/choose` | trigger the folder picker    |
//! | GET     | `/load`   | read the note for `ticketId` |
//! | POST    | `/save`   | write the note for `ticketId`|
//! | OPTIONS | any       | empty 204 (CORS preflight)   |
//!
//! Anything else is a 404.

use std::sync::Arc;

use serde_json::json;

use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::notes::TicketId;
use crate::router::capabilities::Capabilities;

const TICKET_PARAM: &str = "ticketId";

#[derive(Clone)]
pub struct Dispatcher {
    caps: Arc<dyn Capabilities>,
}

impl Dispatcher {
    pub fn new(caps: Arc<dyn Capabilities>) -> Self {
        Self { caps }
    }

    /// Maps a request to its response. Blocking store calls happen inline.
    pub fn dispatch(&self, req: &Request) -> Response {
        if req.method == Method::OPTIONS {
            return Response::no_content();
        }

        match (&req.method, req.path.as_str()) {
            (Method::GET, "/ping") => self.ping(),
            (Method::POST, "/choose") => self.choose(),
            (Method::GET, "/load") => self.load(req),
            (Method::POST, "/save") => self.save(req),
            _ => Response::not_found(),
        }
    }

    fn ping(&self) -> Response {
        Response::ok_json(&json!({ "ok": self.caps.health_check() }))
    }

    fn choose(&self) -> Response {
        self.caps.trigger_folder_picker();
        Response::ok_json(&json!({ "ok": true }))
    }

    fn load(&self, req: &Request) -> Response {
        let note = req
            .query_param(TICKET_PARAM)
            .and_then(|raw| raw.parse::<TicketId>().ok())
            .and_then(|id| self.caps.read_note(&id))
            .and_then(|bytes| String::from_utf8(bytes).ok());

        Response::ok_json_text(note.unwrap_or_else(|| "{}".to_string()))
    }

    fn save(&self, req: &Request) -> Response {
        let (Some(raw_id), Some(body)) = (req.query_param(TICKET_PARAM), req.body_str()) else {
            return Response::bad_request("missing params");
        };

        let Ok(id) = raw_id.parse::<TicketId>() else {
            return Response::bad_request("invalid ticketId");
        };

        let is_object = serde_json::from_str::<serde_json::Value>(body)
            .map(|v| v.is_object())
            .unwrap_or(false);
        if !is_object {
            return Response::bad_request("invalid JSON body");
        }

        match self.caps.write_note(&id, body.as_bytes()) {
            Ok(path) => Response::ok_json(&json!({
                "ok": true,
                "path": path.to_string_lossy(),
            })),
            Err(e) => {
                tracing::warn!(ticket = %id, error = %e, "Failed to save note");
                Response::bad_request(e.to_string())
            }
        }
    }
}
