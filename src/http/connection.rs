use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use crate::http::parser::parse_request;
use crate::http::reader::{ReadOutcome, RequestReader};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router::Dispatcher;

/// One accepted socket serving exactly one request.
pub struct Connection<S = TcpStream> {
    stream: S,
    reader: RequestReader,
    dispatcher: Dispatcher,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Dispatching(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, reader: RequestReader, dispatcher: Dispatcher) -> Self {
        Self {
            stream,
            reader,
            dispatcher,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to `Closed`. An error at any step ends it
    /// immediately; the stream is dropped with the connection.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.reader.read_request(&mut self.stream).await? {
                        ReadOutcome::Request(bytes) => {
                            ConnectionState::Dispatching(parse_request(&bytes))
                        }
                        ReadOutcome::TooLarge => {
                            tracing::warn!("Request exceeds size limit, rejecting");
                            let response = Response::bad_request("request too large");
                            ConnectionState::Writing(ResponseWriter::new(&response))
                        }
                        ReadOutcome::Closed => ConnectionState::Closed,
                    };
                }

                ConnectionState::Dispatching(req) => {
                    let req = std::mem::replace(req, Request::fallback());
                    let response = Self::dispatch(self.dispatcher.clone(), req).await?;
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    let result = writer.write_to_stream(&mut self.stream).await;
                    self.state = ConnectionState::Closed;
                    result?;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Runs the handler off the reactor; note I/O is blocking.
    async fn dispatch(dispatcher: Dispatcher, req: Request) -> anyhow::Result<Response> {
        let (method, path) = (req.method.clone(), req.path.clone());
        let response = tokio::task::spawn_blocking(move || dispatcher.dispatch(&req)).await?;

        tracing::info!(
            method = %method,
            path = %path,
            status = response.status.as_u16(),
            "Request handled"
        );

        Ok(response)
    }
}
