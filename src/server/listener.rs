use std::net::{Ipv4Addr, SocketAddr};

use tokio::net::{TcpListener, TcpSocket};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

use crate::error::BindError;
use crate::http::connection::Connection;
use crate::http::reader::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_REQUEST_BYTES, RequestReader};
use crate::router::Dispatcher;

const BACKLOG: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerOptions {
    /// Loopback port; `0` picks an ephemeral one.
    pub port: u16,
    pub read_chunk_bytes: usize,
    pub max_request_bytes: usize,
}

impl ServerOptions {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            read_chunk_bytes: DEFAULT_CHUNK_SIZE,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

/// A running listener. Dropping it also ends the accept loop, but only
/// [`ServerHandle::stop`] waits for the port to be released.
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    accept_loop: JoinHandle<()>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting and releases the port. Connections already being
    /// served are not waited for.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.accept_loop.await {
            tracing::error!("Accept loop ended abnormally: {}", e);
        }
        info!("Stopped listening on {}", self.local_addr);
    }
}

/// Binds `127.0.0.1:<port>` and starts accepting. Must be called from within
/// a tokio runtime.
pub fn start(options: ServerOptions, dispatcher: Dispatcher) -> Result<ServerHandle, BindError> {
    let listener = bind(options.port).map_err(|source| BindError {
        port: options.port,
        source,
    })?;
    let local_addr = listener.local_addr().map_err(|source| BindError {
        port: options.port,
        source,
    })?;
    info!("Listening on {}", local_addr);

    let (shutdown, shutdown_rx) = oneshot::channel();
    let accept_loop = tokio::spawn(accept_loop(listener, options, dispatcher, shutdown_rx));

    Ok(ServerHandle {
        local_addr,
        shutdown,
        accept_loop,
    })
}

fn bind(port: u16) -> std::io::Result<TcpListener> {
    let socket = TcpSocket::new_v4()?;
    // A quick stop/start must not trip over TIME_WAIT.
    socket.set_reuseaddr(true)?;
    socket.bind(SocketAddr::from((Ipv4Addr::LOCALHOST, port)))?;
    socket.listen(BACKLOG)
}

async fn accept_loop(
    listener: TcpListener,
    options: ServerOptions,
    dispatcher: Dispatcher,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        let accepted = tokio::select! {
            _ = &mut shutdown => break,
            accepted = listener.accept() => accepted,
        };

        let (socket, peer) = match accepted {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!("Failed to accept connection: {}", e);
                continue;
            }
        };
        tracing::debug!("Accepted connection from {}", peer);

        let reader = RequestReader::new(options.read_chunk_bytes, options.max_request_bytes);
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, reader, dispatcher);
            if let Err(e) = conn.run().await {
                tracing::debug!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
