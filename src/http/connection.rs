use std::io::{Read, Write};
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::http::dispatch::Dispatcher;
use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;

/// Identity of one accepted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionContext {
    /// Accept-order number, starting at 1
    pub id: u64,
    pub local_addr: SocketAddr,
    pub peer_addr: SocketAddr,
}

pub struct Connection<S> {
    stream: S,
    context: ConnectionContext,
    dispatcher: Arc<Dispatcher>,
    buffer: Vec<u8>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = shut the server down after writing?
    Closed,
}

impl<S: Read + Write> Connection<S> {
    pub fn new(
        stream: S,
        context: ConnectionContext,
        dispatcher: Arc<Dispatcher>,
        read_buffer_size: usize,
    ) -> Self {
        Self {
            stream,
            context,
            dispatcher,
            buffer: vec![0u8; read_buffer_size],
            state: ConnectionState::Reading,
        }
    }

    /// Serves exactly one request, then closes the stream by dropping it.
    pub fn run(mut self) {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request() {
                        Some(req) => ConnectionState::Processing(req),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let dispatched = self.dispatcher.dispatch(&req);
                    let writer = ResponseWriter::new(&dispatched.response);
                    info!(
                        socket = self.context.id,
                        "Sending {}",
                        String::from_utf8_lossy(writer.head()).trim_end()
                    );
                    self.state = ConnectionState::Writing(writer, dispatched.shutdown);
                }

                ConnectionState::Writing(writer, shutdown) => {
                    if let Err(e) = writer.write_to_stream(&mut self.stream) {
                        warn!(socket = self.context.id, error = %e, "Failed to send response");
                    }
                    if shutdown {
                        self.dispatcher.shutdown_signal().trigger();
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        debug!(
            socket = self.context.id,
            local = %self.context.local_addr,
            "Closing connection"
        );
    }

    /// One read, no accumulation: whatever arrives first is the request.
    fn read_request(&mut self) -> Option<Request> {
        let n = match self.stream.read(&mut self.buffer) {
            Ok(0) => {
                error!(
                    peer = %self.context.peer_addr,
                    "Error reading from connection {}: connection closed",
                    self.context.id
                );
                return None;
            }
            Ok(n) => n,
            Err(e) => {
                error!(
                    peer = %self.context.peer_addr,
                    "Error reading from connection {}: {}",
                    self.context.id,
                    e
                );
                return None;
            }
        };

        let text = String::from_utf8_lossy(&self.buffer[..n]);
        debug!(socket = self.context.id, "Request: {}", text);

        let request = parse_http_request(&text);
        info!("Read {} bytes: {}", n, request);
        Some(request)
    }
}
