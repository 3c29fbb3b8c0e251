use std::sync::Arc;

use tracing::{info, warn};

use crate::http::files::{Resolution, StaticFileResolver};
use crate::http::mime::ContentTypeTable;
use crate::http::request::{Request, Verb};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::server::shutdown::ShutdownSignal;

/// Status text of a GET whose file could not be resolved.
pub const NOT_FOUND_TEXT: &str = "File not found";

/// Result of dispatching one request.
#[derive(Debug)]
pub struct Dispatched {
    pub response: Response,
    /// Set for a not-found request to the quit path. The connection triggers
    /// shutdown once the response has been written.
    pub shutdown: bool,
}

/// Turns parsed requests into responses.
///
/// GET is served from the resolver; every other verb is rejected. Requests for
/// the quit path fall through to the not-found branch and are flagged for
/// shutdown.
pub struct Dispatcher {
    resolver: Arc<dyn StaticFileResolver>,
    content_types: ContentTypeTable,
    default_document: String,
    quit_path: String,
    shutdown: ShutdownSignal,
}

impl Dispatcher {
    pub fn new(
        resolver: Arc<dyn StaticFileResolver>,
        content_types: ContentTypeTable,
        default_document: impl Into<String>,
        quit_path: impl Into<String>,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            resolver,
            content_types,
            default_document: default_document.into(),
            quit_path: quit_path.into(),
            shutdown,
        }
    }

    pub fn dispatch(&self, request: &Request) -> Dispatched {
        match &request.verb {
            Verb::GET => self.handle_get(&request.uri),
            verb => {
                let message = unknown_verb_message(verb);
                warn!("{}", message);
                Dispatched {
                    response: Response::failure(message),
                    shutdown: false,
                }
            }
        }
    }

    /// Signal that stops the accept loop.
    pub fn shutdown_signal(&self) -> &ShutdownSignal {
        &self.shutdown
    }

    fn handle_get(&self, uri: &str) -> Dispatched {
        let uri = if uri.is_empty() || uri == "/" {
            self.default_document.as_str()
        } else {
            uri
        };

        match self.resolver.resolve(uri) {
            Resolution::Found(file) => {
                if file.is_partial() {
                    warn!(
                        uri,
                        "Error reading. Only read {} of {} bytes",
                        file.bytes.len(),
                        file.size
                    );
                }

                let response = ResponseBuilder::new(StatusCode::Ok)
                    .header("Content-Type", self.content_types.for_uri(uri))
                    .body(file.bytes)
                    .build();

                Dispatched {
                    response,
                    shutdown: false,
                }
            }
            Resolution::NotFound => {
                let response = ResponseBuilder::new(StatusCode::NotFound)
                    .status_text(NOT_FOUND_TEXT)
                    .header("Content-Type", self.content_types.plain_text())
                    .body(format!("GET {} failed", uri))
                    .build();

                let shutdown = uri == self.quit_path;
                if shutdown {
                    info!(uri, "Shutdown requested");
                }

                Dispatched { response, shutdown }
            }
        }
    }
}

/// Status text for a rejected verb, e.g. `Unknown HTTP request POST`.
pub fn unknown_verb_message(verb: &Verb) -> String {
    format!("Unknown HTTP request {}", verb)
}
