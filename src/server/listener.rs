use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::ServerError;
use crate::http::connection::{Connection, ConnectionContext};
use crate::http::dispatch::Dispatcher;
use crate::http::files::{FsResolver, StaticFileResolver};
use crate::http::mime::ContentTypeTable;
use crate::logging::{Console, LogChannel, Logger};
use crate::server::shutdown::ShutdownSignal;
use crate::server::spawn::{Spawner, ThreadPerConnection};

/// Owns the listening socket, the accept loop and the logger's lifetime.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    dispatcher: Arc<Dispatcher>,
    shutdown: ShutdownSignal,
    spawner: Box<dyn Spawner>,
    log: LogChannel,
    logger: Logger,
    read_buffer_size: usize,
}

impl Server {
    /// Binds the listener and starts the logger. Files are served from
    /// `cfg.document_root`.
    pub fn bind(cfg: &Config, console: Console) -> Result<Self, ServerError> {
        let resolver = Arc::new(FsResolver::new(&cfg.document_root));
        Self::bind_with_resolver(cfg, console, resolver)
    }

    pub fn bind_with_resolver(
        cfg: &Config,
        console: Console,
        resolver: Arc<dyn StaticFileResolver>,
    ) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(&cfg.listen_addr)
            .map_err(|e| ServerError::bind(cfg.listen_addr.as_str(), e))?;
        let local_addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

        let (log, logger) = LogChannel::open(cfg.log_queue_size, console)?;

        let shutdown = ShutdownSignal::new(local_addr);
        let dispatcher = Dispatcher::new(
            resolver,
            ContentTypeTable::default(),
            cfg.default_document.as_str(),
            cfg.quit_path.as_str(),
            shutdown.clone(),
        );

        Ok(Self {
            listener,
            local_addr,
            dispatcher: Arc::new(dispatcher),
            shutdown,
            spawner: Box::new(ThreadPerConnection),
            log,
            logger,
            read_buffer_size: cfg.read_buffer_size,
        })
    }

    /// Replaces the thread-per-connection spawner.
    pub fn with_spawner(mut self, spawner: impl Spawner + 'static) -> Self {
        self.spawner = Box::new(spawner);
        self
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Write end of the log funnel, for building a tracing subscriber.
    pub fn log_channel(&self) -> &LogChannel {
        &self.log
    }

    /// Runs the accept loop until shutdown, then stops and joins the logger.
    ///
    /// Any accept error is treated as a shutdown request.
    pub fn run(self) -> Result<(), ServerError> {
        info!("Listening on port {}", self.local_addr.port());

        let mut next_id: u64 = 0;
        loop {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    if self.shutdown.is_triggered() {
                        drop(stream);
                        break;
                    }

                    next_id += 1;
                    info!(%peer, "Accepted connection on socket {}", next_id);
                    self.handle_connection(stream, peer, next_id);
                }
                Err(e) => {
                    warn!(error = %e, "Accept failed, shutting down");
                    break;
                }
            }
        }

        // Queued behind every line logged so far.
        self.log.stop();
        self.logger.join().map_err(|_| ServerError::LoggerPanicked)
    }

    fn handle_connection(&self, stream: TcpStream, peer: SocketAddr, id: u64) {
        let context = ConnectionContext {
            id,
            local_addr: self.local_addr,
            peer_addr: peer,
        };
        let conn = Connection::new(
            stream,
            context,
            Arc::clone(&self.dispatcher),
            self.read_buffer_size,
        );

        if let Err(e) = self.spawner.spawn(Box::new(move || conn.run())) {
            error!(socket = id, error = %e, "Failed to spawn handler, dropping connection");
        }
    }
}
