use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind the server to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("listener has no local address: {0}")]
    LocalAddr(std::io::Error),
    #[error("failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("logger thread panicked")]
    LoggerPanicked,
}

impl ServerError {
    pub fn bind(addr: impl Into<String>, source: std::io::Error) -> Self {
        ServerError::Bind {
            addr: addr.into(),
            source,
        }
    }
}
