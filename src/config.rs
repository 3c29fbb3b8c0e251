use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "funnel.yaml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address of the listening socket.
    pub listen_addr: String,
    /// Directory requested URIs are resolved against.
    pub document_root: PathBuf,
    /// Served for an empty URI or `/`.
    pub default_document: String,
    /// Reserved URI that stops the accept loop.
    pub quit_path: String,
    /// Size of the single read a connection gets for its request.
    pub read_buffer_size: usize,
    /// Number of log messages that may be queued before writers block.
    pub log_queue_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            document_root: PathBuf::from("."),
            default_document: "/index.html".to_string(),
            quit_path: "/quit".to_string(),
            read_buffer_size: 1024,
            log_queue_size: 1024,
        }
    }
}

impl Config {
    /// Loads `funnel.yaml` from the working directory, falling back to the
    /// built-in defaults when the file does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("invalid config in {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(text)?;
        if config.read_buffer_size == 0 {
            anyhow::bail!("read_buffer_size must be greater than zero");
        }
        if config.log_queue_size == 0 {
            anyhow::bail!("log_queue_size must be greater than zero");
        }
        Ok(config)
    }
}
