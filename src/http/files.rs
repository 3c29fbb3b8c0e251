//! Resolves request URIs to file contents.
//!
//! URIs are joined onto the document root as-is. There is no protection
//! against `..` segments; anything the process can read can be served.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use bytes::Bytes;

/// A file that was found and read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    /// Bytes actually read
    pub bytes: Bytes,
    /// Size the file reported before reading
    pub size: u64,
}

impl StaticFile {
    /// True when fewer bytes were read than the file reported.
    pub fn is_partial(&self) -> bool {
        (self.bytes.len() as u64) < self.size
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(StaticFile),
    NotFound,
}

pub trait StaticFileResolver: Send + Sync {
    fn resolve(&self, uri: &str) -> Resolution;
}

/// Serves files from a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, uri: &str) -> PathBuf {
        self.root.join(uri.trim_start_matches('/'))
    }
}

impl StaticFileResolver for FsResolver {
    fn resolve(&self, uri: &str) -> Resolution {
        let path = self.path_for(uri);

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Cannot open file");
                return Resolution::NotFound;
            }
        };

        let size = match file.metadata() {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => return Resolution::NotFound,
        };

        let mut buf = Vec::with_capacity(size as usize);
        // On error read_to_end leaves what it managed to read in buf.
        if let Err(e) = file.take(size).read_to_end(&mut buf) {
            tracing::warn!(path = %path.display(), error = %e, "Read interrupted");
        }

        Resolution::Found(StaticFile {
            bytes: Bytes::from(buf),
            size,
        })
    }
}
