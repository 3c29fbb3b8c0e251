use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle to the process console.
///
/// All direct console writes go through one mutex so that the logger's output
/// and any other direct writes never interleave.
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(out))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Writes raw bytes as one unit.
    pub fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        let mut out = self.lock();
        out.write_all(bytes)?;
        out.flush()
    }

    /// Writes `message` followed by a newline.
    pub fn println(&self, message: &str) -> io::Result<()> {
        let mut out = self.lock();
        out.write_all(message.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}
