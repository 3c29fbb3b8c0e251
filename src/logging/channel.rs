use std::io;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded};
use tracing_subscriber::fmt::MakeWriter;

use super::console::Console;

/// Echoed to the console when the logger stops.
pub const SHUTDOWN_MESSAGE: &str = "Shutting down.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMessage {
    /// One complete line, including its trailing newline.
    Line(Vec<u8>),
    /// Tells the logger to stop draining.
    Stop,
}

/// Write end of the log funnel. Cheap to clone; every clone feeds the same logger.
#[derive(Debug, Clone)]
pub struct LogChannel {
    sender: Sender<LogMessage>,
}

/// The background thread that owns the read end of a [`LogChannel`].
#[derive(Debug)]
pub struct Logger {
    handle: JoinHandle<()>,
}

impl LogChannel {
    /// Creates the channel and starts the logger thread draining it into `console`.
    pub fn open(capacity: usize, console: Console) -> io::Result<(LogChannel, Logger)> {
        let (sender, receiver) = bounded(capacity);

        let handle = thread::Builder::new()
            .name("logger".to_string())
            .spawn(move || drain(receiver, console))?;

        Ok((LogChannel { sender }, Logger { handle }))
    }

    /// Hands one line to the logger. A newline is appended when missing.
    ///
    /// Lines written after the logger has stopped are dropped.
    pub fn write_line(&self, line: impl Into<String>) {
        let mut line = line.into();
        if !line.ends_with('\n') {
            line.push('\n');
        }
        let _ = self.sender.send(LogMessage::Line(line.into_bytes()));
    }

    /// Asks the logger to stop once it has drained everything queued before this call.
    pub fn stop(&self) {
        let _ = self.sender.send(LogMessage::Stop);
    }
}

impl Logger {
    /// Blocks until the drain loop has exited.
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

fn drain(receiver: Receiver<LogMessage>, console: Console) {
    let current = thread::current();
    let _ = console.println(&format!(
        "Logger pid: {} thread: {}",
        std::process::id(),
        current.name().unwrap_or("unnamed"),
    ));

    // Ends on Stop, or when every LogChannel has been dropped.
    for message in receiver {
        match message {
            LogMessage::Line(bytes) => {
                if !bytes.is_empty() {
                    let _ = console.write_bytes(&bytes);
                }
            }
            LogMessage::Stop => {
                let _ = console.println(SHUTDOWN_MESSAGE);
                break;
            }
        }
    }
}

impl io::Write for LogChannel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sender
            .send(LogMessage::Line(buf.to_vec()))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "logger has stopped"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogChannel {
    type Writer = LogChannel;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
