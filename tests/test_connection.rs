use std::io::{self, Cursor, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use funnel::http::connection::{Connection, ConnectionContext};
use funnel::http::dispatch::Dispatcher;
use funnel::http::files::FsResolver;
use funnel::http::mime::ContentTypeTable;
use funnel::server::ShutdownSignal;

/// A stream that serves canned input in fixed-size reads and records writes.
struct MockStream {
    input: Cursor<Vec<u8>>,
    fail_read: bool,
    writes: Vec<Vec<u8>>,
    /// When set, records whether shutdown had been triggered at each write.
    watch: Option<ShutdownSignal>,
    triggered_at_write: Vec<bool>,
}

impl MockStream {
    fn new(input: &[u8]) -> Self {
        Self {
            input: Cursor::new(input.to_vec()),
            fail_read: false,
            writes: Vec::new(),
            watch: None,
            triggered_at_write: Vec::new(),
        }
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail_read {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        }
        self.input.read(buf)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes.push(buf.to_vec());
        if let Some(signal) = &self.watch {
            self.triggered_at_write.push(signal.is_triggered());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn context() -> ConnectionContext {
    let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
    ConnectionContext {
        id: 1,
        local_addr: addr,
        peer_addr: addr,
    }
}

fn dispatcher(root: &std::path::Path) -> (Arc<Dispatcher>, TcpListener) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let dispatcher = Dispatcher::new(
        Arc::new(FsResolver::new(root)),
        ContentTypeTable::default(),
        "/index.html",
        "/quit",
        ShutdownSignal::new(listener.local_addr().unwrap()),
    );
    (Arc::new(dispatcher), listener)
}

#[test]
fn test_connection_serves_file_in_two_writes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), b"<h1>home</h1>").unwrap();
    let (dispatcher, _listener) = dispatcher(dir.path());

    let mut stream = MockStream::new(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
    Connection::new(&mut stream, context(), dispatcher, 1024).run();

    assert_eq!(stream.writes.len(), 2);
    assert_eq!(
        stream.writes[0],
        b"HTTP/1.0 200 OK\r\nContent-Type: text/html\r\nContent-Length: 13\r\n\r\n".to_vec()
    );
    assert_eq!(stream.writes[1], b"<h1>home</h1>".to_vec());
}

#[test]
fn test_connection_rejects_post_with_head_only() {
    let dir = tempfile::tempdir().unwrap();
    let (dispatcher, _listener) = dispatcher(dir.path());

    let mut stream = MockStream::new(b"POST /form HTTP/1.1\r\nContent-Length: 3\r\n\r\na=b");
    Connection::new(&mut stream, context(), dispatcher, 1024).run();

    assert_eq!(
        stream.writes,
        vec![b"HTTP/1.0 404 Unknown HTTP request POST\r\n\r\n".to_vec()]
    );
}

#[test]
fn test_connection_empty_read_sends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (dispatcher, _listener) = dispatcher(dir.path());

    let mut stream = MockStream::new(b"");
    Connection::new(&mut stream, context(), dispatcher, 1024).run();

    assert!(stream.writes.is_empty());
}

#[test]
fn test_connection_read_error_sends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (dispatcher, _listener) = dispatcher(dir.path());

    let mut stream = MockStream::new(b"GET / HTTP/1.1\r\n\r\n");
    stream.fail_read = true;
    Connection::new(&mut stream, context(), dispatcher, 1024).run();

    assert!(stream.writes.is_empty());
}

#[test]
fn test_connection_reads_only_once() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), b"home").unwrap();
    let (dispatcher, _listener) = dispatcher(dir.path());

    // A 4-byte buffer only ever sees "GET ", so the request line is malformed
    // and the URI falls back to "/".
    let mut stream = MockStream::new(b"GET /missing.txt HTTP/1.1\r\n\r\n");
    Connection::new(&mut stream, context(), dispatcher, 4).run();

    assert_eq!(stream.writes.len(), 2);
    assert_eq!(stream.writes[1], b"home".to_vec());
}

#[test]
fn test_connection_triggers_shutdown_after_quit_response_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let signal = ShutdownSignal::new(listener.local_addr().unwrap());
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(FsResolver::new(dir.path())),
        ContentTypeTable::default(),
        "/index.html",
        "/quit",
        signal.clone(),
    ));

    let mut stream = MockStream::new(b"GET /quit HTTP/1.1\r\n\r\n");
    stream.watch = Some(signal.clone());
    Connection::new(&mut stream, context(), dispatcher, 1024).run();

    assert_eq!(stream.writes.len(), 2);
    assert_eq!(stream.writes[1], b"GET /quit failed".to_vec());
    assert_eq!(stream.triggered_at_write, vec![false, false]);
    assert!(signal.is_triggered());
    let (_wake, _) = listener.accept().unwrap();
}
