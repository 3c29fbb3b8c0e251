#![allow(dead_code)]

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use funnel::config::Config;
use funnel::error::ServerError;
use funnel::logging::{self, Console};
use funnel::server::{Server, Spawner, ThreadPerConnection};

/// In-memory console that tests can read back.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct RunningServer {
    pub addr: SocketAddr,
    pub console: SharedBuffer,
    pub handle: JoinHandle<Result<(), ServerError>>,
}

/// Starts a server on an ephemeral loopback port serving `root`, with its
/// tracing output captured in the returned console buffer.
pub fn start_server(root: &Path) -> RunningServer {
    start_server_with(root, ThreadPerConnection)
}

/// Like [`start_server`], with connection handlers run by `spawner`.
pub fn start_server_with(root: &Path, spawner: impl Spawner + 'static) -> RunningServer {
    let cfg = Config {
        listen_addr: "127.0.0.1:0".to_string(),
        document_root: root.to_path_buf(),
        ..Config::default()
    };

    let console = SharedBuffer::default();
    let server = Server::bind(&cfg, Console::new(console.clone()))
        .unwrap()
        .with_spawner(spawner);
    let addr = server.local_addr();
    let dispatch = logging::dispatch(server.log_channel());

    let handle = thread::spawn(move || {
        tracing::dispatcher::with_default(&dispatch, || server.run())
    });

    RunningServer {
        addr,
        console,
        handle,
    }
}

/// Sends raw request bytes and reads until the server closes the connection.
pub fn send_raw(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(request).unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    response
}

pub fn get(addr: SocketAddr, uri: &str) -> String {
    let request = format!("GET {} HTTP/1.1\r\nHost: localhost\r\n\r\n", uri);
    String::from_utf8_lossy(&send_raw(addr, request.as_bytes())).into_owned()
}

/// Splits a raw response into its head (without the blank line) and body.
pub fn split_response(raw: &str) -> (&str, &str) {
    raw.split_once("\r\n\r\n").unwrap_or((raw, ""))
}

/// Value of `key` in a serialised response head.
pub fn head_header<'a>(head: &'a str, key: &str) -> Option<&'a str> {
    head.lines()
        .skip(1)
        .filter_map(|line| line.split_once(": "))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}
