use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cross-thread request to stop the accept loop.
///
/// Handlers call [`trigger`](ShutdownSignal::trigger); the accept loop checks
/// [`is_triggered`](ShutdownSignal::is_triggered) after every accept. Triggering
/// also opens a throwaway connection to the listener so a blocked `accept`
/// returns promptly.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    triggered: Arc<AtomicBool>,
    wake_addr: SocketAddr,
}

impl ShutdownSignal {
    /// `listen_addr` is the listener's bound address. Unspecified addresses are
    /// woken through loopback.
    pub fn new(listen_addr: SocketAddr) -> Self {
        let mut wake_addr = listen_addr;
        if wake_addr.ip().is_unspecified() {
            let loopback = match wake_addr.ip() {
                IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
                IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
            };
            wake_addr.set_ip(loopback);
        }

        Self {
            triggered: Arc::new(AtomicBool::new(false)),
            wake_addr,
        }
    }

    /// Requests shutdown. Only the first call wakes the listener.
    pub fn trigger(&self) {
        if self.triggered.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Err(e) = TcpStream::connect(self.wake_addr) {
            tracing::debug!(addr = %self.wake_addr, error = %e, "Wake-up connection failed");
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}
