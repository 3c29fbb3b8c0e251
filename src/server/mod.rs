//! Listening socket, accept loop and shutdown.
//!
//! ```text
//!  accept ──► spawn handler ──► accept ──► ...
//!    │
//!    └─ error, or shutdown signal set ──► LogMessage::Stop ──► join logger ──► return
//! ```

pub mod listener;
pub mod shutdown;
pub mod spawn;

pub use listener::Server;
pub use shutdown::ShutdownSignal;
pub use spawn::{Job, Spawner, ThreadPerConnection};
