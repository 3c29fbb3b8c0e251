//! Funnelled logging.
//!
//! Every thread that wants to log hands a complete line to a [`LogChannel`].
//! A single background [`Logger`] thread owns the receiving end and is the only
//! component that writes those lines to the [`Console`], so concurrent output
//! never interleaves mid-line.
//!
//! ```text
//!  handler ─┐
//!  handler ─┼──► LogChannel (bounded) ──► Logger thread ──► Console (mutex) ──► stdout
//!  server  ─┘         ▲
//!                     └── LogMessage::Stop ends the drain loop
//! ```
//!
//! The `tracing` subscriber built by [`dispatch`] uses the channel as its writer,
//! which is how `info!`/`warn!`/`error!` events reach the logger.

mod channel;
mod console;

pub use channel::{LogChannel, LogMessage, Logger, SHUTDOWN_MESSAGE};
pub use console::Console;

use tracing::Dispatch;

/// Builds a fmt subscriber whose output goes through `channel`.
pub fn dispatch(channel: &LogChannel) -> Dispatch {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(channel.clone())
        .with_target(false)
        .with_level(true)
        .with_ansi(false)
        .finish();

    Dispatch::new(subscriber)
}
