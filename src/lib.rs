//! Funnel - thread-per-connection static file server
//!
//! Core library for request handling, the accept loop and the funnelled logger.

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod server;
pub mod strutil;
