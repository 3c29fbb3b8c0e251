//! HTTP protocol handling.
//!
//! One request per connection, GET only, no keep-alive.
//!
//! - **`connection`**: per-connection state machine (read, dispatch, write, close)
//! - **`parser`**: turns the text of a request into a [`request::Request`]
//! - **`request`**: request, verb and header types
//! - **`dispatch`**: verb dispatch, static file lookup and the quit trigger
//! - **`response`**: response type and builder
//! - **`writer`**: serialises a response and writes it as head + body
//! - **`files`**: file resolution against the document root
//! - **`mime`**: content type lookup by file extension
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← single read of up to read_buffer_size bytes
//!        └──────┬──────┘
//!               │ Request parsed          (empty read / error → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← dispatch by verb, build response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← head, then body if non-empty
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```

pub mod connection;
pub mod dispatch;
pub mod files;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
