//! # Protocol Handlers
//!
//! Translate the outside world's messages into calls on the approval core.

pub mod stdio;

pub use stdio::{forward_mirror, write_lines, ErrorBody, ProtocolRequest, ProtocolResponse, StdioHandler};
