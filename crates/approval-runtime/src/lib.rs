//! # Approval Runtime Library
//!
//! Exposes the runtime's wiring for tests. The entry point is the `main.rs`
//! binary.
//!
//! ## Layout
//!
//! - **container**: configuration and component wiring
//! - **adapters**: the correlation queue's outbound ports over the mirror bus
//!   and the surface arbiter
//! - **handlers**: the line-delimited JSON protocol on stdio
//! - **telemetry**: tracing setup

pub mod adapters;
pub mod container;
pub mod handlers;
pub mod telemetry;

pub use container::{ApprovalContainer, ConfigError, LogConfig, RuntimeConfig};
pub use handlers::{forward_mirror, write_lines, ProtocolRequest, ProtocolResponse, StdioHandler};
