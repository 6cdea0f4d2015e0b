//! # Approval Container
//!
//! Holds the approval core's components with their wiring and lifetime.
//!
//! Construction order: mirror bus → surface arbiter → request manager, since
//! the manager's adapters need both of the others.

pub mod config;
pub mod services;

pub use config::{ConfigError, LogConfig, RuntimeConfig};
pub use services::ApprovalContainer;
