//! # Shared Types Crate
//!
//! Approval-request entities and surface IPC payloads shared by every crate
//! in the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: request ids, request types and verdicts are
//!   defined once here.
//! - **Opaque payloads**: `PendingRequest<P>` is generic; nothing in the core
//!   looks inside `P`.

pub mod entities;
pub mod errors;
pub mod ipc;

pub use entities::*;
pub use errors::*;
pub use ipc::*;
