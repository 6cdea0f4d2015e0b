//! # ag-01-correlation-queue
//!
//! Correlates approval requests with the verdicts that come back from the
//! interactive surface.
//!
//! ## Overview
//!
//! A caller in the background process asks for approval and is suspended
//! until a human accepts or rejects in a separate surface process. This crate
//! provides:
//! - **Ordered queue**: pending requests in arrival order, ids from a
//!   per-instance counter that is never reset
//! - **One-shot resolution**: one completion handle per id, so a verdict
//!   wakes exactly one caller, exactly once
//! - **Serialized mutation**: every operation is a command handled by a
//!   single task; enqueue and finalize never interleave
//!
//! ```text
//! caller ──request_approval──→ [enqueue] ──snapshot──→ MirrorChannel
//!    ↑                             │
//!    │                             └──→ SurfaceGateway (focus or open)
//!    │
//!    └──── accept / reject ──── [finalize] ←──{id, action}── surface
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use ag_01_correlation_queue::{QueueConfig, RequestManager, RequestManagerApi};
//! use shared_types::RequestType;
//!
//! let (manager, _task) = RequestManager::spawn(QueueConfig::default(), mirror, surface);
//!
//! let signed = manager
//!     .request_approval(message, RequestType::Sign, Some(payload))
//!     .await?;
//! ```

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{CorrelationQueue, FinalizeOutcome, QueueStats, QueueStatsSnapshot};
pub use error::{QueueError, QueueResult};
pub use ports::inbound::RequestManagerApi;
pub use ports::outbound::{MirrorChannel, SurfaceGateway};
pub use service::{PendingApproval, QueueConfig, RequestManager};
