//! # Shared Bus - Mirror Channel for Pending Requests
//!
//! Carries queue snapshots from the approval core to whatever presentation
//! layer is listening.
//!
//! ```text
//! ┌──────────────────┐                    ┌──────────────────┐
//! │ Correlation Queue│                    │ Interactive      │
//! │                  │    publish()       │ Surface          │
//! │                  │ ──────┐            │                  │
//! └──────────────────┘       │            └──────────────────┘
//!                            ▼                    ↑
//!                      ┌──────────────┐          │
//!                      │  Mirror Bus  │          │
//!                      │              │ ─────────┘
//!                      └──────────────┘  subscribe()
//! ```
//!
//! Every snapshot is the full pending list, so a subscriber that lags or
//! joins late never needs history.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, MirrorEvent};
pub use publisher::{InMemoryMirrorBus, MirrorPublisher};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before old snapshots are skipped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;
