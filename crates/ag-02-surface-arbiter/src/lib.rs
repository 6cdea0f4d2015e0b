//! # ag-02-surface-arbiter
//!
//! Keeps exactly one interactive approval surface on screen.
//!
//! ## Overview
//!
//! The background process cannot render UI, so every pending request needs
//! a popup the user can act on. The arbiter:
//! - **Reuses** the tracked popup by focusing it when it is still open
//! - **Reopens** a popup when the tracked one was closed
//! - **Checks kind, not just id**: hosts recycle window ids
//!
//! ```text
//! ensure_surface_visible()
//!     │
//!     ├── list_windows() ──→ tracked id open as popup? ──yes──→ focus_window(id)
//!     │                                   │
//!     │                                   no
//!     │                                   ▼
//!     └────────────────────────── open_interactive_surface() ──→ track new id
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use ag_02_surface_arbiter::{InMemoryWindowHost, SurfaceArbiter, SurfaceArbiterApi, SurfaceConfig};
//!
//! let arbiter = SurfaceArbiter::new(Arc::new(InMemoryWindowHost::new()), SurfaceConfig::default());
//! let action = arbiter.ensure_surface_visible().await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryWindowHost, OpenFailure};
pub use domain::{SurfaceConfig, WindowId, WindowInfo, WindowKind};
pub use error::{HostError, SurfaceError, SurfaceResult};
pub use ports::inbound::{SurfaceAction, SurfaceArbiterApi};
pub use ports::outbound::WindowHost;
pub use service::{ArbiterStats, SurfaceArbiter};
