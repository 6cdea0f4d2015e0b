//! # Adapter Implementations
//!
//! Concrete implementations of the correlation queue's outbound ports:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ag-01-correlation-queue                                     │
//! │      trait MirrorChannel          trait SurfaceGateway       │
//! └──────────────┬───────────────────────────┬───────────────────┘
//!                │ implements                │ implements
//!        MirrorBusAdapter           ArbiterSurfaceAdapter
//!                │                           │
//!                ▼                           ▼
//!        InMemoryMirrorBus ←── surfaceActivated ── SurfaceArbiter
//! ```

pub mod mirror;
pub mod surface;

pub use mirror::MirrorBusAdapter;
pub use surface::ArbiterSurfaceAdapter;
