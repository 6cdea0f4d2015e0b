//! Error types for the Surface Arbiter

use crate::domain::WindowId;
use thiserror::Error;

/// Failures reported by the host window manager.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host window API could not be reached or refused the call.
    #[error("Window host unavailable: {reason}")]
    Unavailable { reason: String },

    /// The window does not exist (closed, or never existed).
    #[error("Unknown window: {window_id}")]
    UnknownWindow { window_id: WindowId },
}

/// Surface Arbiter errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The host did not hand back a usable window.
    #[error("Failed to open interactive surface: {reason}")]
    OpenFailed { reason: String },

    /// A host call failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Result type for arbiter operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;
