//! Driving Ports (API - Inbound)

use crate::domain::WindowId;
use crate::error::SurfaceResult;
use async_trait::async_trait;

/// What `ensure_surface_visible` ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceAction {
    /// The tracked surface was still open and was brought to the front.
    Focused(WindowId),
    /// A new surface was opened and is now tracked.
    Opened(WindowId),
}

impl SurfaceAction {
    /// Window the surface lives in after the call.
    #[must_use]
    pub fn window_id(&self) -> WindowId {
        match self {
            Self::Focused(id) | Self::Opened(id) => *id,
        }
    }

    #[must_use]
    pub fn is_opened(&self) -> bool {
        matches!(self, Self::Opened(_))
    }
}

/// Primary Surface Arbiter API
#[async_trait]
pub trait SurfaceArbiterApi: Send + Sync {
    /// Make sure exactly one interactive surface is visible.
    ///
    /// Reuses the tracked surface when the host still reports it as an open
    /// popup, otherwise opens a new one and starts tracking it.
    async fn ensure_surface_visible(&self) -> SurfaceResult<SurfaceAction>;

    /// Currently tracked surface, if any.
    async fn tracked_surface(&self) -> Option<WindowId>;
}
