//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::{SurfaceConfig, WindowId, WindowInfo};
use crate::error::HostError;
use async_trait::async_trait;

/// Window-management facility supplied by the host environment.
#[async_trait]
pub trait WindowHost: Send + Sync {
    /// Every window currently open.
    async fn list_windows(&self) -> Result<Vec<WindowInfo>, HostError>;

    /// Open a new interactive surface.
    ///
    /// `Ok(None)` means the host accepted the call but produced no window.
    async fn open_interactive_surface(
        &self,
        config: &SurfaceConfig,
    ) -> Result<Option<WindowInfo>, HostError>;

    /// Bring a window to the foreground.
    async fn focus_window(&self, window_id: WindowId) -> Result<(), HostError>;
}
