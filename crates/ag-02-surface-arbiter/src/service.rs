//! Surface Arbiter Service - single-flight surface management

use crate::domain::{find_live_surface, SurfaceConfig, WindowId};
use crate::error::{HostError, SurfaceError, SurfaceResult};
use crate::ports::inbound::{SurfaceAction, SurfaceArbiterApi};
use crate::ports::outbound::WindowHost;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Counters for arbitration outcomes.
#[derive(Debug, Default)]
pub struct ArbiterStats {
    /// Surfaces opened.
    pub opened: AtomicU64,
    /// Existing surfaces focused.
    pub focused: AtomicU64,
    /// Open attempts that produced no usable window.
    pub open_failures: AtomicU64,
}

/// Keeps at most one interactive surface alive.
///
/// The tracked id sits behind an async mutex held for the whole
/// list → focus/open sequence, so two concurrent callers can never both
/// decide that a new window is needed.
pub struct SurfaceArbiter<H: WindowHost> {
    host: Arc<H>,
    config: SurfaceConfig,
    tracked: Mutex<Option<WindowId>>,
    stats: ArbiterStats,
}

impl<H: WindowHost> SurfaceArbiter<H> {
    /// Create an arbiter with nothing tracked yet.
    pub fn new(host: Arc<H>, config: SurfaceConfig) -> Self {
        Self {
            host,
            config,
            tracked: Mutex::new(None),
            stats: ArbiterStats::default(),
        }
    }

    /// Get statistics
    pub fn stats(&self) -> &ArbiterStats {
        &self.stats
    }

    /// Surface configuration handed to the host on open.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    async fn open_surface(&self, tracked: &mut Option<WindowId>) -> SurfaceResult<SurfaceAction> {
        let opened = self.host.open_interactive_surface(&self.config).await?;

        let Some(window) = opened else {
            self.stats.open_failures.fetch_add(1, Ordering::Relaxed);
            return Err(SurfaceError::OpenFailed {
                reason: "host returned no window".to_string(),
            });
        };
        let Some(window_id) = window.id else {
            self.stats.open_failures.fetch_add(1, Ordering::Relaxed);
            return Err(SurfaceError::OpenFailed {
                reason: "host returned a window without an id".to_string(),
            });
        };

        *tracked = Some(window_id);
        self.stats.opened.fetch_add(1, Ordering::Relaxed);
        info!(
            window_id = %window_id,
            entry = %self.config.entry,
            "Opened interactive surface"
        );
        Ok(SurfaceAction::Opened(window_id))
    }
}

#[async_trait]
impl<H: WindowHost> SurfaceArbiterApi for SurfaceArbiter<H> {
    async fn ensure_surface_visible(&self) -> SurfaceResult<SurfaceAction> {
        let mut tracked = self.tracked.lock().await;

        let windows = self.host.list_windows().await?;
        let Some(window_id) = find_live_surface(&windows, *tracked) else {
            debug!(tracked = ?*tracked, "No live surface, opening a new one");
            return self.open_surface(&mut *tracked).await;
        };

        match self.host.focus_window(window_id).await {
            Ok(()) => {
                self.stats.focused.fetch_add(1, Ordering::Relaxed);
                debug!(window_id = %window_id, "Focused existing surface");
                Ok(SurfaceAction::Focused(window_id))
            }
            // Closed between list and focus.
            Err(HostError::UnknownWindow { .. }) => {
                warn!(window_id = %window_id, "Surface vanished before focus, reopening");
                self.open_surface(&mut *tracked).await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn tracked_surface(&self) -> Option<WindowId> {
        *self.tracked.lock().await
    }
}
