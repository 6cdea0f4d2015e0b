//! In-memory window host.
//!
//! Stands in for a real window manager in headless runs and tests. Windows
//! only exist in a list; opening appends a popup, closing removes it.

use crate::domain::{SurfaceConfig, WindowId, WindowInfo, WindowKind};
use crate::error::HostError;
use crate::ports::outbound::WindowHost;
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

/// How the next `open_interactive_surface` call should misbehave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenFailure {
    /// Host answers with no window at all.
    NoWindow,
    /// Host answers with a window that has no id.
    MissingId,
    /// Host call itself fails.
    HostDown,
}

#[derive(Debug, Default)]
struct HostState {
    windows: Vec<WindowInfo>,
    next_id: u64,
    open_calls: usize,
    focus_calls: Vec<WindowId>,
    fail_next_open: Option<OpenFailure>,
}

/// Window host backed by a plain list.
#[derive(Debug, Default)]
pub struct InMemoryWindowHost {
    state: Mutex<HostState>,
}

impl InMemoryWindowHost {
    /// Host with no windows; ids start at 1.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HostState {
                next_id: 1,
                ..HostState::default()
            }),
        }
    }

    /// Host that already shows some windows.
    pub fn with_windows(windows: Vec<WindowInfo>) -> Self {
        let next_id = windows
            .iter()
            .filter_map(|w| w.id)
            .map(|id| id.0 + 1)
            .max()
            .unwrap_or(1);
        Self {
            state: Mutex::new(HostState {
                windows,
                next_id,
                ..HostState::default()
            }),
        }
    }

    /// Simulate the user closing a window. Returns false if it was not open.
    pub fn close(&self, window_id: WindowId) -> bool {
        let mut state = self.state.lock();
        let before = state.windows.len();
        state.windows.retain(|w| w.id != Some(window_id));
        before != state.windows.len()
    }

    /// Add a window the arbiter did not open, e.g. one reusing a freed id.
    pub fn insert(&self, window: WindowInfo) {
        self.state.lock().windows.push(window);
    }

    /// Make the next open call fail in the given way.
    pub fn fail_next_open(&self, failure: OpenFailure) {
        self.state.lock().fail_next_open = Some(failure);
    }

    /// Snapshot of open windows.
    pub fn windows(&self) -> Vec<WindowInfo> {
        self.state.lock().windows.clone()
    }

    /// Number of open popups.
    pub fn popup_count(&self) -> usize {
        self.state
            .lock()
            .windows
            .iter()
            .filter(|w| w.kind == WindowKind::Popup)
            .count()
    }

    /// Number of times a surface open was requested.
    pub fn open_calls(&self) -> usize {
        self.state.lock().open_calls
    }

    /// Windows focused so far, in call order.
    pub fn focus_calls(&self) -> Vec<WindowId> {
        self.state.lock().focus_calls.clone()
    }
}

#[async_trait]
impl WindowHost for InMemoryWindowHost {
    async fn list_windows(&self) -> Result<Vec<WindowInfo>, HostError> {
        Ok(self.windows())
    }

    async fn open_interactive_surface(
        &self,
        config: &SurfaceConfig,
    ) -> Result<Option<WindowInfo>, HostError> {
        let mut state = self.state.lock();
        state.open_calls += 1;

        match state.fail_next_open.take() {
            Some(OpenFailure::NoWindow) => return Ok(None),
            Some(OpenFailure::MissingId) => {
                return Ok(Some(WindowInfo {
                    id: None,
                    kind: WindowKind::Popup,
                }))
            }
            Some(OpenFailure::HostDown) => {
                return Err(HostError::Unavailable {
                    reason: "window manager not responding".to_string(),
                })
            }
            None => {}
        }

        let window = WindowInfo::popup(state.next_id);
        state.next_id += 1;
        state.windows.push(window.clone());
        debug!(
            window_id = ?window.id,
            entry = %config.entry,
            width = config.width,
            height = config.height,
            "In-memory host opened popup"
        );
        Ok(Some(window))
    }

    async fn focus_window(&self, window_id: WindowId) -> Result<(), HostError> {
        let mut state = self.state.lock();
        if !state.windows.iter().any(|w| w.id == Some(window_id)) {
            return Err(HostError::UnknownWindow { window_id });
        }
        state.focus_calls.push(window_id);
        Ok(())
    }
}
