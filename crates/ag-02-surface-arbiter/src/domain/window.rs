//! Host window model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the host assigns to a window.
///
/// Hosts may hand out the same number again once a window is closed, so an
/// id alone never proves a window is ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for WindowId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Kind of host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    /// Regular browser/application window.
    Normal,
    /// Small chrome-less window; the approval surface is always one of these.
    Popup,
    Panel,
    App,
    DevTools,
}

/// A window as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    /// Host id; `None` when the host could not assign one.
    pub id: Option<WindowId>,
    pub kind: WindowKind,
}

impl WindowInfo {
    pub fn new(id: impl Into<WindowId>, kind: WindowKind) -> Self {
        Self {
            id: Some(id.into()),
            kind,
        }
    }

    pub fn popup(id: impl Into<WindowId>) -> Self {
        Self::new(id, WindowKind::Popup)
    }

    /// True if this is a popup carrying exactly `id`.
    #[must_use]
    pub fn is_surface(&self, id: WindowId) -> bool {
        self.kind == WindowKind::Popup && self.id == Some(id)
    }
}

/// What the host should open when a new surface is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Page loaded into the surface.
    pub entry: String,
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            entry: "popup.html".to_string(),
            width: 357,
            height: 600,
        }
    }
}
