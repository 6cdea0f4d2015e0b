//! Picks the tracked surface out of the host's window list.

use super::window::{WindowId, WindowInfo};

/// Find the window that is still our surface.
///
/// Matches on id *and* popup kind: before a popup gets its final id the host
/// may briefly show a normal window that reuses a recycled number, and that
/// window must not be mistaken for the surface.
#[must_use]
pub fn find_live_surface(windows: &[WindowInfo], tracked: Option<WindowId>) -> Option<WindowId> {
    let tracked = tracked?;
    windows
        .iter()
        .any(|window| window.is_surface(tracked))
        .then_some(tracked)
}
