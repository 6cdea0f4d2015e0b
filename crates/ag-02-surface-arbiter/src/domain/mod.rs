//! Domain layer for the Surface Arbiter

pub mod selection;
pub mod window;

pub use selection::find_live_surface;
pub use window::{SurfaceConfig, WindowId, WindowInfo, WindowKind};
