//! Ports module for the Surface Arbiter

pub mod inbound;
pub mod outbound;

pub use inbound::{SurfaceAction, SurfaceArbiterApi};
pub use outbound::WindowHost;
