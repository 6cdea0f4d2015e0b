//! Ports module for the Correlation Queue

pub mod inbound;
pub mod outbound;

pub use inbound::RequestManagerApi;
pub use outbound::{MirrorChannel, SurfaceGateway};
