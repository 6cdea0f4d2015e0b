//! Driven Ports (SPI - Outbound Dependencies)

use crate::error::QueueResult;
use async_trait::async_trait;
use shared_types::entities::{Payload, PendingRequest};

/// Pushes the full pending list to whoever renders it.
#[async_trait]
pub trait MirrorChannel<P: Payload>: Send + Sync {
    /// Publish a snapshot.
    ///
    /// # Returns
    /// Number of observers that received it; zero is not an error.
    async fn publish_pending(&self, requests: Vec<PendingRequest<P>>) -> usize;
}

/// Makes sure the user can see the approval surface.
#[async_trait]
pub trait SurfaceGateway: Send + Sync {
    /// Focus the existing surface or open a new one.
    ///
    /// Fails with `QueueError::SurfaceOpenFailed` when nothing can be shown.
    async fn ensure_surface_visible(&self) -> QueueResult<()>;
}
