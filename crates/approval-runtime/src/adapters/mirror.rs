//! # Mirror Bus Adapter
//!
//! Publishes queue snapshots onto the shared mirror bus.

use ag_01_correlation_queue::MirrorChannel;
use async_trait::async_trait;
use shared_bus::{InMemoryMirrorBus, MirrorEvent, MirrorPublisher};
use shared_types::entities::{Payload, PendingRequest};
use std::sync::Arc;
use tracing::trace;

/// `MirrorChannel` backed by an [`InMemoryMirrorBus`].
pub struct MirrorBusAdapter<P: Payload> {
    bus: Arc<InMemoryMirrorBus<P>>,
}

impl<P: Payload> MirrorBusAdapter<P> {
    pub fn new(bus: Arc<InMemoryMirrorBus<P>>) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl<P: Payload> MirrorChannel<P> for MirrorBusAdapter<P> {
    async fn publish_pending(&self, requests: Vec<PendingRequest<P>>) -> usize {
        trace!(pending = requests.len(), "Mirroring pending requests");
        self.bus
            .publish(MirrorEvent::PendingRequestsChanged { requests })
            .await
    }
}
