//! # Surface Adapter
//!
//! Lets the correlation queue ask the surface arbiter for a visible popup,
//! and announces the outcome on the mirror bus.

use ag_01_correlation_queue::{QueueError, QueueResult, SurfaceGateway};
use ag_02_surface_arbiter::{SurfaceArbiter, SurfaceArbiterApi, WindowHost};
use async_trait::async_trait;
use shared_bus::{InMemoryMirrorBus, MirrorEvent, MirrorPublisher};
use shared_types::entities::Payload;
use std::sync::Arc;
use tracing::{debug, warn};

/// `SurfaceGateway` backed by a [`SurfaceArbiter`].
pub struct ArbiterSurfaceAdapter<H: WindowHost, P: Payload> {
    arbiter: Arc<SurfaceArbiter<H>>,
    bus: Arc<InMemoryMirrorBus<P>>,
}

impl<H: WindowHost, P: Payload> ArbiterSurfaceAdapter<H, P> {
    pub fn new(arbiter: Arc<SurfaceArbiter<H>>, bus: Arc<InMemoryMirrorBus<P>>) -> Self {
        Self { arbiter, bus }
    }
}

#[async_trait]
impl<H, P> SurfaceGateway for ArbiterSurfaceAdapter<H, P>
where
    H: WindowHost + 'static,
    P: Payload,
{
    async fn ensure_surface_visible(&self) -> QueueResult<()> {
        match self.arbiter.ensure_surface_visible().await {
            Ok(action) => {
                let window_id = action.window_id();
                debug!(window_id = %window_id, opened = action.is_opened(), "Surface visible");
                self.bus
                    .publish(MirrorEvent::SurfaceActivated {
                        window_id: window_id.0,
                        opened: action.is_opened(),
                    })
                    .await;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Surface arbiter could not show a surface");
                Err(QueueError::SurfaceOpenFailed {
                    reason: e.to_string(),
                })
            }
        }
    }
}
