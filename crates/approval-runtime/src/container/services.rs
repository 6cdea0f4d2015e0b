//! # Service Wiring

use crate::adapters::{ArbiterSurfaceAdapter, MirrorBusAdapter};
use crate::container::config::RuntimeConfig;
use ag_01_correlation_queue::RequestManager;
use ag_02_surface_arbiter::{SurfaceArbiter, WindowHost};
use serde_json::Value;
use shared_bus::InMemoryMirrorBus;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Running approval core.
///
/// Payloads are arbitrary JSON since the runtime only relays them between
/// the stdio protocol and the mirror bus.
pub struct ApprovalContainer<H: WindowHost + 'static> {
    /// Configuration the container was built from.
    pub config: RuntimeConfig,
    /// Snapshot and surface events for observers.
    pub mirror_bus: Arc<InMemoryMirrorBus<Value>>,
    /// Single-flight popup management.
    pub arbiter: Arc<SurfaceArbiter<H>>,
    /// Handle to the correlation queue task.
    pub requests: RequestManager<Value>,
    queue_task: JoinHandle<()>,
}

impl<H: WindowHost + 'static> ApprovalContainer<H> {
    /// Build every component and start the queue task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: RuntimeConfig, host: Arc<H>) -> Self {
        let mirror_bus = Arc::new(InMemoryMirrorBus::with_capacity(config.mirror_capacity));
        let arbiter = Arc::new(SurfaceArbiter::new(host, config.surface.clone()));

        let mirror = Arc::new(MirrorBusAdapter::new(Arc::clone(&mirror_bus)));
        let surface = Arc::new(ArbiterSurfaceAdapter::new(
            Arc::clone(&arbiter),
            Arc::clone(&mirror_bus),
        ));
        let (requests, queue_task) = RequestManager::spawn(config.queue.clone(), mirror, surface);

        info!(
            mirror_capacity = config.mirror_capacity,
            command_buffer = config.queue.command_buffer,
            surface_entry = %config.surface.entry,
            "Approval container ready"
        );

        Self {
            config,
            mirror_bus,
            arbiter,
            requests,
            queue_task,
        }
    }

    /// Stop the queue task and wait for it to exit.
    ///
    /// Callers still waiting for a verdict resume with `Unresolved`. Once the
    /// queue task is gone the mirror bus is released, so event streams end
    /// after delivering what was already published.
    pub async fn shutdown(self) {
        let stats = self.requests.stats().snapshot();
        info!(?stats, "Shutting down approval container");

        self.requests.shutdown().await;
        match tokio::time::timeout(SHUTDOWN_GRACE, self.queue_task).await {
            Ok(Ok(())) => info!("Queue task stopped"),
            Ok(Err(e)) => warn!(error = %e, "Queue task ended abnormally"),
            Err(_) => warn!("Queue task did not stop in time"),
        }
    }
}
