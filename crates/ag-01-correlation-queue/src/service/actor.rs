//! The task that owns the queue.
//!
//! Commands are handled strictly one after another, including the awaits on
//! the mirror channel and the surface gateway, so no two operations ever see
//! the queue half-updated.

use super::commands::{Command, Reply};
use super::PendingApproval;
use crate::domain::{CorrelationQueue, FinalizeOutcome, QueueStats};
use crate::error::QueueResult;
use crate::ports::outbound::{MirrorChannel, SurfaceGateway};
use shared_types::entities::{Payload, RequestId, RequestType, ResolutionAction};
use shared_types::ipc::FinalizedRequest;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub(crate) struct QueueActor<P, M, S>
where
    P: Payload,
    M: MirrorChannel<P>,
    S: SurfaceGateway,
{
    queue: CorrelationQueue<P>,
    mirror: Arc<M>,
    surface: Arc<S>,
    stats: Arc<QueueStats>,
    commands: mpsc::Receiver<Command<P>>,
}

impl<P, M, S> QueueActor<P, M, S>
where
    P: Payload,
    M: MirrorChannel<P>,
    S: SurfaceGateway,
{
    pub(crate) fn new(
        mirror: Arc<M>,
        surface: Arc<S>,
        stats: Arc<QueueStats>,
        commands: mpsc::Receiver<Command<P>>,
    ) -> Self {
        Self {
            queue: CorrelationQueue::new(),
            mirror,
            surface,
            stats,
            commands,
        }
    }

    /// Drain commands until shutdown or until every handle is dropped.
    ///
    /// Returning drops the queue and with it every completion sender, which
    /// wakes any remaining waiter with `Unresolved`.
    pub(crate) async fn run(mut self) {
        info!("Request manager started");

        while let Some(command) = self.commands.recv().await {
            debug!(command = command.name(), "Handling queue command");
            match command {
                Command::Enqueue {
                    request_type,
                    payload,
                    reply,
                } => {
                    let result = self.enqueue(request_type, payload).await;
                    respond(reply, result);
                }
                Command::Submit {
                    request_type,
                    payload,
                    reply,
                } => {
                    let result = self.submit(request_type, payload).await;
                    respond(reply, result);
                }
                Command::Listen { id, reply } => {
                    respond(reply, self.queue.take_listener(id));
                }
                Command::Finalize { request, reply } => {
                    let result = self.finalize(&request).await;
                    respond(reply, result);
                }
                Command::List { reply } => {
                    respond(reply, self.queue.snapshot());
                }
                Command::Shutdown => break,
            }
        }

        info!(
            abandoned = self.queue.len(),
            "Request manager stopped; pending requests will never resolve"
        );
    }

    async fn enqueue(
        &mut self,
        request_type: RequestType,
        payload: Option<P>,
    ) -> QueueResult<RequestId> {
        let id = self.queue.enqueue(request_type, payload)?;
        self.admit(id, request_type).await?;
        Ok(id)
    }

    async fn submit(
        &mut self,
        request_type: RequestType,
        payload: Option<P>,
    ) -> QueueResult<PendingApproval> {
        let (id, listener) = self.queue.enqueue_claimed(request_type, payload)?;
        self.admit(id, request_type).await?;
        Ok(PendingApproval::new(id, listener))
    }

    /// Count, mirror and surface a request that was just queued.
    async fn admit(&self, id: RequestId, request_type: RequestType) -> QueueResult<()> {
        QueueStats::bump(&self.stats.total_enqueued);
        debug!(
            request_id = %id,
            request_type = %request_type,
            pending = self.queue.len(),
            "Request enqueued"
        );

        self.mirror().await;

        if let Err(e) = self.surface.ensure_surface_visible().await {
            QueueStats::bump(&self.stats.total_surface_failures);
            warn!(request_id = %id, error = %e, "No surface for pending request");
            return Err(e);
        }

        Ok(())
    }

    async fn finalize(&mut self, request: &FinalizedRequest) -> QueueResult<bool> {
        let outcome = self.queue.finalize(request)?;

        match &outcome {
            FinalizeOutcome::Delivered { id, action } => {
                let counter = match action {
                    ResolutionAction::Accept => &self.stats.total_accepted,
                    ResolutionAction::Reject => &self.stats.total_rejected,
                    ResolutionAction::Other(_) => &self.stats.total_unsupported,
                };
                QueueStats::bump(counter);
                debug!(request_id = %id, action = %action, "Request finalized");
            }
            FinalizeOutcome::Abandoned { id } => {
                QueueStats::bump(&self.stats.total_abandoned);
                debug!(request_id = %id, "Request finalized with nobody waiting");
            }
            FinalizeOutcome::Unmatched => {
                QueueStats::bump(&self.stats.total_unmatched);
                warn!(request_id = ?request.id, "Finalize for unknown or already finalized request");
            }
        }

        self.mirror().await;
        Ok(outcome.matched())
    }

    async fn mirror(&self) {
        let receivers = self.mirror.publish_pending(self.queue.snapshot()).await;
        debug!(receivers, pending = self.queue.len(), "Pending list mirrored");
    }
}

fn respond<T>(reply: Reply<T>, value: T) {
    if reply.send(value).is_err() {
        debug!("Caller dropped before the queue replied");
    }
}
