//! Request Manager Service - command-channel front of the queue

mod actor;
mod commands;

use self::actor::QueueActor;
use self::commands::Command;
use crate::domain::{resolve, QueueStats};
use crate::error::{QueueError, QueueResult};
use crate::ports::inbound::RequestManagerApi;
use crate::ports::outbound::{MirrorChannel, SurfaceGateway};
use async_trait::async_trait;
use shared_types::entities::{Payload, PendingRequest, RequestId, RequestType, ResolutionAction};
use shared_types::ipc::FinalizedRequest;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

/// Request manager configuration
#[derive(Clone, Debug)]
pub struct QueueConfig {
    /// Commands buffered before callers start waiting to submit.
    pub command_buffer: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self { command_buffer: 64 }
    }
}

/// A queued request whose verdict belongs to the holder.
///
/// The completion receiver is claimed in the same step that allocates the
/// id, so a verdict that lands before `wait` is polled is still delivered.
/// Dropping it abandons the verdict; the request stays finalizable.
#[derive(Debug)]
pub struct PendingApproval {
    id: RequestId,
    listener: oneshot::Receiver<ResolutionAction>,
}

impl PendingApproval {
    pub(crate) fn new(id: RequestId, listener: oneshot::Receiver<ResolutionAction>) -> Self {
        Self { id, listener }
    }

    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Wait for the verdict, resuming with `data` on accept.
    pub async fn wait<T>(self, data: T) -> QueueResult<T> {
        debug!(request_id = %self.id, "Waiting for verdict");
        resolve(self.id, self.listener.await, data)
    }
}

/// Cloneable handle to a running queue task.
///
/// Every operation is a message to the task that owns the queue; the task
/// stops once the last handle is dropped.
pub struct RequestManager<P: Payload> {
    commands: mpsc::Sender<Command<P>>,
    stats: Arc<QueueStats>,
}

impl<P: Payload> Clone for RequestManager<P> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<P: Payload> RequestManager<P> {
    /// Spawn the queue task on the current runtime.
    pub fn spawn<M, S>(config: QueueConfig, mirror: Arc<M>, surface: Arc<S>) -> (Self, JoinHandle<()>)
    where
        M: MirrorChannel<P> + 'static,
        S: SurfaceGateway + 'static,
    {
        let (tx, rx) = mpsc::channel(config.command_buffer.max(1));
        let stats = Arc::new(QueueStats::default());
        let actor = QueueActor::new(mirror, surface, Arc::clone(&stats), rx);
        let task = tokio::spawn(actor.run());

        (
            Self {
                commands: tx,
                stats,
            },
            task,
        )
    }

    /// Get statistics
    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }

    /// Queue a request and claim its verdict in one step.
    ///
    /// Mirrors and surfaces exactly like `enqueue`. On `SurfaceOpenFailed`
    /// the request stays queued but the claim is dropped.
    pub async fn submit(
        &self,
        request_type: RequestType,
        payload: Option<P>,
    ) -> QueueResult<PendingApproval> {
        self.call(|reply| Command::Submit {
            request_type,
            payload,
            reply,
        })
        .await?
    }

    /// Stop the queue task.
    ///
    /// Pending requests are dropped and their waiters resume with
    /// `Unresolved`. Later calls on any handle fail with `ManagerStopped`.
    pub async fn shutdown(&self) {
        if self.commands.send(Command::Shutdown).await.is_err() {
            debug!("Request manager already stopped");
        }
    }

    async fn call<R>(&self, command: impl FnOnce(oneshot::Sender<R>) -> Command<P>) -> QueueResult<R> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| QueueError::ManagerStopped)?;
        response.await.map_err(|_| QueueError::ManagerStopped)
    }
}

#[async_trait]
impl<P: Payload> RequestManagerApi<P> for RequestManager<P> {
    async fn enqueue(
        &self,
        request_type: RequestType,
        payload: Option<P>,
    ) -> QueueResult<RequestId> {
        self.call(|reply| Command::Enqueue {
            request_type,
            payload,
            reply,
        })
        .await?
    }

    async fn suspend_until_resolved<T: Send + 'static>(
        &self,
        id: RequestId,
        data: T,
    ) -> QueueResult<T> {
        let listener = self
            .call(|reply| Command::Listen { id, reply })
            .await?
            .ok_or(QueueError::UnknownRequest { id })?;

        debug!(request_id = %id, "Waiting for verdict");
        resolve(id, listener.await, data)
    }

    async fn finalize(&self, request: FinalizedRequest) -> QueueResult<bool> {
        self.call(|reply| Command::Finalize { request, reply }).await?
    }

    async fn list(&self) -> QueueResult<Vec<PendingRequest<P>>> {
        self.call(|reply| Command::List { reply }).await
    }

    async fn request_approval<T: Send + 'static>(
        &self,
        data: T,
        request_type: RequestType,
        payload: Option<P>,
    ) -> QueueResult<T> {
        self.submit(request_type, payload).await?.wait(data).await
    }
}
