//! Driving Ports (API - Inbound)

use crate::error::QueueResult;
use async_trait::async_trait;
use shared_types::entities::{Payload, PendingRequest, RequestId, RequestType};
use shared_types::ipc::FinalizedRequest;

/// Primary Request Manager API
///
/// The rest of the background process only ever calls `request_approval`;
/// the remaining operations serve the surface side (finalize, list) and
/// tests.
#[async_trait]
pub trait RequestManagerApi<P: Payload>: Send + Sync {
    /// Queue a request, mirror the new list and make sure a surface is up.
    ///
    /// # Returns
    /// * The id assigned to the request. On `SurfaceOpenFailed` the request
    ///   stays queued and can still be finalized from a later surface.
    async fn enqueue(&self, request_type: RequestType, payload: Option<P>)
        -> QueueResult<RequestId>;

    /// Wait for the verdict on `id`, resuming with `data` on accept.
    ///
    /// Only one waiter per id; no timeout. A request finalized before anyone
    /// waited is gone, and waiting on it fails with `UnknownRequest`.
    async fn suspend_until_resolved<T: Send + 'static>(
        &self,
        id: RequestId,
        data: T,
    ) -> QueueResult<T>;

    /// Apply a verdict from the surface.
    ///
    /// # Returns
    /// * `true` if a pending request was matched, `false` for a no-op.
    async fn finalize(&self, request: FinalizedRequest) -> QueueResult<bool>;

    /// Pending requests in arrival order.
    async fn list(&self) -> QueueResult<Vec<PendingRequest<P>>>;

    /// Whether anything is waiting for the user.
    async fn has_pending(&self) -> QueueResult<bool> {
        Ok(!self.list().await?.is_empty())
    }

    /// Ask the user to approve an action; resolves to `data` on accept.
    ///
    /// The default waits only after enqueue returns, so a verdict that lands
    /// in between is lost. Implementations that can claim the verdict while
    /// enqueuing should override it.
    async fn request_approval<T: Send + 'static>(
        &self,
        data: T,
        request_type: RequestType,
        payload: Option<P>,
    ) -> QueueResult<T> {
        let id = self.enqueue(request_type, payload).await?;
        self.suspend_until_resolved(id, data).await
    }
}
