//! Pending-request queue and its id → completion-handle mapping.
//!
//! Pure state: no I/O and no awaiting. The service layer owns one instance
//! and feeds it commands one at a time.

use crate::error::{QueueError, QueueResult};
use shared_types::entities::{Payload, PendingRequest, RequestId, RequestType, ResolutionAction};
use shared_types::ipc::FinalizedRequest;
use std::collections::HashMap;
use tokio::sync::oneshot;

/// What a finalize did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// The verdict reached the request's waiter.
    Delivered {
        id: RequestId,
        action: ResolutionAction,
    },
    /// The request was removed but nobody was waiting for it: the waiter
    /// went away, or the listener was never claimed.
    Abandoned { id: RequestId },
    /// No pending request has this id; nothing changed.
    Unmatched,
}

impl FinalizeOutcome {
    /// True when a pending request was removed.
    #[must_use]
    pub fn matched(&self) -> bool {
        !matches!(self, Self::Unmatched)
    }
}

/// Ordered pending requests plus one completion handle per request.
///
/// The sender half of each handle stays here until finalize. The receiver
/// half either goes straight back to the caller (`enqueue_claimed`) or is
/// parked until a waiter claims it. Finalize drops any receiver still
/// parked, so nothing outlives its request.
#[derive(Debug)]
pub struct CorrelationQueue<P> {
    pending: Vec<PendingRequest<P>>,
    /// `None` once every id has been handed out.
    next_id: Option<RequestId>,
    resolvers: HashMap<RequestId, oneshot::Sender<ResolutionAction>>,
    listeners: HashMap<RequestId, oneshot::Receiver<ResolutionAction>>,
}

impl<P: Payload> CorrelationQueue<P> {
    /// Empty queue whose first id is `0`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: Some(RequestId::FIRST),
            resolvers: HashMap::new(),
            listeners: HashMap::new(),
        }
    }

    /// Append a request and return its freshly allocated id.
    ///
    /// The completion receiver is parked for a later `take_listener`.
    pub fn enqueue(
        &mut self,
        request_type: RequestType,
        payload: Option<P>,
    ) -> QueueResult<RequestId> {
        let (id, listener) = self.enqueue_claimed(request_type, payload)?;
        self.listeners.insert(id, listener);
        Ok(id)
    }

    /// Append a request and hand its completion receiver straight back.
    ///
    /// No finalize can slip in between allocation and claim, so the holder
    /// sees the verdict however early it arrives.
    pub fn enqueue_claimed(
        &mut self,
        request_type: RequestType,
        payload: Option<P>,
    ) -> QueueResult<(RequestId, oneshot::Receiver<ResolutionAction>)> {
        let id = self.next_id.ok_or(QueueError::IdSpaceExhausted)?;
        self.next_id = id.checked_next();

        let (tx, rx) = oneshot::channel();
        self.resolvers.insert(id, tx);
        self.pending.push(PendingRequest::new(id, request_type, payload));
        Ok((id, rx))
    }

    /// Hand out the parked completion receiver for `id`. Succeeds at most once.
    pub fn take_listener(&mut self, id: RequestId) -> Option<oneshot::Receiver<ResolutionAction>> {
        self.listeners.remove(&id)
    }

    /// Apply a verdict from the surface.
    ///
    /// Missing fields are rejected before anything is touched. An id that is
    /// not pending (or not even a valid id) is a silent no-op.
    pub fn finalize(&mut self, request: &FinalizedRequest) -> QueueResult<FinalizeOutcome> {
        let raw_id = request
            .id()
            .ok_or(QueueError::InvalidArgument { field: "id" })?;
        let action = request
            .action()
            .ok_or(QueueError::InvalidArgument { field: "action" })?;

        let Ok(id) = raw_id.parse::<RequestId>() else {
            return Ok(FinalizeOutcome::Unmatched);
        };

        self.pending.retain(|pending| pending.id != id);

        let Some(resolver) = self.resolvers.remove(&id) else {
            return Ok(FinalizeOutcome::Unmatched);
        };

        // Still parked: nobody claimed it, so nobody will ever read it.
        if self.listeners.remove(&id).is_some() {
            return Ok(FinalizeOutcome::Abandoned { id });
        }

        match resolver.send(action.clone()) {
            Ok(()) => Ok(FinalizeOutcome::Delivered { id, action }),
            Err(_) => Ok(FinalizeOutcome::Abandoned { id }),
        }
    }

    /// Copy of the pending list in arrival order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PendingRequest<P>> {
        self.pending.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: RequestId) -> bool {
        self.pending.iter().any(|pending| pending.id == id)
    }

    /// Receivers enqueued without a claim and not yet taken.
    #[must_use]
    pub fn parked_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// The id the next enqueue will receive, `None` once ids run out.
    #[must_use]
    pub fn peek_next_id(&self) -> Option<RequestId> {
        self.next_id
    }
}

impl<P: Payload> Default for CorrelationQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}
