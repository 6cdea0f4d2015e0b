//! Turns a delivered verdict into the waiting caller's outcome.

use crate::error::{QueueError, QueueResult};
use shared_types::entities::{RequestId, ResolutionAction};
use tokio::sync::oneshot::error::RecvError;

/// Map what arrived on a request's completion handle to the caller result.
///
/// `accept` hands back the caller's own `data`; `reject` is an opaque
/// failure; any other action is a contract violation by the surface. A
/// handle dropped without a verdict means the queue went away.
pub fn resolve<T>(
    id: RequestId,
    received: Result<ResolutionAction, RecvError>,
    data: T,
) -> QueueResult<T> {
    match received {
        Ok(ResolutionAction::Accept) => Ok(data),
        Ok(ResolutionAction::Reject) => Err(QueueError::Rejected),
        Ok(ResolutionAction::Other(action)) => Err(QueueError::UnsupportedAction { id, action }),
        Err(_) => Err(QueueError::Unresolved { id }),
    }
}
