//! Error types for the Correlation Queue

use shared_types::entities::RequestId;
use thiserror::Error;

/// Correlation Queue errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// A finalize message is missing a required field.
    #[error("Invalid argument: {field} not provided")]
    InvalidArgument { field: &'static str },

    /// The surface answered with something other than accept/reject.
    #[error("Action {action:?} not supported for request {id}")]
    UnsupportedAction { id: RequestId, action: String },

    /// No interactive surface could be shown for a new request.
    #[error("Failed to open interactive surface: {reason}")]
    SurfaceOpenFailed { reason: String },

    /// The user rejected the request. Carries no reason on purpose.
    #[error("Request rejected")]
    Rejected,

    /// Nobody can wait on this id: it was never enqueued here, or a waiter
    /// already claimed it.
    #[error("No waitable request with id {id}")]
    UnknownRequest { id: RequestId },

    /// The request was dropped without a verdict (queue shut down).
    #[error("Request {id} was never resolved")]
    Unresolved { id: RequestId },

    /// Every request id has been handed out; nothing more can be queued.
    #[error("Request id space exhausted")]
    IdSpaceExhausted,

    /// The queue task is gone.
    #[error("Request manager stopped")]
    ManagerStopped,
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
