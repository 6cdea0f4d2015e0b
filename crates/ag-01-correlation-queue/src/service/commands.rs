//! Messages accepted by the queue task.

use super::PendingApproval;
use crate::error::QueueResult;
use shared_types::entities::{PendingRequest, RequestId, RequestType, ResolutionAction};
use shared_types::ipc::FinalizedRequest;
use tokio::sync::oneshot;

pub(crate) type Reply<T> = oneshot::Sender<T>;

/// One queue operation plus the channel its result goes back on.
pub(crate) enum Command<P> {
    Enqueue {
        request_type: RequestType,
        payload: Option<P>,
        reply: Reply<QueueResult<RequestId>>,
    },
    Submit {
        request_type: RequestType,
        payload: Option<P>,
        reply: Reply<QueueResult<PendingApproval>>,
    },
    Listen {
        id: RequestId,
        reply: Reply<Option<oneshot::Receiver<ResolutionAction>>>,
    },
    Finalize {
        request: FinalizedRequest,
        reply: Reply<QueueResult<bool>>,
    },
    List {
        reply: Reply<Vec<PendingRequest<P>>>,
    },
    Shutdown,
}

impl<P> Command<P> {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Enqueue { .. } => "enqueue",
            Self::Submit { .. } => "submit",
            Self::Listen { .. } => "listen",
            Self::Finalize { .. } => "finalize",
            Self::List { .. } => "list",
            Self::Shutdown => "shutdown",
        }
    }
}
