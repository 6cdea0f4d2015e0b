//! # Stdio Protocol
//!
//! Line-delimited JSON between the background process and the surface side.
//!
//! Request (one JSON object per line on stdin):
//!   { "id": "<token>", "op": "<string>", "payload": {...} }
//!
//! Response (one JSON object per line on stdout):
//!   { "id": "<token>", "ok": true|false, "result": {...}, "error": { "code", "message" } }
//!
//! Mirror events share stdout, tagged by `"event"` instead of `"id"`:
//!   { "event": "pendingRequests", "requests": [...] }
//!
//! # Handled Operations
//!
//! - request.new: queued before the next line is read, answered only once
//!   the request is accepted or rejected
//! - request.finalize
//! - request.list
//! - request.pendingStatus
//! - request.stats

use ag_01_correlation_queue::{QueueError, RequestManager, RequestManagerApi};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_bus::EventStream;
use shared_types::entities::RequestType;
use shared_types::ipc::FinalizedRequest;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::{debug, error, info, instrument, warn};

// =============================================================================
// Protocol Types
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ProtocolRequest {
    pub id: String,
    pub op: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolResponse {
    pub id: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ProtocolResponse {
    pub fn ok(id: impl Into<String>, result: Value) -> Self {
        Self {
            id: id.into(),
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(id: impl Into<String>, code: &str, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ok: false,
            result: None,
            error: Some(ErrorBody {
                code: code.to_string(),
                message: message.into(),
            }),
        }
    }

    /// Error response carrying the queue error's code and message.
    pub fn from_queue_error(id: impl Into<String>, error: &QueueError) -> Self {
        Self::err(id, error_code(error), error.to_string())
    }
}

/// Stable wire code for a queue error.
pub fn error_code(error: &QueueError) -> &'static str {
    match error {
        QueueError::InvalidArgument { .. } => "INVALID_ARGUMENT",
        QueueError::UnsupportedAction { .. } => "UNSUPPORTED_ACTION",
        QueueError::SurfaceOpenFailed { .. } => "SURFACE_OPEN_FAILED",
        QueueError::Rejected => "REJECTED",
        QueueError::UnknownRequest { .. } => "UNKNOWN_REQUEST",
        QueueError::Unresolved { .. } => "UNRESOLVED",
        QueueError::IdSpaceExhausted => "ID_SPACE_EXHAUSTED",
        QueueError::ManagerStopped => "MANAGER_STOPPED",
    }
}

/// Payload of `request.new`.
#[derive(Debug, Deserialize)]
struct NewRequest {
    #[serde(rename = "type")]
    request_type: RequestType,
    #[serde(default)]
    payload: Option<Value>,
    /// Returned as the result when the request is accepted.
    #[serde(default)]
    data: Value,
}

// =============================================================================
// Dispatch
// =============================================================================

/// Dispatches protocol requests to the request manager.
///
/// Responses are queued on `out` as serialized lines; a separate task owns
/// the actual writer so deferred `request.new` answers and mirror events can
/// interleave with direct responses.
#[derive(Clone)]
pub struct StdioHandler {
    requests: RequestManager<Value>,
    out: mpsc::Sender<String>,
}

impl StdioHandler {
    pub fn new(requests: RequestManager<Value>, out: mpsc::Sender<String>) -> Self {
        Self { requests, out }
    }

    /// Read requests until EOF.
    pub async fn serve<R>(&self, input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            self.handle_line(&line).await;
        }
        info!("Input closed");
        Ok(())
    }

    /// Handle one raw input line.
    pub async fn handle_line(&self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }

        let request: ProtocolRequest = match serde_json::from_str(trimmed) {
            Ok(request) => request,
            Err(e) => {
                // Can't correlate to an id
                let response = ProtocolResponse::err(
                    String::new(),
                    "PARSE_ERROR",
                    format!("Invalid JSON request: {e}"),
                );
                send_line(&self.out, &response).await;
                return;
            }
        };

        if let Some(response) = self.dispatch(request).await {
            send_line(&self.out, &response).await;
        }
    }

    /// Run one request.
    ///
    /// # Returns
    /// The immediate response, or `None` when the answer is written later
    /// (`request.new`).
    #[instrument(skip(self, request), fields(id = %request.id, op = %request.op))]
    pub async fn dispatch(&self, request: ProtocolRequest) -> Option<ProtocolResponse> {
        debug!("Dispatching");
        let ProtocolRequest { id, op, payload } = request;

        let response = match op.as_str() {
            "request.new" => return self.handle_new(id, payload).await,
            "request.finalize" => self.handle_finalize(id, payload).await,
            "request.list" => match self.requests.list().await {
                Ok(pending) => match serde_json::to_value(pending) {
                    Ok(list) => ProtocolResponse::ok(id, list),
                    Err(e) => ProtocolResponse::err(id, "SERIALIZE_ERROR", e.to_string()),
                },
                Err(e) => ProtocolResponse::from_queue_error(id, &e),
            },
            "request.pendingStatus" => match self.requests.has_pending().await {
                Ok(pending) => ProtocolResponse::ok(id, json!({ "pending": pending })),
                Err(e) => ProtocolResponse::from_queue_error(id, &e),
            },
            "request.stats" => {
                let stats = self.requests.stats().snapshot();
                ProtocolResponse::ok(
                    id,
                    json!({
                        "enqueued": stats.enqueued,
                        "accepted": stats.accepted,
                        "rejected": stats.rejected,
                        "unsupported": stats.unsupported,
                        "unmatched": stats.unmatched,
                        "abandoned": stats.abandoned,
                        "surfaceFailures": stats.surface_failures,
                    }),
                )
            }
            _ => ProtocolResponse::err(
                id,
                "UNKNOWN_OP",
                format!("Approval runtime does not handle op: {op}"),
            ),
        };
        Some(response)
    }

    /// Queue the request inline so later lines see it; only the wait for
    /// the verdict runs on its own task.
    async fn handle_new(&self, id: String, payload: Value) -> Option<ProtocolResponse> {
        let new: NewRequest = match serde_json::from_value(payload) {
            Ok(new) => new,
            Err(e) => return Some(ProtocolResponse::err(id, "INVALID_PAYLOAD", e.to_string())),
        };

        let pending = match self.requests.submit(new.request_type, new.payload).await {
            Ok(pending) => pending,
            Err(e) => {
                debug!(id = %id, error = %e, "Approval request not queued cleanly");
                return Some(ProtocolResponse::from_queue_error(id, &e));
            }
        };

        let out = self.out.clone();
        tokio::spawn(async move {
            let response = match pending.wait(new.data).await {
                Ok(data) => ProtocolResponse::ok(id, data),
                Err(e) => {
                    debug!(id = %id, error = %e, "Approval request ended without acceptance");
                    ProtocolResponse::from_queue_error(id, &e)
                }
            };
            send_line(&out, &response).await;
        });
        None
    }

    async fn handle_finalize(&self, id: String, payload: Value) -> ProtocolResponse {
        let request: FinalizedRequest = match serde_json::from_value(payload) {
            Ok(request) => request,
            Err(e) => return ProtocolResponse::err(id, "INVALID_PAYLOAD", e.to_string()),
        };

        match self.requests.finalize(request).await {
            Ok(matched) => ProtocolResponse::ok(id, json!({ "matched": matched })),
            Err(e) => ProtocolResponse::from_queue_error(id, &e),
        }
    }
}

// =============================================================================
// Output
// =============================================================================

async fn send_line<T: Serialize>(out: &mpsc::Sender<String>, message: &T) -> bool {
    let line = match serde_json::to_string(message) {
        Ok(line) => line,
        Err(e) => {
            error!(error = %e, "Failed to serialize outbound message");
            return true;
        }
    };
    if out.send(line).await.is_err() {
        debug!("Output closed, dropping message");
        return false;
    }
    true
}

/// Copy mirror events to the output until either side closes.
pub async fn forward_mirror(mut events: EventStream<Value>, out: mpsc::Sender<String>) {
    while let Some(event) = events.next().await {
        if !send_line(&out, &event).await {
            break;
        }
    }
    debug!("Mirror forwarding stopped");
}

/// Write queued lines to `output` until every sender is gone.
pub async fn write_lines<W>(mut lines: mpsc::Receiver<String>, mut output: W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = lines.recv().await {
        if let Err(e) = write_line(&mut output, &line).await {
            warn!(error = %e, "Failed to write to output");
            return Err(e);
        }
    }
    Ok(())
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, line: &str) -> io::Result<()> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}
