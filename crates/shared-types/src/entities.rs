//! # Core Domain Entities
//!
//! Defines the approval-request entities shared by the correlation queue,
//! the mirror bus and the runtime.
//!
//! ## Clusters
//!
//! - **Requests**: `RequestId`, `RequestType`, `PendingRequest`
//! - **Resolution**: `ResolutionAction`

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseIdError;

/// Marker for payloads that can travel through the queue and the mirror bus.
///
/// The core never inspects a payload; it only clones it into snapshots and
/// hands it to subscribers, possibly on other tasks.
pub trait Payload: Clone + fmt::Debug + Send + Sync + 'static {}

impl<T> Payload for T where T: Clone + fmt::Debug + Send + Sync + 'static {}

// =============================================================================
// CLUSTER A: REQUESTS
// =============================================================================

/// Correlation id of a pending request.
///
/// Allocated from a counter owned by one queue instance. On the wire it is a
/// decimal string (`"0"`, `"1"`, ...), which is what the surface echoes back
/// when it finalizes.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(#[serde_as(as = "DisplayFromStr")] u64);

impl RequestId {
    /// The id handed out first by a fresh queue.
    pub const FIRST: Self = Self(0);

    /// Wrap a raw counter value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw counter value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The id that follows this one, or `None` once the counter is spent.
    #[must_use]
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RequestId {
    type Err = ParseIdError;

    /// Only the canonical decimal form is accepted: no sign, no padding,
    /// no leading zeros. Ids are matched by their exact wire text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseIdError { raw: s.to_string() };
        let value = s.parse::<u64>().map_err(|_| invalid())?;
        if value.to_string() != s {
            return Err(invalid());
        }
        Ok(Self(value))
    }
}

/// Kind of approval being asked for.
///
/// Closed set owned by the wallet side; the queue only carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// Sign an arbitrary message.
    Sign,
    /// Generate a Semaphore proof.
    SemaphoreProof,
    /// Generate an RLN proof.
    RlnProof,
    /// Let a web origin connect to the wallet.
    ConnectOrigin,
    /// Create a new identity.
    CreateIdentity,
    /// Placeholder used by development tooling.
    Dummy,
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sign => "sign",
            Self::SemaphoreProof => "semaphore_proof",
            Self::RlnProof => "rln_proof",
            Self::ConnectOrigin => "connect_origin",
            Self::CreateIdentity => "create_identity",
            Self::Dummy => "dummy",
        };
        f.write_str(name)
    }
}

/// A request waiting for a human verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingRequest<P> {
    /// Correlation id, stable for the request's lifetime.
    pub id: RequestId,
    /// What is being approved.
    #[serde(rename = "type")]
    pub request_type: RequestType,
    /// Caller data rendered by the surface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<P>,
}

impl<P> PendingRequest<P> {
    /// Create a new pending request.
    pub fn new(id: RequestId, request_type: RequestType, payload: Option<P>) -> Self {
        Self {
            id,
            request_type,
            payload,
        }
    }
}

// =============================================================================
// CLUSTER B: RESOLUTION
// =============================================================================

/// Verdict delivered by the surface for one request.
///
/// Anything other than `accept` or `reject` is kept verbatim in `Other` so the
/// waiting caller can report exactly what it was sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResolutionAction {
    Accept,
    Reject,
    Other(String),
}

impl ResolutionAction {
    /// Wire name of the action.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Other(action) => action,
        }
    }
}

impl From<&str> for ResolutionAction {
    fn from(action: &str) -> Self {
        match action {
            "accept" => Self::Accept,
            "reject" => Self::Reject,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ResolutionAction {
    fn from(action: String) -> Self {
        match action.as_str() {
            "accept" => Self::Accept,
            "reject" => Self::Reject,
            _ => Self::Other(action),
        }
    }
}

impl From<ResolutionAction> for String {
    fn from(action: ResolutionAction) -> Self {
        match action {
            ResolutionAction::Accept => "accept".to_string(),
            ResolutionAction::Reject => "reject".to_string(),
            ResolutionAction::Other(action) => action,
        }
    }
}

impl fmt::Display for ResolutionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
