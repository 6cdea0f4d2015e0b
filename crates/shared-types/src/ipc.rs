//! # IPC Message Payloads
//!
//! Messages exchanged with the interactive surface.
//!
//! ## Design Rules
//!
//! - The surface lives in another process; everything here is plain JSON.
//! - Fields the surface might omit are `Option` so validation happens in
//!   the queue, where a missing field is reported as an invalid argument
//!   instead of a decode failure.

use crate::entities::{RequestId, ResolutionAction};
use serde::{Deserialize, Serialize};

/// Verdict sent by the surface for one pending request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedRequest {
    /// Correlation id echoed back from the mirrored snapshot.
    #[serde(default)]
    pub id: Option<String>,
    /// `accept`, `reject`, or anything else the surface chose to send.
    #[serde(default)]
    pub action: Option<String>,
}

impl FinalizedRequest {
    /// Build a finalize message for a known id.
    pub fn new(id: RequestId, action: impl Into<String>) -> Self {
        Self {
            id: Some(id.to_string()),
            action: Some(action.into()),
        }
    }

    /// Build a finalize message from raw wire strings.
    pub fn raw(id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            action: Some(action.into()),
        }
    }

    /// The id, if present and non-blank.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// The action, if present and non-blank.
    #[must_use]
    pub fn action(&self) -> Option<ResolutionAction> {
        self.action
            .as_deref()
            .filter(|action| !action.trim().is_empty())
            .map(ResolutionAction::from)
    }
}
