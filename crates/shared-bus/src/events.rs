//! # Mirror Events
//!
//! Defines the events that flow from the approval core to observers such as
//! the interactive surface.

use serde::{Deserialize, Serialize};
use shared_types::entities::PendingRequest;

/// All events that can be published on the mirror bus.
///
/// Every queue mutation produces a full snapshot rather than a delta, so an
/// observer that missed events only needs the latest one to catch up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum MirrorEvent<P> {
    /// The pending list changed (enqueue or finalize).
    #[serde(rename = "pendingRequests")]
    PendingRequestsChanged {
        /// Every pending request, in arrival order.
        requests: Vec<PendingRequest<P>>,
    },

    /// An interactive surface was opened or brought to the foreground.
    #[serde(rename = "surfaceActivated", rename_all = "camelCase")]
    SurfaceActivated {
        /// Host window id of the surface.
        window_id: u64,
        /// True when a new window was created, false when an existing one
        /// was focused.
        opened: bool,
    },
}

impl<P> MirrorEvent<P> {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::PendingRequestsChanged { .. } => EventTopic::PendingRequests,
            Self::SurfaceActivated { .. } => EventTopic::Surface,
        }
    }

    /// Number of pending requests carried, if this is a snapshot.
    #[must_use]
    pub fn pending_len(&self) -> Option<usize> {
        match self {
            Self::PendingRequestsChanged { requests } => Some(requests.len()),
            Self::SurfaceActivated { .. } => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Pending-list snapshots.
    PendingRequests,
    /// Surface lifecycle.
    Surface,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches<P>(&self, event: &MirrorEvent<P>) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
