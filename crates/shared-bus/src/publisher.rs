//! # Mirror Publisher
//!
//! Defines the publishing side of the mirror bus.

use crate::events::{EventFilter, MirrorEvent};
use crate::subscriber::{EventStream, Subscription, SubscriptionGuard};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::entities::Payload;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Trait for publishing events to the mirror bus.
#[async_trait]
pub trait MirrorPublisher<P: Payload>: Send + Sync {
    /// Publish an event to the bus.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the event.
    async fn publish(&self, event: MirrorEvent<P>) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the mirror bus.
///
/// Uses `tokio::sync::broadcast`, so every subscriber sees every snapshot in
/// publish order. A subscriber that falls more than `capacity` events behind
/// skips ahead; since each snapshot is complete, skipping is harmless.
pub struct InMemoryMirrorBus<P: Payload> {
    /// Broadcast sender for events.
    sender: broadcast::Sender<MirrorEvent<P>>,

    /// Active subscription count by topic.
    subscriptions: Arc<RwLock<HashMap<String, usize>>>,

    /// Total events published.
    events_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl<P: Payload> InMemoryMirrorBus<P> {
    /// Create a new in-memory bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            subscriptions: Arc::new(RwLock::new(HashMap::new())),
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    fn track(&self, filter: &EventFilter) -> SubscriptionGuard {
        let topic_key = format!("{:?}", filter.topics);
        *self
            .subscriptions
            .write()
            .entry(topic_key.clone())
            .or_insert(0) += 1;

        debug!(topics = ?filter.topics, "New mirror subscription created");
        SubscriptionGuard::new(Arc::clone(&self.subscriptions), topic_key)
    }

    /// Subscribe to events matching a filter.
    ///
    /// Only events published after this call are delivered.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription<P> {
        let guard = self.track(&filter);
        Subscription::new(self.sender.subscribe(), filter, guard)
    }

    /// Get a stream of events matching a filter.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream<P> {
        let guard = self.track(&filter);
        EventStream::new(self.sender.subscribe(), filter, guard)
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Number of live subscriptions per topic set.
    #[must_use]
    pub fn subscriptions_by_topic(&self) -> HashMap<String, usize> {
        self.subscriptions.read().clone()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<P: Payload> Default for InMemoryMirrorBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<P: Payload> MirrorPublisher<P> for InMemoryMirrorBus<P> {
    async fn publish(&self, event: MirrorEvent<P>) -> usize {
        let topic = event.topic();
        let pending = event.pending_len();

        // Always increment counter (event was attempted)
        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    topic = ?topic,
                    pending = ?pending,
                    receivers = receiver_count,
                    "Mirror event published"
                );
                receiver_count
            }
            Err(_) => {
                // No observer attached yet; late joiners query the queue instead.
                warn!(topic = ?topic, pending = ?pending, "Mirror event dropped (no receivers)");
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
