//! Queue statistics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for queue activity.
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Requests enqueued
    pub total_enqueued: AtomicU64,
    /// Verdicts of `accept` delivered
    pub total_accepted: AtomicU64,
    /// Verdicts of `reject` delivered
    pub total_rejected: AtomicU64,
    /// Verdicts with an unsupported action delivered
    pub total_unsupported: AtomicU64,
    /// Finalize calls that matched nothing
    pub total_unmatched: AtomicU64,
    /// Finalize calls whose waiter had already gone
    pub total_abandoned: AtomicU64,
    /// Enqueues whose surface could not be shown
    pub total_surface_failures: AtomicU64,
}

impl QueueStats {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot of all counters as plain numbers.
    #[must_use]
    pub fn snapshot(&self) -> QueueStatsSnapshot {
        QueueStatsSnapshot {
            enqueued: self.total_enqueued.load(Ordering::Relaxed),
            accepted: self.total_accepted.load(Ordering::Relaxed),
            rejected: self.total_rejected.load(Ordering::Relaxed),
            unsupported: self.total_unsupported.load(Ordering::Relaxed),
            unmatched: self.total_unmatched.load(Ordering::Relaxed),
            abandoned: self.total_abandoned.load(Ordering::Relaxed),
            surface_failures: self.total_surface_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`QueueStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStatsSnapshot {
    pub enqueued: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub unsupported: u64,
    pub unmatched: u64,
    pub abandoned: u64,
    pub surface_failures: u64,
}
