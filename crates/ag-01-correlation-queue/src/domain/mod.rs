//! Domain layer for the Correlation Queue

pub mod queue;
pub mod resolution;
pub mod stats;

pub use queue::{CorrelationQueue, FinalizeOutcome};
pub use resolution::resolve;
pub use stats::{QueueStats, QueueStatsSnapshot};
