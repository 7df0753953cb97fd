//! Core projection trait and position tracking.

use async_trait::async_trait;
use event_store::EventEnvelope;

use crate::Result;

/// Tracks how many log events a projection has folded.
///
/// Positions count delivered events, including events the projection
/// ignored or rejected as malformed, so that catch-up never re-delivers
/// a prefix of the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionPosition {
    /// Number of events this projection has seen.
    pub events_processed: u64,
}

impl ProjectionPosition {
    /// Creates a new position at zero.
    pub fn zero() -> Self {
        Self {
            events_processed: 0,
        }
    }

    /// Advances the position by one event.
    pub fn advance(&self) -> Self {
        Self {
            events_processed: self.events_processed + 1,
        }
    }
}

impl std::fmt::Display for ProjectionPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "events_processed={}", self.events_processed)
    }
}

/// A projection folds log events into a read model.
///
/// Folding must be deterministic: two projections fed the same event
/// sequence answer every query identically. Rebuilding is therefore
/// always possible by resetting and replaying the full log.
#[async_trait]
pub trait Projection: Send + Sync {
    /// Returns the name of this projection.
    fn name(&self) -> &'static str;

    /// Folds a single event into the read model.
    ///
    /// Must advance the position even when the event is ignored or
    /// malformed.
    async fn handle(&self, event: &EventEnvelope) -> Result<()>;

    /// Returns the current position of this projection.
    async fn position(&self) -> ProjectionPosition;

    /// Resets the projection to its initial state.
    async fn reset(&self) -> Result<()>;
}
