use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::{EventEnvelope, EventStoreError, LogPosition, Result};

/// A stream of events in log order.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<EventEnvelope>> + Send>>;

/// Core trait for event log implementations.
///
/// The log is append-only and globally ordered. Events are never mutated
/// or deleted after append; readers always see them in position order.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends events to the end of the log.
    ///
    /// Each event is assigned the next free [`LogPosition`]; the batch is
    /// appended atomically. Returns the position of the last appended event.
    async fn append(&self, events: Vec<EventEnvelope>) -> Result<LogPosition>;

    /// Reads the entire log in position order.
    ///
    /// Projections call this once at construction to fold initial state.
    async fn all_events(&self) -> Result<Vec<EventEnvelope>>;

    /// Reads events at or after the given position, in position order.
    ///
    /// Used for incremental projection updates after the initial fold.
    async fn events_from(&self, position: LogPosition) -> Result<Vec<EventEnvelope>>;

    /// Reads all events with the given wire name, in position order.
    async fn events_by_type(&self, event_type: &str) -> Result<Vec<EventEnvelope>>;

    /// Streams the entire log in position order.
    async fn stream_all_events(&self) -> Result<EventStream>;

    /// Returns the position of the last event, or [`LogPosition::start`]
    /// for an empty log.
    async fn last_position(&self) -> Result<LogPosition>;
}

/// Extension trait providing convenience methods for event logs.
#[async_trait]
pub trait EventStoreExt: EventStore {
    /// Appends a single event to the log.
    async fn append_event(&self, event: EventEnvelope) -> Result<LogPosition> {
        self.append(vec![event]).await
    }

    /// Returns true if the log holds no events.
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.last_position().await? == LogPosition::start())
    }
}

// Blanket implementation for all EventStore implementations
impl<T: EventStore + ?Sized> EventStoreExt for T {}

/// Validates a batch of events before appending.
///
/// A batch must be non-empty and belong to a single conference; positions
/// are ignored because the store assigns them.
pub fn validate_events_for_append(events: &[EventEnvelope]) -> Result<()> {
    let Some(first) = events.first() else {
        return Err(EventStoreError::EmptyAppend);
    };

    if events
        .iter()
        .any(|e| e.conference_id != first.conference_id)
    {
        return Err(EventStoreError::MixedConferences);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConferenceId;

    fn envelope(conference_id: ConferenceId) -> EventEnvelope {
        EventEnvelope::builder()
            .event_type("ROOM_PAIR_WAS_ADDED")
            .conference_id(conference_id)
            .payload_raw(serde_json::json!({}))
            .build()
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert!(matches!(
            validate_events_for_append(&[]),
            Err(EventStoreError::EmptyAppend)
        ));
    }

    #[test]
    fn mixed_conferences_are_rejected() {
        let batch = vec![envelope(ConferenceId::new()), envelope(ConferenceId::new())];
        assert!(matches!(
            validate_events_for_append(&batch),
            Err(EventStoreError::MixedConferences)
        ));
    }

    #[test]
    fn single_conference_batch_is_accepted() {
        let id = ConferenceId::new();
        let batch = vec![envelope(id), envelope(id)];
        assert!(validate_events_for_append(&batch).is_ok());
    }
}
