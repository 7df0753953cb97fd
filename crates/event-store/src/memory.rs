use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    EventEnvelope, LogPosition, Result,
    store::{EventStore, EventStream, validate_events_for_append},
};

/// In-memory event log.
///
/// Events live in a single position-ordered vector behind one lock, so an
/// append is atomic with respect to readers. Cloning the store shares the
/// same underlying log.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<EventEnvelope>>>,
}

impl InMemoryEventStore {
    /// Creates a new empty in-memory event log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of events stored.
    pub async fn event_count(&self) -> usize {
        self.events.read().await.len()
    }

    /// Clears the log.
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, events: Vec<EventEnvelope>) -> Result<LogPosition> {
        validate_events_for_append(&events)?;

        let mut log = self.events.write().await;

        let mut position = log
            .last()
            .map(|e| e.position)
            .unwrap_or_else(LogPosition::start);

        for mut event in events {
            position = position.next();
            event.position = position;
            log.push(event);
        }

        Ok(position)
    }

    async fn all_events(&self) -> Result<Vec<EventEnvelope>> {
        Ok(self.events.read().await.clone())
    }

    async fn events_from(&self, position: LogPosition) -> Result<Vec<EventEnvelope>> {
        let log = self.events.read().await;
        Ok(log
            .iter()
            .filter(|e| e.position >= position)
            .cloned()
            .collect())
    }

    async fn events_by_type(&self, event_type: &str) -> Result<Vec<EventEnvelope>> {
        let log = self.events.read().await;
        Ok(log
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect())
    }

    async fn stream_all_events(&self) -> Result<EventStream> {
        use futures_util::stream;

        let events = self.events.read().await.clone();
        Ok(Box::pin(stream::iter(events.into_iter().map(Ok))))
    }

    async fn last_position(&self) -> Result<LogPosition> {
        let log = self.events.read().await;
        Ok(log
            .last()
            .map(|e| e.position)
            .unwrap_or_else(LogPosition::start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConferenceId, EventStoreError, store::EventStoreExt};

    fn create_test_event(conference_id: ConferenceId, event_type: &str) -> EventEnvelope {
        EventEnvelope::builder()
            .event_type(event_type)
            .conference_id(conference_id)
            .payload_raw(serde_json::json!({"test": true}))
            .build()
    }

    #[tokio::test]
    async fn append_assigns_sequential_positions() {
        let store = InMemoryEventStore::new();
        let conference_id = ConferenceId::new();

        let last = store
            .append(vec![
                create_test_event(conference_id, "Event1"),
                create_test_event(conference_id, "Event2"),
            ])
            .await
            .unwrap();
        assert_eq!(last, LogPosition::new(2));

        let events = store.all_events().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].position, LogPosition::new(1));
        assert_eq!(events[1].position, LogPosition::new(2));
    }

    #[tokio::test]
    async fn positions_continue_across_appends() {
        let store = InMemoryEventStore::new();
        let conference_id = ConferenceId::new();

        store
            .append_event(create_test_event(conference_id, "Event1"))
            .await
            .unwrap();
        let last = store
            .append_event(create_test_event(conference_id, "Event2"))
            .await
            .unwrap();

        assert_eq!(last, LogPosition::new(2));
        assert_eq!(store.last_position().await.unwrap(), LogPosition::new(2));
    }

    #[tokio::test]
    async fn empty_append_fails() {
        let store = InMemoryEventStore::new();
        let result = store.append(vec![]).await;
        assert!(matches!(result, Err(EventStoreError::EmptyAppend)));
    }

    #[tokio::test]
    async fn events_from_returns_suffix() {
        let store = InMemoryEventStore::new();
        let conference_id = ConferenceId::new();

        store
            .append(vec![
                create_test_event(conference_id, "Event1"),
                create_test_event(conference_id, "Event2"),
                create_test_event(conference_id, "Event3"),
            ])
            .await
            .unwrap();

        let suffix = store.events_from(LogPosition::new(2)).await.unwrap();
        assert_eq!(suffix.len(), 2);
        assert_eq!(suffix[0].event_type, "Event2");
        assert_eq!(suffix[1].event_type, "Event3");
    }

    #[tokio::test]
    async fn events_by_type_filters() {
        let store = InMemoryEventStore::new();
        let conference_id = ConferenceId::new();

        store
            .append(vec![
                create_test_event(conference_id, "ROOM_PAIR_WAS_ADDED"),
                create_test_event(conference_id, "PARTICIPANT_WAS_REGISTERED"),
                create_test_event(conference_id, "ROOM_PAIR_WAS_ADDED"),
            ])
            .await
            .unwrap();

        let added = store.events_by_type("ROOM_PAIR_WAS_ADDED").await.unwrap();
        assert_eq!(added.len(), 2);
    }

    #[tokio::test]
    async fn stream_yields_all_events_in_order() {
        use futures_util::StreamExt;

        let store = InMemoryEventStore::new();
        let conference_id = ConferenceId::new();

        store
            .append(vec![
                create_test_event(conference_id, "Event1"),
                create_test_event(conference_id, "Event2"),
            ])
            .await
            .unwrap();

        let mut stream = store.stream_all_events().await.unwrap();
        let mut seen = Vec::new();
        while let Some(event) = stream.next().await {
            seen.push(event.unwrap().event_type);
        }
        assert_eq!(seen, vec!["Event1", "Event2"]);
    }

    #[tokio::test]
    async fn is_empty_reflects_log_state() {
        let store = InMemoryEventStore::new();
        assert!(store.is_empty().await.unwrap());

        store
            .append_event(create_test_event(ConferenceId::new(), "Event1"))
            .await
            .unwrap();
        assert!(!store.is_empty().await.unwrap());
    }
}
