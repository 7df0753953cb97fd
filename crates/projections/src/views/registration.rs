//! Registration read model — who registered for which room type.

use std::sync::Arc;

use async_trait::async_trait;
use common::{ParticipantId, RoomType, RoomTypeRegistry};
use domain::ConferenceEvent;
use event_store::{EventEnvelope, EventStore};
use tokio::sync::RwLock;

use crate::error::ProjectionError;
use crate::projection::{Projection, ProjectionPosition};
use crate::read_model::{ReadModel, RegistrationReadModel};
use crate::Result;

/// One member's current registration.
#[derive(Debug, Clone)]
struct RegistrationEntry {
    member_id: ParticipantId,
    room_type: RoomType,
}

/// Read model over registration events.
///
/// Each member holds at most one registration; a later
/// `ROOM_TYPE_WAS_CHANGED` updates it in place, `PARTICIPANT_WAS_REMOVED`
/// deletes it. Entries keep first-registration order, which is the order
/// [`participants_for`](RegistrationReadModel::participants_for) answers
/// in.
#[derive(Clone)]
pub struct RegistrationView {
    registry: RoomTypeRegistry,
    entries: Arc<RwLock<Vec<RegistrationEntry>>>,
    position: Arc<RwLock<ProjectionPosition>>,
}

impl RegistrationView {
    /// Creates an empty view for the given registry.
    pub fn new(registry: RoomTypeRegistry) -> Self {
        Self {
            registry,
            entries: Arc::new(RwLock::new(Vec::new())),
            position: Arc::new(RwLock::new(ProjectionPosition::zero())),
        }
    }

    /// Creates a view and folds the entire log into it.
    pub async fn build<S: EventStore>(store: &S, registry: RoomTypeRegistry) -> Result<Self> {
        let view = Self::new(registry);
        let events = store.all_events().await?;
        view.update(&events).await?;
        Ok(view)
    }

    /// Folds newly appended events into the view, in log order.
    ///
    /// Malformed envelopes are logged and skipped.
    pub async fn update(&self, events: &[EventEnvelope]) -> Result<()> {
        for event in events {
            match self.handle(event).await {
                Ok(()) => {}
                Err(ProjectionError::MalformedEvent { event_type, source }) => {
                    tracing::warn!(%event_type, error = %source, "skipping malformed event");
                }
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    fn apply(entries: &mut Vec<RegistrationEntry>, event: &ConferenceEvent) {
        match event {
            ConferenceEvent::ParticipantWasRegistered(data)
            | ConferenceEvent::RoomTypeWasChanged(data) => {
                if let Some(entry) = entries.iter_mut().find(|e| e.member_id == data.member_id) {
                    entry.room_type = data.room_type.clone();
                } else {
                    entries.push(RegistrationEntry {
                        member_id: data.member_id.clone(),
                        room_type: data.room_type.clone(),
                    });
                }
            }
            ConferenceEvent::ParticipantWasRemoved(data) => {
                entries.retain(|entry| entry.member_id != data.member_id);
            }
            _ => {}
        }
    }
}

#[async_trait]
impl RegistrationReadModel for RegistrationView {
    async fn participants_for(&self, room_type: &RoomType) -> Result<Vec<ParticipantId>> {
        if !self.registry.contains(room_type) {
            return Err(ProjectionError::UnknownRoomType(room_type.clone()));
        }
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| entry.room_type == *room_type)
            .map(|entry| entry.member_id.clone())
            .collect())
    }
}

#[async_trait]
impl Projection for RegistrationView {
    fn name(&self) -> &'static str {
        "RegistrationView"
    }

    async fn handle(&self, event: &EventEnvelope) -> Result<()> {
        let parsed: std::result::Result<ConferenceEvent, _> =
            serde_json::from_value(event.payload.clone());

        let outcome = match parsed {
            Ok(conference_event) => {
                let mut entries = self.entries.write().await;
                Self::apply(&mut entries, &conference_event);
                Ok(())
            }
            Err(source) => Err(ProjectionError::MalformedEvent {
                event_type: event.event_type.clone(),
                source,
            }),
        };

        let mut pos = self.position.write().await;
        *pos = pos.advance();

        outcome
    }

    async fn position(&self) -> ProjectionPosition {
        *self.position.read().await
    }

    async fn reset(&self) -> Result<()> {
        self.entries.write().await.clear();
        *self.position.write().await = ProjectionPosition::zero();
        Ok(())
    }
}

impl ReadModel for RegistrationView {
    fn name(&self) -> &'static str {
        "RegistrationView"
    }

    fn count(&self) -> usize {
        self.entries.try_read().map(|e| e.len()).unwrap_or(0)
    }
}
