//! Command side for room pairing and registration.

use chrono::Utc;
use common::{ConferenceId, ParticipantId, RoomType};
use event_store::{EventEnvelope, EventStore, EventStoreExt, LogPosition};

use crate::error::DomainError;
use crate::event::DomainEvent;

use super::ConferenceEvent;

/// Appends pairing and registration events to the log for one conference.
///
/// This is deliberately thin: it wraps events in envelopes and appends.
/// Resolving a member's roommate before removing a pair is the caller's
/// job, done against the room-pairing read model, because removal events
/// must carry both pair slots in stored order.
pub struct RoomsService<S: EventStore> {
    store: S,
    conference_id: ConferenceId,
}

impl<S: EventStore> RoomsService<S> {
    /// Creates a service writing to the given log for the given conference.
    pub fn new(store: S, conference_id: ConferenceId) -> Self {
        Self {
            store,
            conference_id,
        }
    }

    /// The conference this service writes events for.
    pub fn conference_id(&self) -> ConferenceId {
        self.conference_id
    }

    /// Pairs two participants for a room type.
    #[tracing::instrument(skip(self))]
    pub async fn add_participant_pair(
        &self,
        room_type: RoomType,
        participant1_id: ParticipantId,
        participant2_id: ParticipantId,
    ) -> Result<LogPosition, DomainError> {
        self.emit(&ConferenceEvent::room_pair_was_added(
            room_type,
            participant1_id,
            participant2_id,
        ))
        .await
    }

    /// Removes a pair by explicit choice of both participants.
    ///
    /// The ids must be given in the order they appear in the stored pair.
    #[tracing::instrument(skip(self))]
    pub async fn remove_participant_pair(
        &self,
        room_type: RoomType,
        participant1_id: ParticipantId,
        participant2_id: ParticipantId,
    ) -> Result<LogPosition, DomainError> {
        self.emit(&ConferenceEvent::room_pair_was_removed(
            room_type,
            participant1_id,
            participant2_id,
        ))
        .await
    }

    /// Removes the pair containing a departing participant.
    ///
    /// The caller resolves the roommate through the read model and passes
    /// the pair in stored order.
    #[tracing::instrument(skip(self))]
    pub async fn remove_pair_containing_participant(
        &self,
        room_type: RoomType,
        participant1_id: ParticipantId,
        participant2_id: ParticipantId,
    ) -> Result<LogPosition, DomainError> {
        self.emit(
            &ConferenceEvent::room_pair_containing_a_participant_was_removed(
                room_type,
                participant1_id,
                participant2_id,
            ),
        )
        .await
    }

    /// Registers a participant for a room type.
    #[tracing::instrument(skip(self))]
    pub async fn register_participant(
        &self,
        room_type: RoomType,
        member_id: ParticipantId,
    ) -> Result<LogPosition, DomainError> {
        self.emit(&ConferenceEvent::participant_was_registered(
            room_type,
            member_id,
            Utc::now(),
        ))
        .await
    }

    /// Moves a registered participant to a different room type.
    #[tracing::instrument(skip(self))]
    pub async fn change_room_type(
        &self,
        room_type: RoomType,
        member_id: ParticipantId,
    ) -> Result<LogPosition, DomainError> {
        self.emit(&ConferenceEvent::room_type_was_changed(
            room_type,
            member_id,
            Utc::now(),
        ))
        .await
    }

    /// Removes a participant from the conference.
    #[tracing::instrument(skip(self))]
    pub async fn remove_participant(
        &self,
        member_id: ParticipantId,
    ) -> Result<LogPosition, DomainError> {
        self.emit(&ConferenceEvent::participant_was_removed(member_id))
            .await
    }

    async fn emit(&self, event: &ConferenceEvent) -> Result<LogPosition, DomainError> {
        let envelope = EventEnvelope::builder()
            .event_type(event.event_type())
            .conference_id(self.conference_id)
            .payload(event)?
            .build();

        Ok(self.store.append_event(envelope).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_store::InMemoryEventStore;

    fn service() -> RoomsService<InMemoryEventStore> {
        RoomsService::new(InMemoryEventStore::new(), ConferenceId::new())
    }

    #[tokio::test]
    async fn add_pair_appends_one_event() {
        let service = service();

        let position = service
            .add_participant_pair(
                RoomType::new("junior"),
                ParticipantId::new("memberId1"),
                ParticipantId::new("memberId2"),
            )
            .await
            .unwrap();
        assert_eq!(position, LogPosition::new(1));

        let events = service.store.all_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "ROOM_PAIR_WAS_ADDED");
        assert_eq!(events[0].conference_id, service.conference_id());
    }

    #[tokio::test]
    async fn payload_round_trips_through_the_envelope() {
        let service = service();

        service
            .remove_participant_pair(
                RoomType::new("bed_in_double"),
                ParticipantId::new("a"),
                ParticipantId::new("b"),
            )
            .await
            .unwrap();

        let events = service.store.all_events().await.unwrap();
        let event: ConferenceEvent = serde_json::from_value(events[0].payload.clone()).unwrap();
        match event {
            ConferenceEvent::RoomPairWasRemoved(data) => {
                assert_eq!(data.room_type, RoomType::new("bed_in_double"));
                assert_eq!(data.participant1_id, ParticipantId::new("a"));
                assert_eq!(data.participant2_id, ParticipantId::new("b"));
            }
            other => panic!("unexpected event: {:?}", other.event_type()),
        }
    }

    #[tokio::test]
    async fn registration_events_carry_their_wire_names() {
        let service = service();

        service
            .register_participant(RoomType::new("single"), ParticipantId::new("memberId1"))
            .await
            .unwrap();
        service
            .change_room_type(RoomType::new("junior"), ParticipantId::new("memberId1"))
            .await
            .unwrap();
        service
            .remove_participant(ParticipantId::new("memberId1"))
            .await
            .unwrap();

        let types: Vec<_> = service
            .store
            .all_events()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(
            types,
            vec![
                "PARTICIPANT_WAS_REGISTERED",
                "ROOM_TYPE_WAS_CHANGED",
                "PARTICIPANT_WAS_REMOVED"
            ]
        );
    }
}
