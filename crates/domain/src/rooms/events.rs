//! Conference events: room pairing and participant registration.

use chrono::{DateTime, Utc};
use common::{ParticipantId, RoomType};
use serde::{Deserialize, Serialize};

use crate::event::DomainEvent;

/// Events that can occur on a conference.
///
/// The wire tags match the constants of the original event log
/// (`ROOM_PAIR_WAS_ADDED`, ...), so a log written by the original system
/// deserializes into this enum. The room-pairing view folds the first
/// three kinds and ignores the rest; the registration view does the
/// opposite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConferenceEvent {
    /// Two participants were paired for a room type.
    RoomPairWasAdded(RoomPairData),

    /// A pair was removed by explicit choice of both participants.
    RoomPairWasRemoved(RoomPairData),

    /// A pair was removed because one of its participants left.
    ///
    /// Carries both ids: the command side resolves the roommate before
    /// emitting, so removal folds see the full pair.
    RoomPairContainingAParticipantWasRemoved(RoomPairData),

    /// A participant registered for a room type.
    ParticipantWasRegistered(RegistrationData),

    /// A registered participant switched to a different room type.
    RoomTypeWasChanged(RegistrationData),

    /// A participant withdrew from the conference entirely.
    ParticipantWasRemoved(ParticipantRemovedData),
}

impl DomainEvent for ConferenceEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ConferenceEvent::RoomPairWasAdded(_) => "ROOM_PAIR_WAS_ADDED",
            ConferenceEvent::RoomPairWasRemoved(_) => "ROOM_PAIR_WAS_REMOVED",
            ConferenceEvent::RoomPairContainingAParticipantWasRemoved(_) => {
                "ROOM_PAIR_CONTAINING_A_PARTICIPANT_WAS_REMOVED"
            }
            ConferenceEvent::ParticipantWasRegistered(_) => "PARTICIPANT_WAS_REGISTERED",
            ConferenceEvent::RoomTypeWasChanged(_) => "ROOM_TYPE_WAS_CHANGED",
            ConferenceEvent::ParticipantWasRemoved(_) => "PARTICIPANT_WAS_REMOVED",
        }
    }
}

impl ConferenceEvent {
    /// Creates a pair-added event.
    pub fn room_pair_was_added(
        room_type: RoomType,
        participant1_id: ParticipantId,
        participant2_id: ParticipantId,
    ) -> Self {
        Self::RoomPairWasAdded(RoomPairData {
            room_type,
            participant1_id,
            participant2_id,
        })
    }

    /// Creates a pair-removed event.
    ///
    /// The ids must appear in the same order as in the stored pair; pair
    /// removal matches both fields positionally.
    pub fn room_pair_was_removed(
        room_type: RoomType,
        participant1_id: ParticipantId,
        participant2_id: ParticipantId,
    ) -> Self {
        Self::RoomPairWasRemoved(RoomPairData {
            room_type,
            participant1_id,
            participant2_id,
        })
    }

    /// Creates a pair-removed-because-a-participant-left event.
    ///
    /// Same positional-order requirement as
    /// [`room_pair_was_removed`](Self::room_pair_was_removed).
    pub fn room_pair_containing_a_participant_was_removed(
        room_type: RoomType,
        participant1_id: ParticipantId,
        participant2_id: ParticipantId,
    ) -> Self {
        Self::RoomPairContainingAParticipantWasRemoved(RoomPairData {
            room_type,
            participant1_id,
            participant2_id,
        })
    }

    /// Creates a participant-registered event.
    pub fn participant_was_registered(
        room_type: RoomType,
        member_id: ParticipantId,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self::ParticipantWasRegistered(RegistrationData {
            room_type,
            member_id,
            joined_at,
        })
    }

    /// Creates a room-type-changed event.
    pub fn room_type_was_changed(
        room_type: RoomType,
        member_id: ParticipantId,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self::RoomTypeWasChanged(RegistrationData {
            room_type,
            member_id,
            joined_at,
        })
    }

    /// Creates a participant-removed event.
    pub fn participant_was_removed(member_id: ParticipantId) -> Self {
        Self::ParticipantWasRemoved(ParticipantRemovedData { member_id })
    }
}

/// Payload of the three pairing event kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPairData {
    /// The room type the pair belongs to.
    pub room_type: RoomType,

    /// First slot of the pair.
    pub participant1_id: ParticipantId,

    /// Second slot of the pair.
    pub participant2_id: ParticipantId,
}

/// Payload of registration and room-type-change events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    /// The room type the participant registered for.
    pub room_type: RoomType,

    /// The registered member.
    pub member_id: ParticipantId,

    /// When the member joined.
    pub joined_at: DateTime<Utc>,
}

/// Payload of the participant-removed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRemovedData {
    /// The member who withdrew.
    pub member_id: ParticipantId,
}
