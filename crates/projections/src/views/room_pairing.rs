//! Room-pairing read model — who shares a room with whom, per room type.
//!
//! State is rebuilt by folding the event log: pairs and per-room-type
//! membership are created only by `ROOM_PAIR_WAS_ADDED` and removed only
//! by the two removal kinds. Nothing is persisted; the view is
//! reconstructed on process start and extended incrementally afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{ParticipantId, RoomType, RoomTypeRegistry};
use domain::{ConferenceEvent, Member};
use event_store::{EventEnvelope, EventStore};
use tokio::sync::RwLock;

use crate::error::ProjectionError;
use crate::projection::{Projection, ProjectionPosition};
use crate::read_model::{ReadModel, RegistrationReadModel};
use crate::Result;

/// An unordered pairing of two participants for one room type.
///
/// A pair has no identity beyond its two member ids; two pairs with the
/// same members count as the same relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPair {
    pub participant1_id: ParticipantId,
    pub participant2_id: ParticipantId,
}

/// A pair with both slots resolved against a member directory.
///
/// A slot is `None` when the directory holds no member with that id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPair {
    pub participant1: Option<Member>,
    pub participant2: Option<Member>,
}

/// Pair and membership sequences, keyed per room type.
///
/// Both maps hold an entry for every registered room type and must move
/// together: every participant in a pair appears in the membership list
/// and vice versa. They share one lock for that reason.
#[derive(Debug, Default)]
struct PairingState {
    pairs: HashMap<RoomType, Vec<RoomPair>>,
    participants: HashMap<RoomType, Vec<ParticipantId>>,
}

impl PairingState {
    fn empty_for(registry: &RoomTypeRegistry) -> Self {
        let mut state = Self::default();
        for room_type in registry.all_room_type_ids() {
            state.pairs.insert(room_type.clone(), Vec::new());
            state.participants.insert(room_type.clone(), Vec::new());
        }
        state
    }

    fn apply(&mut self, registry: &RoomTypeRegistry, event: &ConferenceEvent) {
        for room_type in registry.all_room_type_ids() {
            let pairs = self.pairs.remove(room_type).unwrap_or_default();
            self.pairs
                .insert(room_type.clone(), project_room_pairs(room_type, pairs, event));

            let participants = self.participants.remove(room_type).unwrap_or_default();
            self.participants.insert(
                room_type.clone(),
                project_participants_in_room(room_type, participants, event),
            );
        }
    }
}

/// Pair-collection fold rule for one room type.
///
/// Adds append without any duplicate check. Removals drop every pair
/// whose slots equal the event's ids in the same order; an event with the
/// ids swapped does not match. Both behaviors are kept from the original
/// system as documented contracts.
fn project_room_pairs(
    room_type: &RoomType,
    mut pairs: Vec<RoomPair>,
    event: &ConferenceEvent,
) -> Vec<RoomPair> {
    match event {
        ConferenceEvent::RoomPairWasAdded(data) if data.room_type == *room_type => {
            pairs.push(RoomPair {
                participant1_id: data.participant1_id.clone(),
                participant2_id: data.participant2_id.clone(),
            });
            pairs
        }
        ConferenceEvent::RoomPairWasRemoved(data)
        | ConferenceEvent::RoomPairContainingAParticipantWasRemoved(data)
            if data.room_type == *room_type =>
        {
            pairs.retain(|pair| {
                !(pair.participant1_id == data.participant1_id
                    && pair.participant2_id == data.participant2_id)
            });
            pairs
        }
        _ => pairs,
    }
}

/// Membership fold rule for one room type.
///
/// Unlike pair removal, membership removal matches either slot, so both
/// participants leave the list even when the event's id order differs
/// from the stored pair's.
fn project_participants_in_room(
    room_type: &RoomType,
    mut participants: Vec<ParticipantId>,
    event: &ConferenceEvent,
) -> Vec<ParticipantId> {
    match event {
        ConferenceEvent::RoomPairWasAdded(data) if data.room_type == *room_type => {
            participants.push(data.participant1_id.clone());
            participants.push(data.participant2_id.clone());
            participants
        }
        ConferenceEvent::RoomPairWasRemoved(data)
        | ConferenceEvent::RoomPairContainingAParticipantWasRemoved(data)
            if data.room_type == *room_type =>
        {
            participants.retain(|participant| {
                *participant != data.participant1_id && *participant != data.participant2_id
            });
            participants
        }
        _ => participants,
    }
}

/// Read model view over roommate pairings.
///
/// Constructed against a room-type registry and a registration read
/// model; both maps are pre-populated for every registered room type, so
/// queries never hit a missing key. Queries against an id outside the
/// registry fail with [`ProjectionError::UnknownRoomType`] — this view
/// never silently answers for a room type it does not know.
#[derive(Clone)]
pub struct RoomPairingView {
    registry: RoomTypeRegistry,
    registration: Arc<dyn RegistrationReadModel>,
    state: Arc<RwLock<PairingState>>,
    position: Arc<RwLock<ProjectionPosition>>,
}

impl RoomPairingView {
    /// Creates an empty view for the given registry.
    pub fn new(registry: RoomTypeRegistry, registration: Arc<dyn RegistrationReadModel>) -> Self {
        let state = PairingState::empty_for(&registry);
        Self {
            registry,
            registration,
            state: Arc::new(RwLock::new(state)),
            position: Arc::new(RwLock::new(ProjectionPosition::zero())),
        }
    }

    /// Creates a view and folds the entire log into it.
    pub async fn build<S: EventStore>(
        store: &S,
        registry: RoomTypeRegistry,
        registration: Arc<dyn RegistrationReadModel>,
    ) -> Result<Self> {
        let view = Self::new(registry, registration);
        let events = store.all_events().await?;
        view.update(&events).await?;
        Ok(view)
    }

    /// Folds newly appended events into the view, in log order.
    ///
    /// Callers supply only events the view has not seen; the log's
    /// ordering and exactly-once delivery are assumed preconditions, not
    /// enforced here. Malformed envelopes are logged and skipped.
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

    /// The current pair sequence for a room type, in addition order.
    pub async fn pairs_for(&self, room_type: &RoomType) -> Result<Vec<RoomPair>> {
        self.check_room_type(room_type)?;
        let state = self.state.read().await;
        Ok(state.pairs.get(room_type).cloned().unwrap_or_default())
    }

    /// Whether a pair involving `participant1_id` exists for a room type.
    ///
    /// Only the first id takes part in the match: a pair counts when
    /// either of its slots equals `participant1_id`. The second id is
    /// accepted for call-site symmetry but not consulted — a documented
    /// contract carried over from the original system.
    pub async fn is_pair_present(
        &self,
        room_type: &RoomType,
        participant1_id: &ParticipantId,
        _participant2_id: &ParticipantId,
    ) -> Result<bool> {
        let pairs = self.pairs_for(room_type).await?;
        Ok(pairs.iter().any(|pair| {
            pair.participant1_id == *participant1_id || pair.participant2_id == *participant1_id
        }))
    }

    /// Participants currently holding a pairing slot in a room type.
    pub async fn participants_in(&self, room_type: &RoomType) -> Result<Vec<ParticipantId>> {
        self.check_room_type(room_type)?;
        let state = self.state.read().await;
        Ok(state
            .participants
            .get(room_type)
            .cloned()
            .unwrap_or_default())
    }

    /// Registered participants of a room type who have no roommate yet.
    ///
    /// Set difference between the registration read model's list and
    /// [`participants_in`](Self::participants_in); the registration
    /// ordering is preserved.
    pub async fn unpaired_participants_in(
        &self,
        room_type: &RoomType,
    ) -> Result<Vec<ParticipantId>> {
        let registered = self.registration.participants_for(room_type).await?;
        let paired = self.participants_in(room_type).await?;
        Ok(registered
            .into_iter()
            .filter(|participant| !paired.contains(participant))
            .collect())
    }

    /// The other member of the pair containing `member_id`, if any.
    ///
    /// Scans pairs in sequence order and matches either slot.
    pub async fn roommate_of(
        &self,
        room_type: &RoomType,
        member_id: &ParticipantId,
    ) -> Result<Option<ParticipantId>> {
        let pairs = self.pairs_for(room_type).await?;
        Ok(pairs
            .iter()
            .find(|pair| {
                pair.participant1_id == *member_id || pair.participant2_id == *member_id
            })
            .map(|pair| {
                if pair.participant1_id == *member_id {
                    pair.participant2_id.clone()
                } else {
                    pair.participant1_id.clone()
                }
            }))
    }

    /// Current pairs with both slots resolved against a member directory.
    ///
    /// A directory miss yields `None` for that slot rather than failing.
    pub async fn pairs_with_members(
        &self,
        room_type: &RoomType,
        members: &[Member],
    ) -> Result<Vec<ResolvedPair>> {
        let pairs = self.pairs_for(room_type).await?;
        Ok(pairs
            .iter()
            .map(|pair| ResolvedPair {
                participant1: members
                    .iter()
                    .find(|member| member.id() == &pair.participant1_id)
                    .cloned(),
                participant2: members
                    .iter()
                    .find(|member| member.id() == &pair.participant2_id)
                    .cloned(),
            })
            .collect())
    }

    fn check_room_type(&self, room_type: &RoomType) -> Result<()> {
        if self.registry.contains(room_type) {
            Ok(())
        } else {
            Err(ProjectionError::UnknownRoomType(room_type.clone()))
        }
    }
}

#[async_trait]
impl Projection for RoomPairingView {
    fn name(&self) -> &'static str {
        "RoomPairingView"
    }

    async fn handle(&self, event: &EventEnvelope) -> Result<()> {
        let parsed: std::result::Result<ConferenceEvent, _> =
            serde_json::from_value(event.payload.clone());

        let outcome = match parsed {
            Ok(conference_event) => {
                let mut state = self.state.write().await;
                state.apply(&self.registry, &conference_event);
                Ok(())
            }
            Err(source) => Err(ProjectionError::MalformedEvent {
                event_type: event.event_type.clone(),
                source,
            }),
        };

        // Malformed events still count as seen so catch-up never retries them.
        let mut pos = self.position.write().await;
        *pos = pos.advance();

        outcome
    }

    async fn position(&self) -> ProjectionPosition {
        *self.position.read().await
    }

    async fn reset(&self) -> Result<()> {
        *self.state.write().await = PairingState::empty_for(&self.registry);
        *self.position.write().await = ProjectionPosition::zero();
        Ok(())
    }
}

impl ReadModel for RoomPairingView {
    fn name(&self) -> &'static str {
        "RoomPairingView"
    }

    fn count(&self) -> usize {
        // try_read to avoid blocking; 0 if the writer holds the lock
        self.state
            .try_read()
            .map(|state| state.pairs.values().map(Vec::len).sum())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn junior() -> RoomType {
        RoomType::new("junior")
    }

    fn pair_added(p1: &str, p2: &str) -> ConferenceEvent {
        ConferenceEvent::room_pair_was_added(junior(), ParticipantId::new(p1), ParticipantId::new(p2))
    }

    #[test]
    fn add_appends_pair_and_both_members() {
        let event = pair_added("memberId1", "memberId2");

        let pairs = project_room_pairs(&junior(), Vec::new(), &event);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].participant1_id, ParticipantId::new("memberId1"));
        assert_eq!(pairs[0].participant2_id, ParticipantId::new("memberId2"));

        let participants = project_participants_in_room(&junior(), Vec::new(), &event);
        assert_eq!(
            participants,
            vec![
                ParticipantId::new("memberId1"),
                ParticipantId::new("memberId2")
            ]
        );
    }

    #[test]
    fn events_for_other_room_types_leave_state_alone() {
        let event = ConferenceEvent::room_pair_was_added(
            RoomType::new("single"),
            ParticipantId::new("a"),
            ParticipantId::new("b"),
        );
        assert!(project_room_pairs(&junior(), Vec::new(), &event).is_empty());
        assert!(project_participants_in_room(&junior(), Vec::new(), &event).is_empty());
    }

    #[test]
    fn pair_removal_matches_slot_order_exactly() {
        let pairs = project_room_pairs(&junior(), Vec::new(), &pair_added("a", "b"));

        // Swapped order does not match the stored pair.
        let swapped = ConferenceEvent::room_pair_was_removed(
            junior(),
            ParticipantId::new("b"),
            ParticipantId::new("a"),
        );
        let pairs = project_room_pairs(&junior(), pairs, &swapped);
        assert_eq!(pairs.len(), 1);

        let exact = ConferenceEvent::room_pair_was_removed(
            junior(),
            ParticipantId::new("a"),
            ParticipantId::new("b"),
        );
        let pairs = project_room_pairs(&junior(), pairs, &exact);
        assert!(pairs.is_empty());
    }

    #[test]
    fn membership_removal_matches_either_slot() {
        let participants = project_participants_in_room(&junior(), Vec::new(), &pair_added("a", "b"));

        // Swapped order still clears both members.
        let swapped = ConferenceEvent::room_pair_was_removed(
            junior(),
            ParticipantId::new("b"),
            ParticipantId::new("a"),
        );
        let participants = project_participants_in_room(&junior(), participants, &swapped);
        assert!(participants.is_empty());
    }

    #[test]
    fn duplicate_adds_are_preserved() {
        let pairs = project_room_pairs(&junior(), Vec::new(), &pair_added("a", "b"));
        let pairs = project_room_pairs(&junior(), pairs, &pair_added("a", "b"));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn removal_by_departed_participant_clears_the_pair() {
        let pairs = project_room_pairs(&junior(), Vec::new(), &pair_added("a", "b"));
        let event = ConferenceEvent::room_pair_containing_a_participant_was_removed(
            junior(),
            ParticipantId::new("a"),
            ParticipantId::new("b"),
        );
        assert!(project_room_pairs(&junior(), pairs, &event).is_empty());
    }
}
