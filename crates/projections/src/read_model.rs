//! Query-side traits.

use async_trait::async_trait;
use common::{ParticipantId, RoomType};

use crate::Result;

/// A read model providing query access to denormalized data.
pub trait ReadModel: Send + Sync {
    /// Returns the name of this read model.
    fn name(&self) -> &'static str;

    /// Returns the number of entries in this read model.
    fn count(&self) -> usize;
}

/// Answers "which participants are registered for a room type".
///
/// The room-pairing view consults this to compute which registered
/// participants have no roommate yet. The ordering of the returned list
/// is the registration ordering and is preserved by that computation.
#[async_trait]
pub trait RegistrationReadModel: Send + Sync {
    /// All participants registered for the given room type, in
    /// registration order.
    ///
    /// Fails with [`ProjectionError::UnknownRoomType`] for room types
    /// outside the configured registry.
    ///
    /// [`ProjectionError::UnknownRoomType`]: crate::ProjectionError::UnknownRoomType
    async fn participants_for(&self, room_type: &RoomType) -> Result<Vec<ParticipantId>>;
}
