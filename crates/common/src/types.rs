use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a conference instance.
///
/// Every event in the log belongs to exactly one conference. Wrapping the
/// UUID keeps conference ids from being confused with event ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConferenceId(Uuid);

impl ConferenceId {
    /// Creates a new random conference ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a conference ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ConferenceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConferenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ConferenceId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ConferenceId> for Uuid {
    fn from(id: ConferenceId) -> Self {
        id.0
    }
}

/// Identifier of a participant (a member id from the member directory).
///
/// Participant ids originate outside this system, so they are opaque
/// strings rather than UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Creates a participant ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the participant ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ParticipantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A configured room category (e.g. "bed_in_double", "junior").
///
/// Room types are not created at runtime; the set of valid ids lives in
/// the [`RoomTypeRegistry`](crate::RoomTypeRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomType(String);

impl RoomType {
    /// Creates a room type from a string id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the room type id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RoomType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RoomType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for RoomType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
