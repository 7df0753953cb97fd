//! Projection error types.

use common::RoomType;
use thiserror::Error;

/// Errors that can occur during projection processing and queries.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// An error occurred in the event log.
    #[error("Event store error: {0}")]
    EventStore(#[from] event_store::EventStoreError),

    /// An event payload did not deserialize into a known event shape.
    ///
    /// Such events are never applied; the processor logs and skips them.
    #[error("Malformed {event_type} event: {source}")]
    MalformedEvent {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// A query named a room type outside the configured registry.
    #[error("Unknown room type: {0}")]
    UnknownRoomType(RoomType),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
