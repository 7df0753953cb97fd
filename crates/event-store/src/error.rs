use thiserror::Error;

/// Errors that can occur when interacting with the event log.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// An append was attempted with an empty event list.
    #[error("Cannot append an empty event list")]
    EmptyAppend,

    /// Events in a single append batch belong to different conferences.
    #[error("All events in one append must belong to the same conference")]
    MixedConferences,

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for event log operations.
pub type Result<T> = std::result::Result<T, EventStoreError>;
