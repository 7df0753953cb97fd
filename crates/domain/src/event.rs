//! Domain event trait.

use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events are immutable facts, named in past tense. The wire name
/// returned by [`event_type`](DomainEvent::event_type) is what the log
/// stores in the envelope and what projections filter on.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the wire name of the event.
    fn event_type(&self) -> &'static str;
}
