//! Append-only event log for the room-pairing system.
//!
//! The log is globally ordered: every appended event receives a
//! [`LogPosition`] one past the previous tail. Projections rely on that
//! ordering to fold deterministically; nothing here interprets event
//! payloads.

pub mod error;
pub mod event;
pub mod memory;
pub mod store;

pub use common::ConferenceId;
pub use error::{EventStoreError, Result};
pub use event::{EventEnvelope, EventEnvelopeBuilder, EventId, LogPosition};
pub use memory::InMemoryEventStore;
pub use store::{EventStore, EventStoreExt, EventStream};
