//! Shared types for the room-pairing system.
//!
//! Identifier newtypes and the configured room-type registry, used by
//! every other crate in the workspace.

pub mod registry;
pub mod types;

pub use registry::RoomTypeRegistry;
pub use types::{ConferenceId, ParticipantId, RoomType};
