//! Conference domain for the room-pairing system.
//!
//! This crate provides:
//! - [`DomainEvent`] trait for events written to the log
//! - [`ConferenceEvent`], the closed set of pairing and registration events
//! - [`Member`], the member-directory record pairs resolve against
//! - [`RoomsService`], the thin command side that appends events

pub mod error;
pub mod event;
pub mod rooms;

pub use error::DomainError;
pub use event::DomainEvent;
pub use rooms::{
    ConferenceEvent, Member, ParticipantRemovedData, RegistrationData, RoomPairData, RoomsService,
};
