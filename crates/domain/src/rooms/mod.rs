//! Room pairing and registration: events, member records, command side.

mod events;
mod member;
mod service;

pub use events::{ConferenceEvent, ParticipantRemovedData, RegistrationData, RoomPairData};
pub use member::Member;
pub use service::RoomsService;
