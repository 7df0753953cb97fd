//! Read model views.

mod registration;
mod room_pairing;

pub use registration::RegistrationView;
pub use room_pairing::{ResolvedPair, RoomPair, RoomPairingView};
