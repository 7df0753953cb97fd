//! Read models and projections for the room-pairing query side.
//!
//! This crate provides the query side of the system:
//! - [`Projection`] trait for folding log events into read models
//! - [`ReadModel`] and [`RegistrationReadModel`] traits for query access
//! - [`ProjectionProcessor`] for feeding events from the log to projections
//! - Two views: [`RoomPairingView`] (who shares a room with whom) and
//!   [`RegistrationView`] (who registered for which room type)

pub mod error;
pub mod processor;
pub mod projection;
pub mod read_model;
pub mod views;

pub use error::{ProjectionError, Result};
pub use processor::ProjectionProcessor;
pub use projection::{Projection, ProjectionPosition};
pub use read_model::{ReadModel, RegistrationReadModel};
pub use views::{RegistrationView, ResolvedPair, RoomPair, RoomPairingView};
