//! Domain definitions.

pub mod rent;
pub mod ride;
pub mod scooter;

pub use self::{ride::Ride, scooter::Scooter};
