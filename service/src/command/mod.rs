//! [`Command`] definition.

pub mod add_scooter;
pub mod end_rent;
pub mod remove_scooter;
pub mod start_rent;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_scooter::AddScooter, end_rent::EndRent, remove_scooter::RemoveScooter,
    start_rent::StartRent,
};
