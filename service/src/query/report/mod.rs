//! Reporting [`Query`]s over [`Ride`]s.
//!
//! [`Query`]: crate::Query
//! [`Ride`]: crate::domain::Ride

pub mod active_rides_price;
pub mod income;

pub use self::{active_rides_price::ActiveRidesPrice, income::Income};
