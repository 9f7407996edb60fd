//! [`Query`] collection related to the multiple [`Scooter`]s.

use common::operations::By;

use crate::domain::Scooter;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Scooter`]s ordered by their IDs.
pub type All = DatabaseQuery<By<Vec<Scooter>, ()>>;
