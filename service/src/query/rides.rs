//! [`Query`] collection related to [`Ride`]s.

use common::{datetime::Year, operations::By};

use crate::{domain::Ride, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries completed [`Ride`]s in order of their completion, optionally
/// ended in the provided [`Year`].
pub type History = DatabaseQuery<By<Vec<Ride>, Option<Year>>>;

/// Queries active [`Ride`]s, optionally started in the provided [`Year`].
pub type Active = DatabaseQuery<By<Vec<read::ride::Active<Ride>>, Option<Year>>>;
