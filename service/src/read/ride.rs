//! [`Ride`] read model definition.

#[cfg(doc)]
use crate::domain::Ride;

/// Wrapper around [`Ride`] indicating that it [`is_active()`].
///
/// [`is_active()`]: Ride::is_active
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Active<T>(pub T);
