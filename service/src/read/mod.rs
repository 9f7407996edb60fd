//! Read entities definitions.

pub mod ride;
