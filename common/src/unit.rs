//! Marker types.

/// Marker type describing a beginning of something (a ride, for example).
#[derive(Clone, Copy, Debug)]
pub struct Start;

/// Marker type describing an ending of something (a ride, for example).
#[derive(Clone, Copy, Debug)]
pub struct End;
