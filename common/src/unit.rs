//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing a document being sent out.
#[derive(Clone, Copy, Debug)]
pub struct Sending;

/// Marker type describing a payment being received.
#[derive(Clone, Copy, Debug)]
pub struct Payment;

/// Marker type describing a due date.
#[derive(Clone, Copy, Debug)]
pub struct Due;
