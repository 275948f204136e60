//! [`Query`] collection related to a single [`Itinerary`].

use common::operations::By;

use crate::domain::{booking, Itinerary};
#[cfg(doc)]
use crate::{domain::Booking, Query};

use super::DatabaseQuery;

/// Queries an [`Itinerary`] of the [`Booking`] with the provided
/// [`booking::Id`].
pub type ByBookingId = DatabaseQuery<By<Option<Itinerary>, booking::Id>>;
