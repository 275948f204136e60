//! [`Query`] collection related to a single [`Contract`].

use common::operations::By;

use crate::domain::{booking, Contract};
#[cfg(doc)]
use crate::{domain::Booking, Query};

use super::DatabaseQuery;

/// Queries a [`Contract`] of the [`Booking`] with the provided
/// [`booking::Id`].
pub type ByBookingId = DatabaseQuery<By<Option<Contract>, booking::Id>>;
