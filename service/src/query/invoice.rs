//! [`Query`] collection related to a single [`Invoice`].

use common::operations::By;

use crate::domain::{booking, invoice, Invoice};
#[cfg(doc)]
use crate::{domain::Booking, Query};

use super::StoreQuery;

/// Queries an [`Invoice`] by its [`invoice::Id`].
pub type ById = StoreQuery<By<Option<Invoice>, invoice::Id>>;

/// Queries an [`Invoice`] of the [`Booking`] with the provided
/// [`booking::Id`].
pub type ByBookingId = StoreQuery<By<Option<Invoice>, booking::Id>>;
