//! [`Query`] collection related to a single [`Booking`].

use common::operations::By;

use crate::domain::{booking, Booking};
#[cfg(doc)]
use crate::Query;

use super::StoreQuery;

/// Queries a [`Booking`] by its [`booking::Id`].
pub type ById = StoreQuery<By<Option<Booking>, booking::Id>>;
