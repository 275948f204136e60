//! [`Query`] collection related to multiple [`Booking`]s.

use common::operations::By;

#[cfg(doc)]
use crate::{domain::Booking, Query};
use crate::read::booking::list;

use super::StoreQuery;

/// Queries [`Booking`]s matching a [`list::Filter`], along with the names of
/// the involved parties.
pub type List = StoreQuery<By<Vec<list::Item>, list::Filter>>;
