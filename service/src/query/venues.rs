//! [`Query`] collection related to multiple [`Venue`]s.

use common::operations::By;

use crate::domain::Venue;
#[cfg(doc)]
use crate::Query;

use super::StoreQuery;

/// Queries all the known [`Venue`]s in their fetch order.
pub type All = StoreQuery<By<Vec<Venue>, ()>>;
