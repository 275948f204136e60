//! [`Query`] collection related to multiple [`Artist`]s.

use common::operations::By;

use crate::domain::Artist;
#[cfg(doc)]
use crate::Query;

use super::StoreQuery;

/// Queries all the known [`Artist`]s in their fetch order.
pub type All = StoreQuery<By<Vec<Artist>, ()>>;
