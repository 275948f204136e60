//! [`Query`] collection related to multiple [`Promoter`]s.

use common::operations::By;

use crate::domain::Promoter;
#[cfg(doc)]
use crate::Query;

use super::StoreQuery;

/// Queries all the known [`Promoter`]s in their fetch order.
pub type All = StoreQuery<By<Vec<Promoter>, ()>>;
