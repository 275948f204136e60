//! [`Query`] collection related to multiple [`Invoice`]s.

use common::operations::By;

#[cfg(doc)]
use crate::{domain::Invoice, Query};
use crate::read::invoice::list;

use super::StoreQuery;

/// Queries [`Invoice`]s matching a [`list::Filter`].
pub type List = StoreQuery<By<Vec<list::Item>, list::Filter>>;
