//! [`Query`] collection related to a single [`Artist`].

use common::operations::By;

use crate::domain::{artist, Artist};
#[cfg(doc)]
use crate::Query;

use super::StoreQuery;

/// Queries an [`Artist`] by its [`artist::Id`].
pub type ById = StoreQuery<By<Option<Artist>, artist::Id>>;
