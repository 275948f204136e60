//! [`Query`] collection related to a single [`Promoter`].

use common::operations::By;

use crate::domain::{promoter, Promoter};
#[cfg(doc)]
use crate::Query;

use super::StoreQuery;

/// Queries a [`Promoter`] by its [`promoter::Id`].
pub type ById = StoreQuery<By<Option<Promoter>, promoter::Id>>;
