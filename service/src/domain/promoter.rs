//! [`Promoter`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};

use super::contact::{Email, Phone};

/// Event promoter booking [`Artist`]s.
///
/// [`Artist`]: super::Artist
#[derive(Clone, Debug)]
pub struct Promoter {
    /// ID of this [`Promoter`].
    pub id: Id,

    /// [`Name`] of this [`Promoter`].
    pub name: Name,

    /// [`Email`] of this [`Promoter`].
    pub email: Email,

    /// [`Phone`] of this [`Promoter`].
    pub phone: Phone,

    /// [`Company`] this [`Promoter`] represents.
    pub company: Company,

    /// [`DateTime`] when this [`Promoter`] was created.
    pub created_at: CreationDateTime,
}

define_id! {
    #[doc = "ID of a [`Promoter`]."]
    Id
}

define_text! {
    #[doc = "Name of a [`Promoter`]."]
    Name(2..=255)
}

define_text! {
    #[doc = "Company a [`Promoter`] represents."]
    Company(2..=255)
}

/// [`DateTime`] when a [`Promoter`] was created.
pub type CreationDateTime = DateTimeOf<(Promoter, unit::Creation)>;
