//! [`Artist`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// A performing artist.
#[derive(Clone, Debug, From)]
pub struct Artist(domain::Artist);

/// A performing artist represented by the agency.
#[graphql_object(context = Context)]
impl Artist {
    /// Unique identifier of this `Artist`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `Artist`.
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Email to contact this `Artist` by.
    pub fn email(&self) -> api::contact::Email {
        self.0.email.clone().into()
    }

    /// Phone to contact this `Artist` by.
    pub fn phone(&self) -> api::contact::Phone {
        self.0.phone.clone().into()
    }

    /// Musical genre of this `Artist`.
    pub fn genre(&self) -> Genre {
        self.0.genre.clone().into()
    }

    /// Short biography of this `Artist`.
    pub fn bio(&self) -> Bio {
        self.0.bio.clone().into()
    }

    /// URL of this `Artist`'s image, if any.
    pub fn image_url(&self) -> Option<ImageUrl> {
        self.0.image_url.clone().map(Into::into)
    }

    /// `DateTime` when this `Artist` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of an `Artist`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::artist::Id)]
#[into(domain::artist::Id)]
#[graphql(name = "ArtistId", transparent)]
pub struct Id(Uuid);

/// Name of an `Artist`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ArtistName", with = scalar::Via::<domain::artist::Name>)]
pub struct Name(domain::artist::Name);

/// Musical genre of an `Artist`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ArtistGenre", with = scalar::Via::<domain::artist::Genre>)]
pub struct Genre(domain::artist::Genre);

/// Biography of an `Artist`: 10 to 500 characters.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ArtistBio", with = scalar::Via::<domain::artist::Bio>)]
pub struct Bio(domain::artist::Bio);

/// Absolute HTTP(S) URL of an `Artist`'s image.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ArtistImageUrl",
    with = scalar::Via::<domain::artist::ImageUrl>,
)]
pub struct ImageUrl(domain::artist::ImageUrl);
