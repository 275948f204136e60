//! [`Venue`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api::scalar, AsError, Context, Error};

/// A venue.
#[derive(Clone, Debug, From)]
pub struct Venue(domain::Venue);

/// A place hosting performances.
#[graphql_object(context = Context)]
impl Venue {
    /// Unique identifier of this `Venue`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `Venue`.
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// City this `Venue` is located in.
    pub fn city(&self) -> City {
        self.0.city.clone().into()
    }

    /// State (or region) this `Venue` is located in, if any.
    pub fn state(&self) -> Option<State> {
        self.0.state.clone().map(Into::into)
    }

    /// Number of people this `Venue` can hold.
    pub fn capacity(&self, ctx: &Context) -> Result<i32, Error> {
        i32::try_from(u32::from(self.0.capacity))
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// `DateTime` when this `Venue` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Venue`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::venue::Id)]
#[into(domain::venue::Id)]
#[graphql(name = "VenueId", transparent)]
pub struct Id(Uuid);

/// Name of a `Venue`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "VenueName", with = scalar::Via::<domain::venue::Name>)]
pub struct Name(domain::venue::Name);

/// City a `Venue` is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "VenueCity", with = scalar::Via::<domain::venue::City>)]
pub struct City(domain::venue::City);

/// State (or region) a `Venue` is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "VenueState", with = scalar::Via::<domain::venue::State>)]
pub struct State(domain::venue::State);
