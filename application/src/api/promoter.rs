//! [`Promoter`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// An event promoter.
#[derive(Clone, Debug, From)]
pub struct Promoter(domain::Promoter);

/// An event promoter booking the agency's artists.
#[graphql_object(context = Context)]
impl Promoter {
    /// Unique identifier of this `Promoter`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `Promoter`.
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Email to contact this `Promoter` by.
    pub fn email(&self) -> api::contact::Email {
        self.0.email.clone().into()
    }

    /// Phone to contact this `Promoter` by.
    pub fn phone(&self) -> api::contact::Phone {
        self.0.phone.clone().into()
    }

    /// Company this `Promoter` represents.
    pub fn company(&self) -> Company {
        self.0.company.clone().into()
    }

    /// `DateTime` when this `Promoter` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Promoter`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::promoter::Id)]
#[into(domain::promoter::Id)]
#[graphql(name = "PromoterId", transparent)]
pub struct Id(Uuid);

/// Name of a `Promoter`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "PromoterName", with = scalar::Via::<domain::promoter::Name>)]
pub struct Name(domain::promoter::Name);

/// Company a `Promoter` represents.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PromoterCompany",
    with = scalar::Via::<domain::promoter::Company>,
)]
pub struct Company(domain::promoter::Company);
