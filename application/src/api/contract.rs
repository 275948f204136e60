//! [`Contract`]-related definitions.

use common::{Date, DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// A performance contract.
#[derive(Clone, Debug, From)]
pub struct Contract(domain::Contract);

/// Performance contract generated for a `Booking`.
#[graphql_object(context = Context)]
impl Contract {
    /// Unique identifier of this `Contract`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// ID of the `Booking` this `Contract` is generated for.
    pub fn booking_id(&self) -> api::booking::Id {
        self.0.booking_id.into()
    }

    /// Deposit to be paid before the performance, if any.
    pub fn deposit(&self) -> Option<Deposit> {
        self.0.deposit.map(Into::into)
    }

    /// `Date` the deposit is due, if any.
    pub fn deposit_due_date(&self) -> Option<Date> {
        self.0.deposit_due_date.map(|d| d.coerce())
    }

    /// Special terms of this `Contract`, if any.
    pub fn special_terms(&self) -> Option<SpecialTerms> {
        self.0.special_terms.clone().map(Into::into)
    }

    /// URL of the rendered `Contract` document.
    pub fn document_url(&self) -> String {
        self.0.document_url.to_string()
    }

    /// `DateTime` when this `Contract` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Contract`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::contract::Id)]
#[into(domain::contract::Id)]
#[graphql(name = "ContractId", transparent)]
pub struct Id(Uuid);

/// Deposit of a `Contract`: a non-negative amount in
/// `{major}.{minor}{currency}` format.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ContractDeposit", with = scalar::Via::<Money>)]
pub struct Deposit(domain::contract::Deposit);

impl AsRef<Money> for Deposit {
    fn as_ref(&self) -> &Money {
        self.0.as_ref()
    }
}

impl TryFrom<Money> for Deposit {
    type Error = &'static str;

    fn try_from(money: Money) -> Result<Self, Self::Error> {
        domain::contract::Deposit::try_from(money).map(Self)
    }
}

/// Special terms of a `Contract`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ContractSpecialTerms",
    with = scalar::Via::<domain::contract::SpecialTerms>,
)]
pub struct SpecialTerms(domain::contract::SpecialTerms);
