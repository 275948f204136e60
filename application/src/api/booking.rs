//! [`Booking`]-related definitions.

use common::{Date, DateTime, Money};
use derive_more::{Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar,
};
use service::{domain, query, read, Query as _};
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// A booking.
#[derive(Clone, Debug, From)]
pub struct Booking(domain::Booking);

/// Scheduled performance of an `Artist` for a `Promoter` at a `Venue`.
#[graphql_object(context = Context)]
impl Booking {
    /// Unique identifier of this `Booking`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// ID of the performing `Artist`.
    pub fn artist_id(&self) -> api::artist::Id {
        self.0.artist_id.into()
    }

    /// Performing `Artist`, if it's known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.artist",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn artist(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Artist>, Error> {
        ctx.service()
            .execute(query::artist::ById::by(self.0.artist_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|a| a.map(Into::into))
    }

    /// ID of the `Promoter` this `Booking` is made for.
    pub fn promoter_id(&self) -> api::promoter::Id {
        self.0.promoter_id.into()
    }

    /// `Promoter` this `Booking` is made for, if it's known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.promoter",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn promoter(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Promoter>, Error> {
        ctx.service()
            .execute(query::promoter::ById::by(self.0.promoter_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|p| p.map(Into::into))
    }

    /// ID of the `Venue` hosting the performance.
    pub fn venue_id(&self) -> api::venue::Id {
        self.0.venue_id.into()
    }

    /// `Venue` hosting the performance, if it's known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.venue",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn venue(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Venue>, Error> {
        ctx.service()
            .execute(query::venue::ById::by(self.0.venue_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|v| v.map(Into::into))
    }

    /// `Date` of the performance.
    pub fn date(&self) -> Date {
        self.0.date.coerce()
    }

    /// Fee agreed for the performance.
    pub fn fee(&self) -> Fee {
        self.0.fee.into()
    }

    /// Current status of this `Booking`.
    pub fn status(&self) -> Status {
        self.0.status().into()
    }

    /// Indicator whether a `Contract` was generated for this `Booking`.
    pub fn has_contract(&self) -> bool {
        self.0.documents().has_contract()
    }

    /// Indicator whether an `Invoice` was created for this `Booking`.
    pub fn has_invoice(&self) -> bool {
        self.0.documents().has_invoice()
    }

    /// Indicator whether an `Itinerary` was attached to this `Booking`.
    pub fn has_itinerary(&self) -> bool {
        self.0.documents().has_itinerary()
    }

    /// Actions available for this `Booking` in its current state.
    pub fn actions(&self) -> Actions {
        read::booking::Actions::from(&self.0).into()
    }

    /// `Invoice` billing this `Booking`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.invoice",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn invoice(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Invoice>, Error> {
        ctx.service()
            .execute(query::invoice::ByBookingId::by(self.0.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|i| i.map(Into::into))
    }

    /// `Contract` generated for this `Booking`, if any.
    pub async fn contract(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Contract>, Error> {
        if !self.0.documents().has_contract() {
            return Ok(None);
        }
        api::Query::contract(self.0.id.into(), ctx).await
    }

    /// `Itinerary` attached to this `Booking`, if any.
    pub async fn itinerary(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Itinerary>, Error> {
        if !self.0.documents().has_itinerary() {
            return Ok(None);
        }
        api::Query::itinerary(self.0.id.into(), ctx).await
    }

    /// `DateTime` when this `Booking` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Booking`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::booking::Id)]
#[into(domain::booking::Id)]
#[graphql(name = "BookingId", transparent)]
pub struct Id(Uuid);

/// Fee of a `Booking`: at least one whole unit of its currency, in
/// `{major}.{minor}{currency}` format.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "BookingFee", with = scalar::Via::<Money>)]
pub struct Fee(domain::booking::Fee);

impl AsRef<Money> for Fee {
    fn as_ref(&self) -> &Money {
        self.0.as_ref()
    }
}

impl TryFrom<Money> for Fee {
    type Error = &'static str;

    fn try_from(money: Money) -> Result<Self, Self::Error> {
        domain::booking::Fee::try_from(money).map(Self)
    }
}

/// Lifecycle status of a `Booking`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "BookingStatus")]
pub enum Status {
    /// Proposed to the parties, awaiting contract approval.
    Proposed,

    /// Contract approved by the parties.
    Confirmed,

    /// Called off before the performance.
    Cancelled,

    /// Performed.
    Completed,
}

impl From<domain::booking::Status> for Status {
    fn from(status: domain::booking::Status) -> Self {
        use domain::booking::Status as S;
        match status {
            S::Proposed => Self::Proposed,
            S::Confirmed => Self::Confirmed,
            S::Cancelled => Self::Cancelled,
            S::Completed => Self::Completed,
        }
    }
}

impl From<Status> for domain::booking::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Proposed => Self::Proposed,
            Status::Confirmed => Self::Confirmed,
            Status::Cancelled => Self::Cancelled,
            Status::Completed => Self::Completed,
        }
    }
}

/// Actions available for a [`Booking`].
#[derive(Clone, Copy, Debug, From)]
pub struct Actions(read::booking::Actions);

/// Actions available for a `Booking` in its current state.
#[graphql_object(name = "BookingActions", context = Context)]
impl Actions {
    /// Indicator whether the `Booking` contract may be approved.
    #[must_use]
    pub fn can_approve_contract(&self) -> bool {
        self.0.approve_contract
    }

    /// Indicator whether a `Contract` may be generated.
    #[must_use]
    pub fn can_generate_contract(&self) -> bool {
        self.0.generate_contract
    }

    /// Indicator whether an `Invoice` may be created.
    #[must_use]
    pub fn can_create_invoice(&self) -> bool {
        self.0.create_invoice
    }

    /// Indicator whether an `Itinerary` may be attached.
    #[must_use]
    pub fn can_attach_itinerary(&self) -> bool {
        self.0.attach_itinerary
    }

    /// Indicator whether the `Booking` may be cancelled.
    #[must_use]
    pub fn can_cancel(&self) -> bool {
        self.0.cancel
    }

    /// Indicator whether the `Booking` may be completed.
    #[must_use]
    pub fn can_complete(&self) -> bool {
        self.0.complete
    }
}

/// Criteria of selecting `Booking`s.
///
/// All the specified criteria must hold for a `Booking` to be selected.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "BookingFilter")]
pub struct Filter {
    /// Only `Booking`s of this `Artist`.
    pub artist_id: Option<api::artist::Id>,

    /// Only `Booking`s in this status.
    pub status: Option<Status>,

    /// Only `Booking`s dated on or after this `Date`.
    pub start_date: Option<Date>,

    /// Only `Booking`s whose artist, promoter or venue name contains this
    /// text, ignoring the letter case.
    pub text: Option<String>,
}

impl From<Filter> for read::booking::list::Filter {
    fn from(filter: Filter) -> Self {
        let Filter {
            artist_id,
            status,
            start_date,
            text,
        } = filter;
        Self {
            artist_id: artist_id.map(Into::into),
            status: status.map(Into::into),
            start_date: start_date.map(Date::coerce),
            text: text.filter(|t| !t.is_empty()),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::domain::booking;

    use super::Status;

    #[test]
    fn status_round_trips_every_variant() {
        for &s in booking::Status::ALL {
            assert_eq!(booking::Status::from(Status::from(s)), s);
        }
    }
}
