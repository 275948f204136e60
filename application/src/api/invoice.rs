//! [`Invoice`]-related definitions.

use common::{Date, DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar,
};
use service::{domain, query, read, Query as _};
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// An invoice.
#[derive(Clone, Debug, From)]
pub struct Invoice(domain::Invoice);

/// Bill issued to a `Promoter` for a confirmed `Booking`.
#[graphql_object(context = Context)]
impl Invoice {
    /// Unique identifier of this `Invoice`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// ID of the billed `Booking`.
    pub fn booking_id(&self) -> api::booking::Id {
        self.0.booking_id.into()
    }

    /// Billed `Booking`, if it's known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Invoice.booking",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn booking(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Booking>, Error> {
        ctx.service()
            .execute(query::booking::ById::by(self.0.booking_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|b| b.map(Into::into))
    }

    /// Amount to be paid.
    pub fn amount(&self) -> Amount {
        self.0.amount.into()
    }

    /// Current status of this `Invoice`.
    pub fn status(&self) -> Status {
        self.0.status().into()
    }

    /// `Date` this `Invoice` is due.
    pub fn due_date(&self) -> Date {
        self.0.due_date.coerce()
    }

    /// Notes to this `Invoice`, if any.
    pub fn notes(&self) -> Option<Notes> {
        self.0.notes.clone().map(Into::into)
    }

    /// `DateTime` when this `Invoice` was last sent, if it was.
    pub fn sent_at(&self) -> Option<DateTime> {
        self.0.sent_at().map(|at| at.coerce())
    }

    /// `DateTime` when this `Invoice` was paid, if it was.
    pub fn paid_at(&self) -> Option<DateTime> {
        self.0.paid_at().map(|at| at.coerce())
    }

    /// Actions available for this `Invoice` in its current state.
    pub fn actions(&self) -> Actions {
        read::invoice::Actions::from(&self.0).into()
    }

    /// `DateTime` when this `Invoice` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of an `Invoice`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::invoice::Id)]
#[into(domain::invoice::Id)]
#[graphql(name = "InvoiceId", transparent)]
pub struct Id(Uuid);

/// Billed amount of an `Invoice`: at least one whole unit of its currency,
/// in `{major}.{minor}{currency}` format.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "InvoiceAmount", with = scalar::Via::<Money>)]
pub struct Amount(domain::invoice::Amount);

impl AsRef<Money> for Amount {
    fn as_ref(&self) -> &Money {
        self.0.as_ref()
    }
}

impl TryFrom<Money> for Amount {
    type Error = &'static str;

    fn try_from(money: Money) -> Result<Self, Self::Error> {
        domain::invoice::Amount::try_from(money).map(Self)
    }
}

/// Notes to an `Invoice`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "InvoiceNotes", with = scalar::Via::<domain::invoice::Notes>)]
pub struct Notes(domain::invoice::Notes);

/// Lifecycle status of an `Invoice`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "InvoiceStatus")]
pub enum Status {
    /// Created, but not sent yet.
    Draft,

    /// Sent to the promoter.
    Sent,

    /// Paid by the promoter.
    Paid,

    /// Sent, but not paid before its due date.
    Overdue,
}

impl From<domain::invoice::Status> for Status {
    fn from(status: domain::invoice::Status) -> Self {
        use domain::invoice::Status as S;
        match status {
            S::Draft => Self::Draft,
            S::Sent => Self::Sent,
            S::Paid => Self::Paid,
            S::Overdue => Self::Overdue,
        }
    }
}

impl From<Status> for domain::invoice::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Draft => Self::Draft,
            Status::Sent => Self::Sent,
            Status::Paid => Self::Paid,
            Status::Overdue => Self::Overdue,
        }
    }
}

/// Actions available for an [`Invoice`].
#[derive(Clone, Copy, Debug, From)]
pub struct Actions(read::invoice::Actions);

/// Actions available for an `Invoice` in its current state.
#[graphql_object(name = "InvoiceActions", context = Context)]
impl Actions {
    /// Indicator whether the `Invoice` may be (re-)sent.
    #[must_use]
    pub fn can_send(&self) -> bool {
        self.0.send
    }

    /// Indicator whether the `Invoice` may be marked as paid.
    #[must_use]
    pub fn can_mark_paid(&self) -> bool {
        self.0.mark_paid
    }
}

/// Criteria of selecting `Invoice`s.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "InvoiceFilter")]
pub struct Filter {
    /// Only `Invoice`s in this status.
    pub status: Option<Status>,

    /// Only `Invoice`s whose artist or promoter name contains this text,
    /// ignoring the letter case.
    pub text: Option<String>,
}

impl From<Filter> for read::invoice::list::Filter {
    fn from(filter: Filter) -> Self {
        let Filter { status, text } = filter;
        Self {
            status: status.map(Into::into),
            text: text.filter(|t| !t.is_empty()),
        }
    }
}
