//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, Query as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns all the known `Artist`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "artists",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn artists(ctx: &Context) -> Result<Vec<api::Artist>, Error> {
        ctx.service()
            .execute(query::artists::All::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|all| all.into_iter().map(Into::into).collect())
    }

    /// Returns all the known `Promoter`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "promoters",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn promoters(
        ctx: &Context,
    ) -> Result<Vec<api::Promoter>, Error> {
        ctx.service()
            .execute(query::promoters::All::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|all| all.into_iter().map(Into::into).collect())
    }

    /// Returns all the known `Venue`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "venues",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn venues(ctx: &Context) -> Result<Vec<api::Venue>, Error> {
        ctx.service()
            .execute(query::venues::All::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|all| all.into_iter().map(Into::into).collect())
    }

    /// Returns the `Booking` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "booking",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn booking(
        id: api::booking::Id,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        ctx.service()
            .execute(query::booking::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::BookingError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Booking`s matching the provided `filter`, in their fetch
    /// order.
    ///
    /// All the `Booking`s are returned if no `filter` is provided.
    #[tracing::instrument(
        skip_all,
        fields(
            filter = ?filter,
            gql.name = "bookings",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn bookings(
        filter: Option<api::booking::Filter>,
        ctx: &Context,
    ) -> Result<Vec<api::Booking>, Error> {
        ctx.service()
            .execute(query::bookings::List::by(
                filter.unwrap_or_default().into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|items| {
                items.into_iter().map(|i| i.booking.into()).collect()
            })
    }

    /// Returns the `Invoice` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVOICE_NOT_EXISTS` - the `Invoice` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "invoice",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn invoice(
        id: api::invoice::Id,
        ctx: &Context,
    ) -> Result<api::Invoice, Error> {
        ctx.service()
            .execute(query::invoice::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::InvoiceError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Invoice`s matching the provided `filter`, in their fetch
    /// order.
    #[tracing::instrument(
        skip_all,
        fields(
            filter = ?filter,
            gql.name = "invoices",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn invoices(
        filter: Option<api::invoice::Filter>,
        ctx: &Context,
    ) -> Result<Vec<api::Invoice>, Error> {
        ctx.service()
            .execute(query::invoices::List::by(
                filter.unwrap_or_default().into(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|items| {
                items.into_iter().map(|i| i.invoice.into()).collect()
            })
    }

    /// Fetches the `Contract` generated for the `Booking` with the specified
    /// ID, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            booking_id = %booking_id,
            gql.name = "contract",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn contract(
        booking_id: api::booking::Id,
        ctx: &Context,
    ) -> Result<Option<api::Contract>, Error> {
        ctx.service()
            .execute(query::contract::ByBookingId::by(booking_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|c| c.map(Into::into))
    }

    /// Fetches the `Itinerary` attached to the `Booking` with the specified
    /// ID, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            booking_id = %booking_id,
            gql.name = "itinerary",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn itinerary(
        booking_id: api::booking::Id,
        ctx: &Context,
    ) -> Result<Option<api::Itinerary>, Error> {
        ctx.service()
            .execute(query::itinerary::ByBookingId::by(booking_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|i| i.map(Into::into))
    }
}
