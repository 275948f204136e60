//! GraphQL [`Mutation`]s definitions.

use common::Date;
use juniper::graphql_object;
use service::{command, domain, Command as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `Artist`.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            genre = %genre,
            gql.name = "createArtist",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_artist(
        name: api::artist::Name,
        email: api::contact::Email,
        phone: api::contact::Phone,
        genre: api::artist::Genre,
        bio: api::artist::Bio,
        image_url: Option<api::artist::ImageUrl>,
        ctx: &Context,
    ) -> Result<api::Artist, Error> {
        ctx.service()
            .execute(command::CreateArtist {
                name: name.into(),
                email: email.into(),
                phone: phone.into(),
                genre: genre.into(),
                bio: bio.into(),
                image_url: image_url.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Promoter`.
    #[tracing::instrument(
        skip_all,
        fields(
            company = %company,
            email = %email,
            gql.name = "createPromoter",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_promoter(
        name: api::promoter::Name,
        email: api::contact::Email,
        phone: api::contact::Phone,
        company: api::promoter::Company,
        ctx: &Context,
    ) -> Result<api::Promoter, Error> {
        ctx.service()
            .execute(command::CreatePromoter {
                name: name.into(),
                email: email.into(),
                phone: phone.into(),
                company: company.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Venue`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_VENUE_CAPACITY` - provided `capacity` is not positive.
    #[tracing::instrument(
        skip_all,
        fields(
            capacity = capacity,
            city = %city,
            gql.name = "createVenue",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_venue(
        name: api::venue::Name,
        city: api::venue::City,
        state: Option<api::venue::State>,
        capacity: i32,
        ctx: &Context,
    ) -> Result<api::Venue, Error> {
        let capacity = u32::try_from(capacity)
            .ok()
            .and_then(domain::venue::Capacity::new)
            .ok_or_else(|| VenueError::InvalidCapacity.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateVenue {
                name: name.into(),
                city: city.into(),
                state: state.map(Into::into),
                capacity,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Proposes a new `Booking` of the `Artist` for the `Promoter` at the
    /// `Venue`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ARTIST_NOT_EXISTS` - the `Artist` with the specified ID does not
    ///                         exist;
    /// - `PROMOTER_NOT_EXISTS` - the `Promoter` with the specified ID does
    ///                           not exist;
    /// - `VENUE_NOT_EXISTS` - the `Venue` with the specified ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            artist_id = %artist_id,
            date = %date,
            fee = %fee,
            gql.name = "createBooking",
            otel.name = Self::SPAN_NAME,
            promoter_id = %promoter_id,
            venue_id = %venue_id,
        ),
    )]
    pub async fn create_booking(
        artist_id: api::artist::Id,
        promoter_id: api::promoter::Id,
        venue_id: api::venue::Id,
        date: Date,
        fee: api::booking::Fee,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        ctx.service()
            .execute(command::CreateBooking {
                artist_id: artist_id.into(),
                promoter_id: promoter_id.into(),
                venue_id: venue_id.into(),
                date: date.coerce(),
                fee: fee.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Approves the contract of a proposed `Booking`, confirming it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist;
    /// - `INVALID_TRANSITION` - the `Booking` is not proposed.
    #[tracing::instrument(
        skip_all,
        fields(
            booking_id = %booking_id,
            gql.name = "approveContract",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn approve_contract(
        booking_id: api::booking::Id,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        ctx.service()
            .execute(command::ApproveContract {
                booking_id: booking_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Cancels a `Booking` which is neither cancelled nor completed yet.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist;
    /// - `INVALID_TRANSITION` - the `Booking` is cancelled or completed
    ///                          already.
    #[tracing::instrument(
        skip_all,
        fields(
            booking_id = %booking_id,
            gql.name = "cancelBooking",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn cancel_booking(
        booking_id: api::booking::Id,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        ctx.service()
            .execute(command::CancelBooking {
                booking_id: booking_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Marks a confirmed `Booking` as performed.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist;
    /// - `INVALID_TRANSITION` - the `Booking` is not confirmed.
    #[tracing::instrument(
        skip_all,
        fields(
            booking_id = %booking_id,
            gql.name = "completeBooking",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn complete_booking(
        booking_id: api::booking::Id,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        ctx.service()
            .execute(command::CompleteBooking {
                booking_id: booking_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Generates the `Contract` of a proposed or confirmed `Booking`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist;
    /// - `CONTRACT_EXISTS` - the `Booking` has a `Contract` already;
    /// - `INELIGIBLE_BOOKING` - the `Booking` is cancelled or completed.
    #[tracing::instrument(
        skip_all,
        fields(
            booking_id = %booking_id,
            deposit = ?deposit.map(|d| d.to_string()),
            gql.name = "generateContract",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn generate_contract(
        booking_id: api::booking::Id,
        deposit: Option<api::contract::Deposit>,
        deposit_due_date: Option<Date>,
        special_terms: Option<api::contract::SpecialTerms>,
        ctx: &Context,
    ) -> Result<api::Contract, Error> {
        ctx.service()
            .execute(command::GenerateContract {
                booking_id: booking_id.into(),
                deposit: deposit.map(Into::into),
                deposit_due_date: deposit_due_date.map(Date::coerce),
                special_terms: special_terms.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a draft `Invoice` for a confirmed `Booking`.
    ///
    /// The `Booking` fee is billed if no `amount` is provided.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist;
    /// - `DUE_DATE_IN_PAST` - provided `dueDate` has passed already;
    /// - `INELIGIBLE_BOOKING` - the `Booking` is not confirmed or is invoiced
    ///                          already.
    #[tracing::instrument(
        skip_all,
        fields(
            amount = ?amount.map(|a| a.to_string()),
            booking_id = %booking_id,
            due_date = %due_date,
            gql.name = "createInvoice",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_invoice(
        booking_id: api::booking::Id,
        amount: Option<api::invoice::Amount>,
        due_date: Date,
        notes: Option<api::invoice::Notes>,
        ctx: &Context,
    ) -> Result<api::Invoice, Error> {
        ctx.service()
            .execute(command::CreateInvoice {
                booking_id: booking_id.into(),
                amount: amount.map(Into::into),
                due_date: due_date.coerce(),
                notes: notes.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Sends (or re-sends) an `Invoice` to the `Promoter`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVOICE_NOT_EXISTS` - the `Invoice` with the specified ID does not
    ///                          exist;
    /// - `INVALID_TRANSITION` - the `Invoice` is paid or overdue.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "sendInvoice",
            invoice_id = %invoice_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn send_invoice(
        invoice_id: api::invoice::Id,
        ctx: &Context,
    ) -> Result<api::Invoice, Error> {
        ctx.service()
            .execute(command::SendInvoice {
                invoice_id: invoice_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Marks an `Invoice` as paid.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVOICE_NOT_EXISTS` - the `Invoice` with the specified ID does not
    ///                          exist;
    /// - `INVALID_TRANSITION` - the `Invoice` is paid already.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "markInvoicePaid",
            invoice_id = %invoice_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn mark_invoice_paid(
        invoice_id: api::invoice::Id,
        ctx: &Context,
    ) -> Result<api::Invoice, Error> {
        ctx.service()
            .execute(command::MarkInvoicePaid {
                invoice_id: invoice_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Attaches an `Itinerary` to a `Booking`, replacing the previous one (if
    /// any).
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist;
    /// - `NO_ITINERARY_ITEMS` - provided `items` are empty;
    /// - `INELIGIBLE_BOOKING` - the `Booking` is cancelled.
    #[tracing::instrument(
        skip_all,
        fields(
            booking_id = %booking_id,
            date = %date,
            gql.name = "attachItinerary",
            items = items.len(),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn attach_itinerary(
        booking_id: api::booking::Id,
        date: Date,
        items: Vec<api::itinerary::ItemInput>,
        notes: Option<api::itinerary::Notes>,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        let items = domain::itinerary::Items::new(
            items.into_iter().map(Into::into).collect(),
        )
        .ok_or_else(|| ItineraryError::NoItems.into())
        .map_err(ctx.error())?;

        ctx.service()
            .execute(command::AttachItinerary {
                booking_id: booking_id.into(),
                date: date.coerce(),
                items,
                notes: notes.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Re-fetches all the collections, replacing the cached ones.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "refreshStore",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn refresh_store(ctx: &Context) -> Result<bool, Error> {
        ctx.service()
            .execute(command::RefreshStore)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }
}

define_error! {
    enum VenueError {
        #[code = "INVALID_VENUE_CAPACITY"]
        #[status = BAD_REQUEST]
        #[message = "`Venue` capacity must be positive"]
        InvalidCapacity,
    }
}

define_error! {
    enum ItineraryError {
        #[code = "NO_ITINERARY_ITEMS"]
        #[status = BAD_REQUEST]
        #[message = "`Itinerary` must have at least one item"]
        NoItems,
    }
}

impl AsError for command::create_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ARTIST_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Artist` with the specified ID does not exist"]
                ArtistNotExists,

                #[code = "PROMOTER_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Promoter` with the specified ID does not exist"]
                PromoterNotExists,

                #[code = "VENUE_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Venue` with the specified ID does not exist"]
                VenueNotExists,
            }
        }

        match self {
            Self::ArtistNotExists(_) => Some(Error::ArtistNotExists.into()),
            Self::Db(e) => e.try_as_error(),
            Self::PromoterNotExists(_) => {
                Some(Error::PromoterNotExists.into())
            }
            Self::VenueNotExists(_) => Some(Error::VenueNotExists.into()),
        }
    }
}

impl AsError for command::transit_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::BookingNotExists(_) => {
                Some(api::BookingError::NotExists.into())
            }
            Self::Db(e) => e.try_as_error(),
            Self::InvalidTransition(_) => {
                Some(api::BookingError::InvalidTransition.into())
            }
        }
    }
}

impl AsError for command::generate_contract::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CONTRACT_EXISTS"]
                #[status = CONFLICT]
                #[message = "`Booking` has a `Contract` already"]
                ContractExists,
            }
        }

        match self {
            Self::BookingNotExists(_) => {
                Some(api::BookingError::NotExists.into())
            }
            Self::ContractExists(_) => Some(Error::ContractExists.into()),
            Self::Db(e) => e.try_as_error(),
            Self::IneligibleBooking(..) => {
                Some(api::BookingError::Ineligible.into())
            }
        }
    }
}

impl AsError for command::create_invoice::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "DUE_DATE_IN_PAST"]
                #[status = BAD_REQUEST]
                #[message = "`Invoice` due date must not be in the past"]
                DueDateInPast,
            }
        }

        match self {
            Self::BookingNotExists(_) => {
                Some(api::BookingError::NotExists.into())
            }
            Self::Db(e) => e.try_as_error(),
            Self::DueDateInPast(_) => Some(Error::DueDateInPast.into()),
            Self::IneligibleBooking(_) => {
                Some(api::BookingError::Ineligible.into())
            }
        }
    }
}

impl AsError for command::send_invoice::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidTransition(_) => {
                Some(api::InvoiceError::InvalidTransition.into())
            }
            Self::InvoiceNotExists(_) => {
                Some(api::InvoiceError::NotExists.into())
            }
        }
    }
}

impl AsError for command::mark_invoice_paid::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidTransition(_) => {
                Some(api::InvoiceError::InvalidTransition.into())
            }
            Self::InvoiceNotExists(_) => {
                Some(api::InvoiceError::NotExists.into())
            }
        }
    }
}

impl AsError for command::attach_itinerary::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::BookingNotExists(_) => {
                Some(api::BookingError::NotExists.into())
            }
            Self::Db(e) => e.try_as_error(),
            Self::IneligibleBooking(..) => {
                Some(api::BookingError::Ineligible.into())
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{
        command,
        domain::{booking, invoice},
    };

    use crate::AsError as _;

    #[test]
    fn command_errors_map_to_codes() {
        let id = booking::Id::new();

        let cases = [
            (
                command::transit_booking::ExecutionError::InvalidTransition(
                    booking::InvalidTransition {
                        from: booking::Status::Completed,
                        to: booking::Status::Cancelled,
                    },
                )
                .as_error(),
                "INVALID_TRANSITION",
                http::StatusCode::CONFLICT,
            ),
            (
                command::create_invoice::ExecutionError::IneligibleBooking(id)
                    .as_error(),
                "INELIGIBLE_BOOKING",
                http::StatusCode::CONFLICT,
            ),
            (
                command::create_invoice::ExecutionError::DueDateInPast(
                    invoice::DueDate::from_ymd(2020, 1, 1).unwrap(),
                )
                .as_error(),
                "DUE_DATE_IN_PAST",
                http::StatusCode::BAD_REQUEST,
            ),
            (
                command::attach_itinerary::ExecutionError::IneligibleBooking(
                    id,
                    booking::Status::Cancelled,
                )
                .as_error(),
                "INELIGIBLE_BOOKING",
                http::StatusCode::CONFLICT,
            ),
            (
                command::mark_invoice_paid::ExecutionError::InvoiceNotExists(
                    invoice::Id::new(),
                )
                .as_error(),
                "INVOICE_NOT_EXISTS",
                http::StatusCode::NOT_FOUND,
            ),
        ];

        for (err, code, status) in cases {
            assert_eq!(err.code, code);
            assert_eq!(err.status_code, status);
        }
    }
}
