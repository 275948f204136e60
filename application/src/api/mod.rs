//! GraphQL API definitions.

pub mod artist;
pub mod booking;
pub mod contact;
pub mod contract;
pub mod invoice;
pub mod itinerary;
mod mutation;
pub mod promoter;
mod query;
pub mod scalar;
mod subscription;
pub mod venue;

use crate::define_error;

pub use self::{
    artist::Artist, booking::Booking, contract::Contract, invoice::Invoice,
    itinerary::Itinerary, mutation::Mutation, promoter::Promoter,
    query::Query, subscription::Subscription, venue::Venue,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

define_error! {
    enum BookingError {
        #[code = "BOOKING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Booking` with the specified ID does not exist"]
        NotExists,

        #[code = "INELIGIBLE_BOOKING"]
        #[status = CONFLICT]
        #[message = "`Booking` is not eligible for the requested document"]
        Ineligible,

        #[code = "INVALID_TRANSITION"]
        #[status = CONFLICT]
        #[message = "`Booking` cannot move into the requested status"]
        InvalidTransition,
    }
}

define_error! {
    enum InvoiceError {
        #[code = "INVOICE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Invoice` with the specified ID does not exist"]
        NotExists,

        #[code = "INVALID_TRANSITION"]
        #[status = CONFLICT]
        #[message = "`Invoice` cannot move into the requested status"]
        InvalidTransition,
    }
}
