//! [`Itinerary`]-related definitions.

use common::{Date, DateTime};
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar,
};
use service::domain;

use crate::{api, api::scalar, Context};

/// An itinerary.
#[derive(Clone, Debug, From)]
pub struct Itinerary(domain::Itinerary);

/// Day schedule of a `Booking`.
#[graphql_object(context = Context)]
impl Itinerary {
    /// ID of the `Booking` this `Itinerary` belongs to.
    pub fn booking_id(&self) -> api::booking::Id {
        self.0.booking_id.into()
    }

    /// `Date` this `Itinerary` is scheduled for.
    pub fn date(&self) -> Date {
        self.0.date.coerce()
    }

    /// Scheduled activities, in their order.
    pub fn items(&self) -> Vec<Item> {
        self.0.items.iter().cloned().map(Into::into).collect()
    }

    /// Notes to this `Itinerary`, if any.
    pub fn notes(&self) -> Option<Notes> {
        self.0.notes.clone().map(Into::into)
    }

    /// `DateTime` when this `Itinerary` was attached.
    pub fn attached_at(&self) -> DateTime {
        self.0.attached_at.coerce()
    }
}

/// A scheduled activity.
#[derive(Clone, Debug, From)]
pub struct Item(domain::itinerary::Item);

/// Single scheduled activity of an `Itinerary`.
#[graphql_object(name = "ItineraryItem", context = Context)]
impl Item {
    /// Time the activity starts at.
    pub fn time(&self) -> Time {
        self.0.time.into()
    }

    /// Kind of the activity.
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }

    /// Description of the activity.
    pub fn description(&self) -> Description {
        self.0.description.clone().into()
    }

    /// Location of the activity, if any.
    pub fn location(&self) -> Option<Location> {
        self.0.location.clone().map(Into::into)
    }
}

/// Single scheduled activity to be put into an `Itinerary`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "ItineraryItemInput")]
pub struct ItemInput {
    /// Time the activity starts at.
    pub time: Time,

    /// Kind of the activity.
    pub kind: Kind,

    /// Description of the activity.
    pub description: Description,

    /// Location of the activity, if any.
    pub location: Option<Location>,
}

impl From<ItemInput> for domain::itinerary::Item {
    fn from(input: ItemInput) -> Self {
        let ItemInput {
            time,
            kind,
            description,
            location,
        } = input;
        Self {
            time: time.into(),
            kind: kind.into(),
            description: description.into(),
            location: location.map(Into::into),
        }
    }
}

/// Time of day in a strict 24-hour `HH:MM` format.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ItineraryTime",
    with = scalar::Via::<domain::itinerary::Time>,
)]
pub struct Time(domain::itinerary::Time);

/// Description of an `ItineraryItem`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ItineraryItemDescription",
    with = scalar::Via::<domain::itinerary::Description>,
)]
pub struct Description(domain::itinerary::Description);

/// Location of an `ItineraryItem`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ItineraryItemLocation",
    with = scalar::Via::<domain::itinerary::Location>,
)]
pub struct Location(domain::itinerary::Location);

/// Notes to an `Itinerary`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ItineraryNotes",
    with = scalar::Via::<domain::itinerary::Notes>,
)]
pub struct Notes(domain::itinerary::Notes);

/// Kind of an `ItineraryItem`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ItineraryItemKind")]
pub enum Kind {
    /// Getting to or from the venue.
    Travel,

    /// Sound check.
    Soundcheck,

    /// The performance itself.
    Performance,

    /// Interviews, photo sessions and other press activities.
    Media,

    /// Anything else.
    Other,
}

impl From<domain::itinerary::Kind> for Kind {
    fn from(kind: domain::itinerary::Kind) -> Self {
        use domain::itinerary::Kind as K;
        match kind {
            K::Travel => Self::Travel,
            K::Soundcheck => Self::Soundcheck,
            K::Performance => Self::Performance,
            K::Media => Self::Media,
            K::Other => Self::Other,
        }
    }
}

impl From<Kind> for domain::itinerary::Kind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Travel => Self::Travel,
            Kind::Soundcheck => Self::Soundcheck,
            Kind::Performance => Self::Performance,
            Kind::Media => Self::Media,
            Kind::Other => Self::Other,
        }
    }
}
