//! [`Itinerary`] definitions.

use std::{fmt, str::FromStr};

#[cfg(doc)]
use common::{Date, DateTime};
use common::{define_kind, DateOf, DateTimeOf};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use super::booking;

/// Day schedule of a [`Booking`].
///
/// At most one [`Itinerary`] exists per [`Booking`]: attaching a new one
/// replaces the previous.
///
/// [`Booking`]: super::Booking
#[derive(Clone, Debug)]
pub struct Itinerary {
    /// ID of the [`Booking`] this [`Itinerary`] belongs to.
    ///
    /// [`Booking`]: super::Booking
    pub booking_id: booking::Id,

    /// [`Date`] this [`Itinerary`] is scheduled for.
    pub date: ScheduleDate,

    /// [`Items`] of this [`Itinerary`].
    pub items: Items,

    /// [`Notes`] to this [`Itinerary`], if any.
    pub notes: Option<Notes>,

    /// [`DateTime`] when this [`Itinerary`] was attached.
    pub attached_at: AttachmentDateTime,
}

/// Single scheduled activity of an [`Itinerary`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    /// [`Time`] the activity starts at.
    pub time: Time,

    /// [`Kind`] of the activity.
    pub kind: Kind,

    /// [`Description`] of the activity.
    pub description: Description,

    /// [`Location`] of the activity, if any.
    pub location: Option<Location>,
}

/// Non-empty list of [`Item`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Items(Vec<Item>);

impl Items {
    /// Creates new [`Items`] if the given `items` are not empty.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Option<Self> {
        (!items.is_empty()).then_some(Self(items))
    }

    /// Returns an iterator over these [`Items`].
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.0.iter()
    }

    /// Consumes these [`Items`] returning the underlying [`Item`]s.
    #[must_use]
    pub fn into_inner(self) -> Vec<Item> {
        self.0
    }
}

define_kind! {
    #[doc = "Kind of an [`Itinerary`] [`Item`]."]
    enum Kind {
        #[doc = "Getting to or from the venue."]
        Travel = 1,

        #[doc = "Sound check."]
        Soundcheck = 2,

        #[doc = "The performance itself."]
        Performance = 3,

        #[doc = "Interviews, photo sessions and other press activities."]
        Media = 4,

        #[doc = "Anything else."]
        Other = 5,
    }
}

/// Time of day of an [`Item`], with a minute precision.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Time(time::Time);

impl Time {
    /// Creates a new [`Time`] out of the provided `hour` and `minute`.
    ///
    /// [`None`] is returned if they don't form a valid 24-hour time.
    #[must_use]
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        time::Time::from_hms(hour, minute, 0).ok().map(Self)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl FromStr for Time {
    type Err = &'static str;

    /// Parses a strict 24-hour `HH:MM` string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ERR: &str = "invalid `Time`, expected `HH:MM`";

        let (hour, minute) = s.split_once(':').ok_or(ERR)?;
        let is_two_digits =
            |p: &str| p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit());
        if !is_two_digits(hour) || !is_two_digits(minute) {
            return Err(ERR);
        }

        Self::from_hm(
            hour.parse().map_err(|_| ERR)?,
            minute.parse().map_err(|_| ERR)?,
        )
        .ok_or(ERR)
    }
}

define_text! {
    #[doc = "Description of an [`Item`]."]
    Description(1..=500)
}

define_text! {
    #[doc = "Location of an [`Item`]."]
    Location(1..=255)
}

define_text! {
    #[doc = "Notes to an [`Itinerary`]."]
    Notes(1..=2000)
}

/// [`Date`] an [`Itinerary`] is scheduled for.
pub type ScheduleDate = DateOf<Itinerary>;

/// [`DateTime`] when an [`Itinerary`] was attached to its [`Booking`].
///
/// [`Booking`]: super::Booking
pub type AttachmentDateTime = DateTimeOf<Itinerary>;

#[cfg(test)]
mod spec {
    use super::{Description, Item, Items, Kind, Time};

    #[test]
    fn time_is_strict_24h() {
        assert_eq!("09:30".parse::<Time>(), Ok(Time::from_hm(9, 30).unwrap()));
        assert_eq!("23:59".parse::<Time>().unwrap().to_string(), "23:59");
        assert_eq!("00:00".parse::<Time>().unwrap().to_string(), "00:00");

        assert!("24:00".parse::<Time>().is_err());
        assert!("9:30".parse::<Time>().is_err());
        assert!("09:60".parse::<Time>().is_err());
        assert!("09:30:00".parse::<Time>().is_err());
        assert!("9pm".parse::<Time>().is_err());
    }

    #[test]
    fn items_are_not_empty() {
        assert!(Items::new(vec![]).is_none());

        let items = Items::new(vec![Item {
            time: Time::from_hm(18, 0).unwrap(),
            kind: Kind::Soundcheck,
            description: Description::new("Line check").unwrap(),
            location: None,
        }])
        .unwrap();
        assert_eq!(items.iter().count(), 1);
    }
}
