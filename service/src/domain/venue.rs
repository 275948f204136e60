//! [`Venue`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, Into};

/// Place where a [`Booking`] is performed.
///
/// [`Booking`]: super::Booking
#[derive(Clone, Debug)]
pub struct Venue {
    /// ID of this [`Venue`].
    pub id: Id,

    /// [`Name`] of this [`Venue`].
    pub name: Name,

    /// [`City`] this [`Venue`] is located in.
    pub city: City,

    /// [`State`] this [`Venue`] is located in, if any.
    pub state: Option<State>,

    /// [`Capacity`] of this [`Venue`].
    pub capacity: Capacity,

    /// [`DateTime`] when this [`Venue`] was created.
    pub created_at: CreationDateTime,
}

define_id! {
    #[doc = "ID of a [`Venue`]."]
    Id
}

define_text! {
    #[doc = "Name of a [`Venue`]."]
    Name(2..=255)
}

define_text! {
    #[doc = "City a [`Venue`] is located in."]
    City(1..=255)
}

define_text! {
    #[doc = "State (or region) a [`Venue`] is located in."]
    State(1..=255)
}

/// Number of people a [`Venue`] can hold.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd)]
pub struct Capacity(u32);

impl Capacity {
    /// Maximum allowed [`Capacity`] (fits into a Postgres `INT4`).
    pub const MAX: u32 = i32::MAX.unsigned_abs();

    /// Creates a new [`Capacity`] if the given `value` is positive and
    /// doesn't exceed [`Capacity::MAX`].
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        (1..=Self::MAX).contains(&value).then_some(Self(value))
    }
}

impl FromStr for Capacity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Capacity`")
    }
}

/// [`DateTime`] when a [`Venue`] was created.
pub type CreationDateTime = DateTimeOf<(Venue, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::Capacity;

    #[test]
    fn capacity_is_positive() {
        assert!(Capacity::new(0).is_none());
        assert!(Capacity::new(1).is_some());
        assert!(Capacity::new(Capacity::MAX).is_some());
        assert!(Capacity::new(Capacity::MAX + 1).is_none());

        assert!("250".parse::<Capacity>().is_ok());
        assert!("-1".parse::<Capacity>().is_err());
        assert!("many".parse::<Capacity>().is_err());
    }
}
