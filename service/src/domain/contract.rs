//! [`Contract`] definitions.

#[cfg(doc)]
use common::{Date, DateTime};
use common::{unit, DateOf, DateTimeOf, Money};
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use super::booking;

/// Performance contract generated for a [`Booking`].
///
/// Only a reference to the rendered document is kept.
///
/// [`Booking`]: super::Booking
#[derive(Clone, Debug)]
pub struct Contract {
    /// ID of this [`Contract`].
    pub id: Id,

    /// ID of the [`Booking`] this [`Contract`] is generated for.
    ///
    /// [`Booking`]: super::Booking
    pub booking_id: booking::Id,

    /// [`Deposit`] to be paid before the performance, if any.
    pub deposit: Option<Deposit>,

    /// [`Date`] the [`Deposit`] is due, if any.
    pub deposit_due_date: Option<DepositDueDate>,

    /// [`SpecialTerms`] of this [`Contract`], if any.
    pub special_terms: Option<SpecialTerms>,

    /// [`DocumentUrl`] of the rendered [`Contract`].
    pub document_url: DocumentUrl,

    /// [`DateTime`] when this [`Contract`] was created.
    pub created_at: CreationDateTime,
}

define_id! {
    #[doc = "ID of a [`Contract`]."]
    Id
}

/// Deposit of a [`Contract`]: a non-negative amount.
#[derive(AsRef, Clone, Copy, Debug, Display, Eq, PartialEq)]
pub struct Deposit(Money);

impl Deposit {
    /// Creates a new [`Deposit`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `money` is not negative.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(money: Money) -> Self {
        Self(money)
    }

    /// Creates a new [`Deposit`] if the given `money` is not negative.
    #[must_use]
    pub fn new(money: Money) -> Option<Self> {
        (!money.is_negative()).then_some(Self(money))
    }

    /// Returns the [`Money`] of this [`Deposit`].
    #[must_use]
    pub fn money(self) -> Money {
        self.0
    }
}

impl TryFrom<Money> for Deposit {
    type Error = &'static str;

    fn try_from(money: Money) -> Result<Self, Self::Error> {
        Self::new(money).ok_or("`Deposit` must not be negative")
    }
}

define_text! {
    #[doc = "Special terms of a [`Contract`]."]
    SpecialTerms(1..=2000)
}

/// URL of a rendered [`Contract`] document.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct DocumentUrl(String);

impl DocumentUrl {
    /// Creates a new [`DocumentUrl`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `url` points to a [`Contract`]
    /// document.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Builds the [`DocumentUrl`] of the provided [`Booking`]'s [`Contract`]
    /// under the provided `base` URL.
    ///
    /// [`Booking`]: super::Booking
    #[must_use]
    pub fn of_booking(base: &str, booking_id: booking::Id) -> Self {
        Self(format!(
            "{}/bookings/{booking_id}/contract",
            base.trim_end_matches('/'),
        ))
    }
}

/// [`Date`] when a [`Deposit`] is due.
pub type DepositDueDate = DateOf<(Contract, unit::Due)>;

/// [`DateTime`] when a [`Contract`] was created.
pub type CreationDateTime = DateTimeOf<(Contract, unit::Creation)>;

#[cfg(test)]
mod spec {
    use crate::domain::booking;

    use super::{Deposit, DocumentUrl};

    #[test]
    fn document_url_of_booking() {
        let id = booking::Id::new();

        assert_eq!(
            DocumentUrl::of_booking("https://docs.example.com/", id)
                .to_string(),
            format!("https://docs.example.com/bookings/{id}/contract"),
        );
        assert_eq!(
            DocumentUrl::of_booking("https://docs.example.com", id),
            DocumentUrl::of_booking("https://docs.example.com/", id),
        );
    }

    #[test]
    fn deposit_is_not_negative() {
        assert!(Deposit::new("0USD".parse().unwrap()).is_some());
        assert!(Deposit::new("500.50EUR".parse().unwrap()).is_some());
        assert!(Deposit::new("-1USD".parse().unwrap()).is_none());
    }
}
