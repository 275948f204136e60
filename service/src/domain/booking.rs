//! [`Booking`] definitions.

#[cfg(doc)]
use common::{Date, DateTime};
use common::{define_kind, unit, DateOf, DateTimeOf, Money};
use derive_more::{AsRef, Display, Error};

use super::{artist, promoter, venue};

/// Scheduled performance of an [`Artist`] for a [`Promoter`] at a [`Venue`].
///
/// [`Artist`]: super::Artist
/// [`Promoter`]: super::Promoter
/// [`Venue`]: super::Venue
#[derive(Clone, Debug)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// ID of the performing [`Artist`].
    ///
    /// [`Artist`]: super::Artist
    pub artist_id: artist::Id,

    /// ID of the [`Promoter`] this [`Booking`] is made for.
    ///
    /// [`Promoter`]: super::Promoter
    pub promoter_id: promoter::Id,

    /// ID of the [`Venue`] hosting the performance.
    ///
    /// [`Venue`]: super::Venue
    pub venue_id: venue::Id,

    /// [`Date`] of the performance.
    pub date: EventDate,

    /// [`Fee`] agreed for the performance.
    pub fee: Fee,

    /// [`Status`] of this [`Booking`].
    ///
    /// Changed only through [`Booking::transit()`].
    pub(crate) status: Status,

    /// [`Documents`] issued for this [`Booking`].
    pub(crate) documents: Documents,

    /// [`DateTime`] when this [`Booking`] was created.
    pub created_at: CreationDateTime,
}

impl Booking {
    /// Creates a new [`Status::Proposed`] [`Booking`] without any
    /// [`Documents`].
    #[must_use]
    pub fn propose(
        artist_id: artist::Id,
        promoter_id: promoter::Id,
        venue_id: venue::Id,
        date: EventDate,
        fee: Fee,
    ) -> Self {
        Self {
            id: Id::new(),
            artist_id,
            promoter_id,
            venue_id,
            date,
            fee,
            status: Status::Proposed,
            documents: Documents::default(),
            created_at: CreationDateTime::now(),
        }
    }

    /// Returns the current [`Status`] of this [`Booking`].
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns [`Documents`] issued for this [`Booking`].
    #[must_use]
    pub fn documents(&self) -> Documents {
        self.documents
    }

    /// Moves this [`Booking`] into the provided [`Status`].
    ///
    /// # Errors
    ///
    /// If the [`Status`] graph has no edge from the current [`Status`] to the
    /// provided one.
    pub(crate) fn transit(&mut self, to: Status) -> Result<(), InvalidTransition> {
        if !self.status.can_transit_to(to) {
            return Err(InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    /// Indicates whether a contract may be generated for this [`Booking`].
    #[must_use]
    pub fn accepts_contract(&self) -> bool {
        matches!(self.status, Status::Proposed | Status::Confirmed)
            && !self.documents.has_contract
    }

    /// Indicates whether an invoice may be created for this [`Booking`].
    #[must_use]
    pub fn accepts_invoice(&self) -> bool {
        self.status == Status::Confirmed && !self.documents.has_invoice
    }

    /// Indicates whether an itinerary may be attached to this [`Booking`].
    ///
    /// Itineraries may be attached (or replaced) at any point except after
    /// cancellation.
    #[must_use]
    pub fn accepts_itinerary(&self) -> bool {
        self.status != Status::Cancelled
    }
}

define_id! {
    #[doc = "ID of a [`Booking`]."]
    Id
}

define_kind! {
    #[doc = "Lifecycle status of a [`Booking`]."]
    enum Status {
        #[doc = "Proposed to the parties, awaiting contract approval."]
        Proposed = 1,

        #[doc = "Contract approved by the parties."]
        Confirmed = 2,

        #[doc = "Called off before the performance."]
        Cancelled = 3,

        #[doc = "Performed."]
        Completed = 4,
    }
}

impl Status {
    /// Indicates whether a [`Booking`] may move from this [`Status`] into the
    /// provided one.
    #[must_use]
    pub const fn can_transit_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Proposed, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled | Self::Completed),
        )
    }

    /// Indicates whether this [`Status`] has no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

/// Flags indicating which documents were issued for a [`Booking`].
///
/// Flags are raised only as a side effect of creating the corresponding
/// document, and never lowered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Documents {
    /// Whether a contract was generated.
    pub(crate) has_contract: bool,

    /// Whether an invoice was created.
    pub(crate) has_invoice: bool,

    /// Whether an itinerary was attached.
    pub(crate) has_itinerary: bool,
}

impl Documents {
    /// Indicates whether a contract was generated.
    #[must_use]
    pub fn has_contract(self) -> bool {
        self.has_contract
    }

    /// Indicates whether an invoice was created.
    #[must_use]
    pub fn has_invoice(self) -> bool {
        self.has_invoice
    }

    /// Indicates whether an itinerary was attached.
    #[must_use]
    pub fn has_itinerary(self) -> bool {
        self.has_itinerary
    }
}

/// Error of moving a [`Booking`] along a missing [`Status`] edge.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("`Booking` cannot move from `{from}` to `{to}`")]
pub struct InvalidTransition {
    /// [`Status`] the [`Booking`] is in.
    #[error(not(source))]
    pub from: Status,

    /// [`Status`] the [`Booking`] was requested to move into.
    #[error(not(source))]
    pub to: Status,
}

/// Fee of a [`Booking`]: at least one whole unit of its currency.
#[derive(AsRef, Clone, Copy, Debug, Display, Eq, PartialEq)]
pub struct Fee(Money);

impl Fee {
    /// Creates a new [`Fee`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `amount` is at least one unit.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(amount: Money) -> Self {
        Self(amount)
    }

    /// Creates a new [`Fee`] if the given `amount` is at least one unit of
    /// its currency.
    #[must_use]
    pub fn new(amount: Money) -> Option<Self> {
        amount.is_at_least_one_unit().then_some(Self(amount))
    }

    /// Returns the [`Money`] amount of this [`Fee`].
    #[must_use]
    pub fn money(self) -> Money {
        self.0
    }
}

impl TryFrom<Money> for Fee {
    type Error = &'static str;

    fn try_from(amount: Money) -> Result<Self, Self::Error> {
        Self::new(amount).ok_or("`Fee` must be at least one unit")
    }
}

/// [`Date`] of a [`Booking`] performance.
pub type EventDate = DateOf<Booking>;

/// [`DateTime`] when a [`Booking`] was created.
pub type CreationDateTime = DateTimeOf<(Booking, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money};

    use crate::domain::{artist, promoter, venue};

    use super::{Booking, EventDate, Fee, InvalidTransition, Status};

    fn booking() -> Booking {
        Booking::propose(
            artist::Id::new(),
            promoter::Id::new(),
            venue::Id::new(),
            EventDate::from_ymd(2030, 6, 1).unwrap(),
            Fee::new("5000USD".parse().unwrap()).unwrap(),
        )
    }

    #[test]
    fn transition_table() {
        use Status as S;

        let allowed = [
            (S::Proposed, S::Confirmed),
            (S::Proposed, S::Cancelled),
            (S::Confirmed, S::Cancelled),
            (S::Confirmed, S::Completed),
        ];
        for &from in Status::ALL {
            for &to in Status::ALL {
                assert_eq!(
                    from.can_transit_to(to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}",
                );
            }
        }

        assert!(!S::Proposed.is_terminal());
        assert!(!S::Confirmed.is_terminal());
        assert!(S::Cancelled.is_terminal());
        assert!(S::Completed.is_terminal());
    }

    #[test]
    fn transit_changes_only_along_edges() {
        let mut b = booking();
        assert_eq!(b.status(), Status::Proposed);

        assert_eq!(
            b.transit(Status::Completed),
            Err(InvalidTransition {
                from: Status::Proposed,
                to: Status::Completed,
            }),
        );
        assert_eq!(b.status(), Status::Proposed);

        b.transit(Status::Confirmed).unwrap();
        b.transit(Status::Completed).unwrap();
        assert!(b.transit(Status::Cancelled).is_err());
        assert_eq!(b.status(), Status::Completed);
    }

    #[test]
    fn proposed_without_documents() {
        let b = booking();

        assert_eq!(b.status(), Status::Proposed);
        assert!(!b.documents().has_contract());
        assert!(!b.documents().has_invoice());
        assert!(!b.documents().has_itinerary());
    }

    #[test]
    fn document_eligibility() {
        let mut b = booking();
        assert!(b.accepts_contract());
        assert!(!b.accepts_invoice());
        assert!(b.accepts_itinerary());

        b.transit(Status::Confirmed).unwrap();
        assert!(b.accepts_invoice());

        b.documents.has_invoice = true;
        assert!(!b.accepts_invoice());

        b.transit(Status::Cancelled).unwrap();
        assert!(!b.accepts_contract());
        assert!(!b.accepts_itinerary());
    }

    #[test]
    fn fee_is_at_least_one_unit() {
        let usd = |s: &str| Money {
            amount: s.parse().unwrap(),
            currency: Currency::Usd,
        };

        assert!(Fee::new(usd("1")).is_some());
        assert!(Fee::new(usd("5000")).is_some());
        assert!(Fee::new(usd("0.5")).is_none());
        assert!(Fee::new(usd("0")).is_none());
        assert!(Fee::new(usd("-10")).is_none());
    }
}
