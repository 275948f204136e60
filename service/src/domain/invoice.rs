//! [`Invoice`] definitions.

#[cfg(doc)]
use common::{Date, DateTime};
use common::{define_kind, unit, DateOf, DateTimeOf, Money};
use derive_more::{AsRef, Display, Error};

use super::booking::{self, Booking};

/// Bill issued to a [`Promoter`] for a confirmed [`Booking`].
///
/// [`Promoter`]: super::Promoter
#[derive(Clone, Debug)]
pub struct Invoice {
    /// ID of this [`Invoice`].
    pub id: Id,

    /// ID of the [`Booking`] this [`Invoice`] bills.
    pub booking_id: booking::Id,

    /// [`Amount`] to be paid.
    pub amount: Amount,

    /// [`Status`] of this [`Invoice`].
    ///
    /// Changed only through [`Invoice::send()`], [`Invoice::mark_paid()`] and
    /// [`Invoice::mark_overdue()`].
    pub(crate) status: Status,

    /// [`Date`] this [`Invoice`] is due.
    pub due_date: DueDate,

    /// Free-form [`Notes`] to the [`Invoice`], if any.
    pub notes: Option<Notes>,

    /// [`DateTime`] when this [`Invoice`] was last sent.
    pub(crate) sent_at: Option<SendingDateTime>,

    /// [`DateTime`] when this [`Invoice`] was paid.
    pub(crate) paid_at: Option<PaymentDateTime>,

    /// [`DateTime`] when this [`Invoice`] was created.
    pub created_at: CreationDateTime,
}

impl Invoice {
    /// Drafts a new [`Invoice`] for the provided [`Booking`].
    ///
    /// [`Amount`] defaults to the [`Booking`]'s fee.
    #[must_use]
    pub fn draft(
        booking: &Booking,
        amount: Option<Amount>,
        due_date: DueDate,
        notes: Option<Notes>,
    ) -> Self {
        Self {
            id: Id::new(),
            booking_id: booking.id,
            amount: amount.unwrap_or_else(|| booking.fee.into()),
            status: Status::Draft,
            due_date,
            notes,
            sent_at: None,
            paid_at: None,
            created_at: CreationDateTime::now(),
        }
    }

    /// Returns the current [`Status`] of this [`Invoice`].
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns [`DateTime`] when this [`Invoice`] was last sent, if it was.
    #[must_use]
    pub fn sent_at(&self) -> Option<SendingDateTime> {
        self.sent_at
    }

    /// Returns [`DateTime`] when this [`Invoice`] was paid, if it was.
    #[must_use]
    pub fn paid_at(&self) -> Option<PaymentDateTime> {
        self.paid_at
    }

    /// Sends (or re-sends) this [`Invoice`] to the [`Promoter`].
    ///
    /// # Errors
    ///
    /// If this [`Invoice`] is neither [`Status::Draft`] nor [`Status::Sent`].
    ///
    /// [`Promoter`]: super::Promoter
    pub(crate) fn send(
        &mut self,
        at: SendingDateTime,
    ) -> Result<(), InvalidTransition> {
        if !self.status.can_send() {
            return Err(InvalidTransition {
                from: self.status,
                to: Status::Sent,
            });
        }
        self.status = Status::Sent;
        self.sent_at = Some(at);
        Ok(())
    }

    /// Marks this [`Invoice`] as paid.
    ///
    /// # Errors
    ///
    /// If this [`Invoice`] is [`Status::Paid`] already.
    pub(crate) fn mark_paid(
        &mut self,
        at: PaymentDateTime,
    ) -> Result<(), InvalidTransition> {
        if !self.status.can_mark_paid() {
            return Err(InvalidTransition {
                from: self.status,
                to: Status::Paid,
            });
        }
        self.status = Status::Paid;
        self.paid_at = Some(at);
        Ok(())
    }

    /// Indicates whether this [`Invoice`] should be considered overdue on the
    /// provided `today` [`Date`].
    #[must_use]
    pub fn is_overdue_on(&self, today: DueDate) -> bool {
        self.status == Status::Sent && self.due_date < today
    }

    /// Marks this [`Invoice`] as overdue, if it [`is_overdue_on()`] the
    /// provided `today` [`Date`].
    ///
    /// Returns `true` if the [`Status`] has changed.
    ///
    /// [`is_overdue_on()`]: Invoice::is_overdue_on
    pub(crate) fn mark_overdue(&mut self, today: DueDate) -> bool {
        let overdue = self.is_overdue_on(today);
        if overdue {
            self.status = Status::Overdue;
        }
        overdue
    }
}

define_id! {
    #[doc = "ID of an [`Invoice`]."]
    Id
}

define_kind! {
    #[doc = "Lifecycle status of an [`Invoice`]."]
    enum Status {
        #[doc = "Created, but not sent yet."]
        Draft = 1,

        #[doc = "Sent to the promoter."]
        Sent = 2,

        #[doc = "Paid by the promoter."]
        Paid = 3,

        #[doc = "Sent, but not paid before its due date."]
        Overdue = 4,
    }
}

impl Status {
    /// Indicates whether an [`Invoice`] in this [`Status`] may be sent.
    #[must_use]
    pub const fn can_send(self) -> bool {
        matches!(self, Self::Draft | Self::Sent)
    }

    /// Indicates whether an [`Invoice`] in this [`Status`] may be marked as
    /// paid.
    #[must_use]
    pub const fn can_mark_paid(self) -> bool {
        !matches!(self, Self::Paid)
    }
}

/// Error of moving an [`Invoice`] into a disallowed [`Status`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("`Invoice` cannot move from `{from}` to `{to}`")]
pub struct InvalidTransition {
    /// [`Status`] the [`Invoice`] is in.
    #[error(not(source))]
    pub from: Status,

    /// [`Status`] the [`Invoice`] was requested to move into.
    #[error(not(source))]
    pub to: Status,
}

/// Billed amount of an [`Invoice`]: at least one whole unit of its currency.
#[derive(AsRef, Clone, Copy, Debug, Display, Eq, PartialEq)]
pub struct Amount(Money);

impl Amount {
    /// Creates a new [`Amount`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `money` is at least one unit.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(money: Money) -> Self {
        Self(money)
    }

    /// Creates a new [`Amount`] if the given `money` is at least one unit of
    /// its currency.
    #[must_use]
    pub fn new(money: Money) -> Option<Self> {
        money.is_at_least_one_unit().then_some(Self(money))
    }

    /// Returns the [`Money`] of this [`Amount`].
    #[must_use]
    pub fn money(self) -> Money {
        self.0
    }
}

impl From<booking::Fee> for Amount {
    fn from(fee: booking::Fee) -> Self {
        Self(fee.money())
    }
}

impl TryFrom<Money> for Amount {
    type Error = &'static str;

    fn try_from(money: Money) -> Result<Self, Self::Error> {
        Self::new(money).ok_or("`Amount` must be at least one unit")
    }
}

define_text! {
    #[doc = "Notes attached to an [`Invoice`]."]
    Notes(1..=1000)
}

/// [`Date`] when an [`Invoice`] is due.
pub type DueDate = DateOf<(Invoice, unit::Due)>;

/// [`DateTime`] when an [`Invoice`] was created.
pub type CreationDateTime = DateTimeOf<(Invoice, unit::Creation)>;

/// [`DateTime`] when an [`Invoice`] was sent.
pub type SendingDateTime = DateTimeOf<(Invoice, unit::Sending)>;

/// [`DateTime`] when an [`Invoice`] was paid.
pub type PaymentDateTime = DateTimeOf<(Invoice, unit::Payment)>;

#[cfg(test)]
mod spec {
    use crate::domain::{artist, booking, promoter, venue, Booking};

    use super::{
        Amount, DueDate, Invoice, InvalidTransition, PaymentDateTime,
        SendingDateTime, Status,
    };

    fn invoice() -> Invoice {
        let booking = Booking::propose(
            artist::Id::new(),
            promoter::Id::new(),
            venue::Id::new(),
            booking::EventDate::from_ymd(2030, 6, 1).unwrap(),
            booking::Fee::new("5000USD".parse().unwrap()).unwrap(),
        );
        Invoice::draft(
            &booking,
            None,
            DueDate::from_ymd(2030, 7, 1).unwrap(),
            None,
        )
    }

    #[test]
    fn drafted_with_booking_fee() {
        let inv = invoice();

        assert_eq!(inv.status(), Status::Draft);
        assert_eq!(inv.amount.to_string(), "5000USD");
        assert!(inv.sent_at().is_none());
        assert!(inv.paid_at().is_none());
    }

    #[test]
    fn sends_and_resends() {
        let mut inv = invoice();

        inv.send(SendingDateTime::now()).unwrap();
        assert_eq!(inv.status(), Status::Sent);
        assert!(inv.sent_at().is_some());

        inv.send(SendingDateTime::now()).unwrap();
        assert_eq!(inv.status(), Status::Sent);

        inv.mark_paid(PaymentDateTime::now()).unwrap();
        assert_eq!(
            inv.send(SendingDateTime::now()),
            Err(InvalidTransition {
                from: Status::Paid,
                to: Status::Sent,
            }),
        );
    }

    #[test]
    fn paid_only_once() {
        let mut inv = invoice();

        inv.mark_paid(PaymentDateTime::now()).unwrap();
        let paid_at = inv.paid_at();
        assert_eq!(inv.status(), Status::Paid);
        assert!(paid_at.is_some());

        assert!(inv.mark_paid(PaymentDateTime::now()).is_err());
        assert_eq!(inv.paid_at(), paid_at);
    }

    #[test]
    fn overdue_only_when_sent_and_past_due() {
        let mut inv = invoice();
        let due = inv.due_date;
        let after_due = due.checked_add_days(1).unwrap();

        assert!(!inv.mark_overdue(after_due), "drafts are never overdue");

        inv.send(SendingDateTime::now()).unwrap();
        assert!(!inv.mark_overdue(due), "due date itself is not overdue");
        assert!(inv.mark_overdue(after_due));
        assert_eq!(inv.status(), Status::Overdue);

        assert!(inv.send(SendingDateTime::now()).is_err());
        inv.mark_paid(PaymentDateTime::now()).unwrap();
        assert_eq!(inv.status(), Status::Paid);
    }

    #[test]
    fn amount_is_at_least_one_unit() {
        assert!(Amount::new("1USD".parse().unwrap()).is_some());
        assert!(Amount::new("0.99USD".parse().unwrap()).is_none());
    }
}
