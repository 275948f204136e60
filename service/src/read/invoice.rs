//! [`Invoice`]-related read definitions.

#[cfg(doc)]
use common::Date;

use crate::domain::{invoice, Invoice};

/// Actions available for an [`Invoice`] in its current state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Actions {
    /// [`Invoice`] may be (re-)sent.
    pub send: bool,

    /// [`Invoice`] may be marked as paid.
    pub mark_paid: bool,
}

impl From<&Invoice> for Actions {
    fn from(invoice: &Invoice) -> Self {
        Self {
            send: invoice.status().can_send(),
            mark_paid: invoice.status().can_mark_paid(),
        }
    }
}

/// Selector of [`invoice::Status::Sent`] [`Invoice`]s which are past their
/// due [`Date`] on the wrapped one.
#[derive(Clone, Copy, Debug)]
pub struct OverdueOn(pub invoice::DueDate);

pub mod list {
    //! [`Invoice`] list definitions.

    use crate::domain::{artist, invoice::Status, promoter, Invoice};

    use super::super::Needle;

    /// [`Invoice`] listed along with the names of the billed parties.
    #[derive(Clone, Debug)]
    pub struct Item {
        /// Listed [`Invoice`].
        pub invoice: Invoice,

        /// Name of the [`Artist`] of the billed [`Booking`], if it's known.
        ///
        /// [`Artist`]: crate::domain::Artist
        /// [`Booking`]: crate::domain::Booking
        pub artist_name: Option<artist::Name>,

        /// Name of the billed [`Promoter`], if it's known.
        ///
        /// [`Promoter`]: crate::domain::Promoter
        pub promoter_name: Option<promoter::Name>,
    }

    /// Criteria of selecting [`Invoice`]s from a list.
    ///
    /// All the specified criteria must hold for an [`Invoice`] to be
    /// selected.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Only [`Invoice`]s in this [`Status`].
        pub status: Option<Status>,

        /// Only [`Invoice`]s whose artist or promoter name contains this
        /// text, ignoring the letter case.
        pub text: Option<String>,
    }

    impl Filter {
        /// Selects the [`Item`]s matching this [`Filter`], preserving their
        /// order.
        #[must_use]
        pub fn apply(&self, items: impl IntoIterator<Item = Item>) -> Vec<Item> {
            let needle = self.text.as_deref().map(Needle::new);
            items
                .into_iter()
                .filter(|Item { invoice, artist_name, promoter_name }| {
                    self.status.map_or(true, |s| invoice.status() == s)
                        && needle.as_ref().map_or(true, |n| {
                            artist_name.as_ref().is_some_and(|s| n.is_in(s))
                                || promoter_name
                                    .as_ref()
                                    .is_some_and(|s| n.is_in(s))
                        })
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::{
        artist,
        booking::{EventDate, Fee},
        invoice::{DueDate, SendingDateTime, Status},
        promoter, venue, Booking, Invoice,
    };

    use super::{
        list::{Filter, Item},
        Actions,
    };

    fn item(artist: &str, promoter: &str, sent: bool) -> Item {
        let booking = Booking::propose(
            artist::Id::new(),
            promoter::Id::new(),
            venue::Id::new(),
            EventDate::from_ymd(2030, 6, 1).unwrap(),
            Fee::new("5000USD".parse().unwrap()).unwrap(),
        );
        let mut invoice = Invoice::draft(
            &booking,
            None,
            DueDate::from_ymd(2030, 7, 1).unwrap(),
            None,
        );
        if sent {
            invoice.send(SendingDateTime::now()).unwrap();
        }
        Item {
            invoice,
            artist_name: artist::Name::new(artist),
            promoter_name: promoter::Name::new(promoter),
        }
    }

    #[test]
    fn filters_by_status_and_text() {
        let items = vec![
            item("Nina Simone", "Live Nation", false),
            item("Miles Davis", "Blue Note Events", true),
            item("Chet Baker", "Live Nation", true),
        ];
        let select = |filter: Filter| {
            filter
                .apply(items.clone())
                .into_iter()
                .map(|i| i.invoice.id)
                .collect::<Vec<_>>()
        };

        assert_eq!(select(Filter::default()).len(), 3);
        assert_eq!(
            select(Filter {
                status: Some(Status::Sent),
                ..Filter::default()
            }),
            [items[1].invoice.id, items[2].invoice.id],
        );
        assert_eq!(
            select(Filter {
                status: Some(Status::Sent),
                text: Some("live".to_owned()),
            }),
            [items[2].invoice.id],
        );
        assert_eq!(
            select(Filter {
                status: None,
                text: Some("NINA".to_owned()),
            }),
            [items[0].invoice.id],
        );
    }

    #[test]
    fn actions_follow_status() {
        let draft = item("Nina Simone", "Live Nation", false).invoice;
        assert_eq!(
            Actions::from(&draft),
            Actions {
                send: true,
                mark_paid: true,
            },
        );

        let mut paid = draft;
        paid.status = Status::Paid;
        assert_eq!(
            Actions::from(&paid),
            Actions {
                send: false,
                mark_paid: false,
            },
        );
    }
}
