//! [`Booking`]-related read definitions.

use crate::domain::{booking::Status, Booking};

/// Actions available for a [`Booking`] in its current state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Actions {
    /// Contract of the [`Booking`] may be approved.
    pub approve_contract: bool,

    /// Contract may be generated for the [`Booking`].
    pub generate_contract: bool,

    /// Invoice may be created for the [`Booking`].
    pub create_invoice: bool,

    /// Itinerary may be attached to the [`Booking`].
    pub attach_itinerary: bool,

    /// [`Booking`] may be cancelled.
    pub cancel: bool,

    /// [`Booking`] may be completed.
    pub complete: bool,
}

impl From<&Booking> for Actions {
    fn from(booking: &Booking) -> Self {
        let status = booking.status();
        Self {
            approve_contract: status.can_transit_to(Status::Confirmed),
            generate_contract: booking.accepts_contract(),
            create_invoice: booking.accepts_invoice(),
            attach_itinerary: booking.accepts_itinerary(),
            cancel: status.can_transit_to(Status::Cancelled),
            complete: status.can_transit_to(Status::Completed),
        }
    }
}

pub mod list {
    //! [`Booking`] list definitions.

    use crate::domain::{
        artist,
        booking::{EventDate, Status},
        promoter, venue, Booking,
    };

    use super::super::Needle;

    /// [`Booking`] listed along with the names of the related parties.
    #[derive(Clone, Debug)]
    pub struct Item {
        /// Listed [`Booking`].
        pub booking: Booking,

        /// Name of the performing [`Artist`], if it's known.
        ///
        /// [`Artist`]: crate::domain::Artist
        pub artist_name: Option<artist::Name>,

        /// Name of the [`Promoter`], if it's known.
        ///
        /// [`Promoter`]: crate::domain::Promoter
        pub promoter_name: Option<promoter::Name>,

        /// Name of the [`Venue`], if it's known.
        ///
        /// [`Venue`]: crate::domain::Venue
        pub venue_name: Option<venue::Name>,
    }

    /// Criteria of selecting [`Booking`]s from a list.
    ///
    /// All the specified criteria must hold for a [`Booking`] to be selected.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Only [`Booking`]s of this [`Artist`].
        ///
        /// [`Artist`]: crate::domain::Artist
        pub artist_id: Option<artist::Id>,

        /// Only [`Booking`]s in this [`Status`].
        pub status: Option<Status>,

        /// Only [`Booking`]s dated on or after this date.
        pub start_date: Option<EventDate>,

        /// Only [`Booking`]s whose artist, promoter or venue name contains
        /// this text, ignoring the letter case.
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
                .filter(|i| self.matches_with(i, needle.as_ref()))
                .collect()
        }

        /// Indicates whether the provided [`Item`] matches this [`Filter`].
        #[must_use]
        pub fn matches(&self, item: &Item) -> bool {
            let needle = self.text.as_deref().map(Needle::new);
            self.matches_with(item, needle.as_ref())
        }

        /// Indicates whether the provided [`Item`] matches this [`Filter`]
        /// with the already prepared text [`Needle`].
        fn matches_with(&self, item: &Item, needle: Option<&Needle>) -> bool {
            let Item {
                booking,
                artist_name,
                promoter_name,
                venue_name,
            } = item;

            self.artist_id.map_or(true, |id| booking.artist_id == id)
                && self.status.map_or(true, |s| booking.status() == s)
                && self.start_date.map_or(true, |d| booking.date >= d)
                && needle.map_or(true, |n| {
                    artist_name.as_ref().is_some_and(|s| n.is_in(s))
                        || promoter_name.as_ref().is_some_and(|s| n.is_in(s))
                        || venue_name.as_ref().is_some_and(|s| n.is_in(s))
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use proptest::prelude::*;

    use crate::domain::{
        artist,
        booking::{self, EventDate, Fee, Status},
        promoter, venue, Booking,
    };

    use super::{
        list::{Filter, Item},
        Actions,
    };

    const ARTISTS: [&str; 3] = ["Nina Simone", "Miles Davis", "Chet Baker"];
    const PROMOTERS: [&str; 2] = ["Live Nation", "Blue Note Events"];
    const VENUES: [&str; 3] = ["Blue Note", "Village Vanguard", "Apollo"];

    fn artist_ids() -> [artist::Id; 3] {
        [
            artist::Id::from(uuid::Uuid::from_u128(1)),
            artist::Id::from(uuid::Uuid::from_u128(2)),
            artist::Id::from(uuid::Uuid::from_u128(3)),
        ]
    }

    fn item(
        artist: usize,
        promoter: usize,
        venue: usize,
        day: u8,
        status: Status,
    ) -> Item {
        let mut booking = Booking::propose(
            artist_ids()[artist],
            promoter::Id::new(),
            venue::Id::new(),
            EventDate::from_ymd(2030, 6, day).unwrap(),
            Fee::new("5000USD".parse().unwrap()).unwrap(),
        );
        booking.status = status;
        Item {
            booking,
            artist_name: artist::Name::new(ARTISTS[artist]),
            promoter_name: promoter::Name::new(PROMOTERS[promoter]),
            venue_name: venue::Name::new(VENUES[venue]),
        }
    }

    fn ids(items: &[Item]) -> Vec<booking::Id> {
        items.iter().map(|i| i.booking.id).collect()
    }

    #[test]
    fn empty_filter_returns_everything_in_order() {
        let items = vec![
            item(0, 0, 0, 3, Status::Proposed),
            item(1, 1, 1, 1, Status::Confirmed),
            item(2, 0, 2, 2, Status::Cancelled),
        ];

        assert_eq!(ids(&Filter::default().apply(items.clone())), ids(&items));
    }

    #[test]
    fn searches_names_ignoring_case() {
        let items = vec![
            item(0, 0, 0, 1, Status::Proposed),
            item(1, 1, 1, 1, Status::Proposed),
            item(2, 0, 2, 1, Status::Proposed),
        ];
        let search = |text: &str| {
            ids(&Filter {
                text: Some(text.to_owned()),
                ..Filter::default()
            }
            .apply(items.clone()))
        };

        assert_eq!(search("blue"), ids(&[items[0].clone(), items[1].clone()]));
        assert_eq!(search("MILES"), ids(&[items[1].clone()]));
        assert_eq!(search("apollo"), ids(&[items[2].clone()]));
        assert!(search("unknown").is_empty());
    }

    #[test]
    fn start_date_is_inclusive() {
        let items = vec![
            item(0, 0, 0, 1, Status::Proposed),
            item(0, 0, 0, 2, Status::Proposed),
            item(0, 0, 0, 3, Status::Proposed),
        ];

        let selected = Filter {
            start_date: EventDate::from_ymd(2030, 6, 2),
            ..Filter::default()
        }
        .apply(items.clone());

        assert_eq!(ids(&selected), ids(&items[1..]));
    }

    #[test]
    fn actions_follow_status() {
        let proposed = item(0, 0, 0, 1, Status::Proposed).booking;
        assert_eq!(
            Actions::from(&proposed),
            Actions {
                approve_contract: true,
                generate_contract: true,
                create_invoice: false,
                attach_itinerary: true,
                cancel: true,
                complete: false,
            },
        );

        let mut confirmed = item(0, 0, 0, 1, Status::Confirmed).booking;
        confirmed.documents.has_invoice = true;
        assert_eq!(
            Actions::from(&confirmed),
            Actions {
                approve_contract: false,
                generate_contract: true,
                create_invoice: false,
                attach_itinerary: true,
                cancel: true,
                complete: true,
            },
        );

        let cancelled = item(0, 0, 0, 1, Status::Cancelled).booking;
        assert_eq!(
            Actions::from(&cancelled),
            Actions {
                approve_contract: false,
                generate_contract: false,
                create_invoice: false,
                attach_itinerary: false,
                cancel: false,
                complete: false,
            },
        );
    }

    fn arb_status() -> impl Strategy<Value = Status> {
        proptest::sample::select(Status::ALL)
    }

    fn arb_item() -> impl Strategy<Value = Item> {
        (0..3usize, 0..2usize, 0..3usize, 1..=28u8, arb_status())
            .prop_map(|(a, p, v, d, s)| item(a, p, v, d, s))
    }

    fn arb_filter() -> impl Strategy<Value = Filter> {
        (
            proptest::option::of(0..3usize),
            proptest::option::of(arb_status()),
            proptest::option::of(1..=28u8),
            proptest::option::of(proptest::sample::select(vec![
                "blue", "NOTE", "da", "e", "zzz",
            ])),
        )
            .prop_map(|(artist, status, day, text)| Filter {
                artist_id: artist.map(|i| artist_ids()[i]),
                status,
                start_date: day.and_then(|d| EventDate::from_ymd(2030, 6, d)),
                text: text.map(ToOwned::to_owned),
            })
    }

    /// Splits the provided [`Filter`] into single-criterion ones.
    fn split(f: &Filter) -> Vec<Filter> {
        vec![
            Filter {
                artist_id: f.artist_id,
                ..Filter::default()
            },
            Filter {
                status: f.status,
                ..Filter::default()
            },
            Filter {
                start_date: f.start_date,
                ..Filter::default()
            },
            Filter {
                text: f.text.clone(),
                ..Filter::default()
            },
        ]
    }

    proptest! {
        #[test]
        fn criteria_commute(
            items in proptest::collection::vec(arb_item(), 0..20),
            filter in arb_filter(),
        ) {
            let combined = ids(&filter.apply(items.clone()));

            let mut parts = split(&filter);
            let forward = parts
                .iter()
                .fold(items.clone(), |acc, f| f.apply(acc));
            parts.reverse();
            let backward = parts.iter().fold(items, |acc, f| f.apply(acc));

            prop_assert_eq!(&combined, &ids(&forward));
            prop_assert_eq!(&combined, &ids(&backward));
        }
    }
}
