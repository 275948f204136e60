//! [`Select`] operations over a [`Store`].

use std::convert::Infallible;

use common::{
    operations::{By, Select},
    Handler,
};

use crate::{
    domain::{
        artist, booking, invoice, promoter, venue, Artist, Booking, Invoice,
        Promoter, Venue,
    },
    read,
};

use super::{Snapshot, Store};

/// Implements [`Select`]ing a single entity and the whole list of them from
/// a [`Store`].
macro_rules! impl_select_entity {
    ($($ty:ty => $id:ty, $field:ident);* $(;)?) => {$(
        impl Handler<Select<By<Option<$ty>, $id>>> for Store {
            type Ok = Option<$ty>;
            type Err = Infallible;

            async fn execute(
                &self,
                Select(by): Select<By<Option<$ty>, $id>>,
            ) -> Result<Self::Ok, Self::Err> {
                let id = by.into_inner();
                Ok(self.read(|s| s.$field.get(id).cloned()).await)
            }
        }

        impl Handler<Select<By<Vec<$ty>, ()>>> for Store {
            type Ok = Vec<$ty>;
            type Err = Infallible;

            async fn execute(
                &self,
                _: Select<By<Vec<$ty>, ()>>,
            ) -> Result<Self::Ok, Self::Err> {
                Ok(self.read(|s| s.$field.iter().cloned().collect()).await)
            }
        }
    )*};
}

impl_select_entity! {
    Artist => artist::Id, artists;
    Promoter => promoter::Id, promoters;
    Venue => venue::Id, venues;
    Booking => booking::Id, bookings;
    Invoice => invoice::Id, invoices;
}

impl Handler<Select<By<Option<Invoice>, booking::Id>>> for Store {
    type Ok = Option<Invoice>;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Invoice>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let booking_id = by.into_inner();
        Ok(self.read(|s| s.invoice_of(booking_id).cloned()).await)
    }
}

impl Handler<Select<By<Vec<read::booking::list::Item>, read::booking::list::Filter>>>
    for Store
{
    type Ok = Vec<read::booking::list::Item>;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<read::booking::list::Item>, read::booking::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        Ok(self
            .read(|s| {
                filter.apply(s.bookings.iter().map(|b| booking_item(s, b)))
            })
            .await)
    }
}

impl Handler<Select<By<Vec<read::invoice::list::Item>, read::invoice::list::Filter>>>
    for Store
{
    type Ok = Vec<read::invoice::list::Item>;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<read::invoice::list::Item>, read::invoice::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        Ok(self
            .read(|s| {
                filter.apply(s.invoices.iter().map(|i| {
                    let booking = s.bookings.get(i.booking_id);
                    read::invoice::list::Item {
                        invoice: i.clone(),
                        artist_name: booking
                            .and_then(|b| s.artists.get(b.artist_id))
                            .map(|a| a.name.clone()),
                        promoter_name: booking
                            .and_then(|b| s.promoters.get(b.promoter_id))
                            .map(|p| p.name.clone()),
                    }
                }))
            })
            .await)
    }
}

/// Joins the provided [`Booking`] with the names of its parties.
fn booking_item(s: &Snapshot, b: &Booking) -> read::booking::list::Item {
    read::booking::list::Item {
        booking: b.clone(),
        artist_name: s.artists.get(b.artist_id).map(|a| a.name.clone()),
        promoter_name: s.promoters.get(b.promoter_id).map(|p| p.name.clone()),
        venue_name: s.venues.get(b.venue_id).map(|v| v.name.clone()),
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Select},
        DateTime, Handler as _,
    };

    use crate::{
        domain::{
            artist, booking, contact, promoter, venue, Artist, Booking,
            Promoter, Venue,
        },
        read,
        store::{Record, Store},
    };

    #[tokio::test]
    async fn lists_bookings_with_party_names() {
        let artist = Artist {
            id: artist::Id::new(),
            name: artist::Name::new("Nina Simone").unwrap(),
            email: contact::Email::new("nina@agency.com").unwrap(),
            phone: contact::Phone::new("5551234567").unwrap(),
            genre: artist::Genre::new("Jazz").unwrap(),
            bio: artist::Bio::new("High Priestess of Soul").unwrap(),
            image_url: None,
            created_at: DateTime::now().coerce(),
        };
        let promoter = Promoter {
            id: promoter::Id::new(),
            name: promoter::Name::new("Live Nation").unwrap(),
            email: contact::Email::new("events@live.com").unwrap(),
            phone: contact::Phone::new("5559876543").unwrap(),
            company: promoter::Company::new("Live Nation Inc").unwrap(),
            created_at: DateTime::now().coerce(),
        };
        let venue = Venue {
            id: venue::Id::new(),
            name: venue::Name::new("Blue Note").unwrap(),
            city: venue::City::new("New York").unwrap(),
            state: venue::State::new("NY"),
            capacity: venue::Capacity::new(250).unwrap(),
            created_at: DateTime::now().coerce(),
        };
        let booking = Booking::propose(
            artist.id,
            promoter.id,
            venue.id,
            booking::EventDate::from_ymd(2030, 6, 1).unwrap(),
            booking::Fee::new("5000USD".parse().unwrap()).unwrap(),
        );
        let orphan = Booking::propose(
            artist::Id::new(),
            promoter.id,
            venue.id,
            booking::EventDate::from_ymd(2030, 6, 2).unwrap(),
            booking::Fee::new("100USD".parse().unwrap()).unwrap(),
        );

        let store = Store::new();
        store
            .save([
                Record::from(artist),
                promoter.into(),
                venue.into(),
                booking.clone().into(),
                orphan.clone().into(),
            ])
            .await;

        let items = store
            .execute(Select(By::<Vec<read::booking::list::Item>, _>::new(
                read::booking::list::Filter {
                    text: Some("nina".to_owned()),
                    ..read::booking::list::Filter::default()
                },
            )))
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].booking.id, booking.id);
        assert_eq!(items[0].venue_name.as_ref().unwrap().to_string(), "Blue Note");

        let all = store
            .execute(Select(By::<Vec<read::booking::list::Item>, _>::new(
                read::booking::list::Filter::default(),
            )))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[1].artist_name.is_none());
    }
}
