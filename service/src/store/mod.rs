//! Typed cache of the collections fetched from the [`Database`].
//!
//! [`Store`] hands out read-only [`Snapshot`]s. Only [`Command`]s write into
//! it, and only after the [`Database`] acknowledged the change.
//!
//! [`Command`]: crate::Command
//! [`Database`]: crate::infra::Database

mod select;

use std::{collections::HashMap, hash::Hash, sync::Arc};

use tokio::sync::{broadcast, RwLock};

use crate::domain::{
    artist, booking, invoice, promoter, venue, Artist, Booking, Invoice,
    Promoter, Venue,
};

/// Capacity of the [`Change`]s channel.
///
/// Lagging subscribers lose the oldest [`Change`]s.
const CHANGES_CAPACITY: usize = 256;

/// Typed cache of the fetched collections.
#[derive(Clone, Debug)]
pub struct Store {
    /// Cached collections.
    snapshot: Arc<RwLock<Snapshot>>,

    /// Sender of [`Change`] notifications.
    changes: broadcast::Sender<Change>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates a new empty [`Store`].
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGES_CAPACITY);
        Self {
            snapshot: Arc::new(RwLock::new(Snapshot::default())),
            changes,
        }
    }

    /// Returns a copy of the current [`Snapshot`].
    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.read().await.clone()
    }

    /// Runs the provided function against the current [`Snapshot`] without
    /// copying it.
    pub async fn read<R>(&self, f: impl FnOnce(&Snapshot) -> R) -> R {
        f(&*self.snapshot.read().await)
    }

    /// Subscribes to [`Change`]s of this [`Store`].
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.changes.subscribe()
    }

    /// Saves the provided [`Record`]s at once, notifying subscribers about
    /// each of them.
    pub(crate) async fn save(&self, records: impl IntoIterator<Item = Record>) {
        let changes = {
            let mut snapshot = self.snapshot.write().await;
            records
                .into_iter()
                .map(|r| snapshot.put(r))
                .collect::<Vec<_>>()
        };
        for change in changes {
            _ = self.changes.send(change);
        }
    }

    /// Replaces all the cached collections with the provided [`Snapshot`].
    pub(crate) async fn replace(&self, snapshot: Snapshot) {
        *self.snapshot.write().await = snapshot;
        _ = self.changes.send(Change::Refreshed);
    }
}

/// Read-only copy of the [`Store`] contents.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    /// Cached [`Artist`]s.
    pub artists: Collection<Artist>,

    /// Cached [`Promoter`]s.
    pub promoters: Collection<Promoter>,

    /// Cached [`Venue`]s.
    pub venues: Collection<Venue>,

    /// Cached [`Booking`]s.
    pub bookings: Collection<Booking>,

    /// Cached [`Invoice`]s.
    pub invoices: Collection<Invoice>,
}

impl Snapshot {
    /// Puts the provided [`Record`] into this [`Snapshot`].
    fn put(&mut self, record: Record) -> Change {
        match record {
            Record::Artist(a) => Change::Artist(self.artists.put(a)),
            Record::Promoter(p) => Change::Promoter(self.promoters.put(p)),
            Record::Venue(v) => Change::Venue(self.venues.put(v)),
            Record::Booking(b) => Change::Booking(self.bookings.put(b)),
            Record::Invoice(i) => Change::Invoice(self.invoices.put(i)),
        }
    }

    /// Returns the [`Invoice`] of the provided [`Booking`], if any.
    #[must_use]
    pub fn invoice_of(&self, booking_id: booking::Id) -> Option<&Invoice> {
        self.invoices.iter().find(|i| i.booking_id == booking_id)
    }
}

/// Entity identified by an ID.
pub trait Entity: Clone {
    /// Type of the ID.
    type Id: Copy + Eq + Hash;

    /// Returns the ID of this [`Entity`].
    fn id(&self) -> Self::Id;
}

/// Implements [`Entity`] for the provided types.
macro_rules! impl_entity {
    ($($ty:ty => $id:ty),* $(,)?) => {$(
        impl Entity for $ty {
            type Id = $id;

            fn id(&self) -> Self::Id {
                self.id
            }
        }
    )*};
}

impl_entity! {
    Artist => artist::Id,
    Promoter => promoter::Id,
    Venue => venue::Id,
    Booking => booking::Id,
    Invoice => invoice::Id,
}

/// Collection of [`Entity`]s keyed by their IDs, preserving the order they
/// were fetched in.
#[derive(Clone, Debug)]
pub struct Collection<T: Entity> {
    /// IDs in the fetch order.
    order: Vec<T::Id>,

    /// [`Entity`]s by their IDs.
    items: HashMap<T::Id, T>,
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            items: HashMap::new(),
        }
    }
}

impl<T: Entity> Collection<T> {
    /// Returns the [`Entity`] with the provided ID, if any.
    #[must_use]
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.get(&id)
    }

    /// Returns an iterator over the [`Entity`]s in the fetch order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Returns the number of [`Entity`]s in this [`Collection`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Indicates whether this [`Collection`] is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Puts the provided [`Entity`] into this [`Collection`].
    ///
    /// An existing [`Entity`] is replaced in place, a new one is appended.
    fn put(&mut self, item: T) -> T::Id {
        let id = item.id();
        if self.items.insert(id, item).is_none() {
            self.order.push(id);
        }
        id
    }
}

impl<T: Entity> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::default();
        for item in iter {
            _ = collection.put(item);
        }
        collection
    }
}

/// Entity to be saved into a [`Store`].
#[derive(Clone, Debug)]
pub(crate) enum Record {
    /// [`Artist`] record.
    Artist(Artist),

    /// [`Promoter`] record.
    Promoter(Promoter),

    /// [`Venue`] record.
    Venue(Venue),

    /// [`Booking`] record.
    Booking(Booking),

    /// [`Invoice`] record.
    Invoice(Invoice),
}

impl From<Artist> for Record {
    fn from(a: Artist) -> Self {
        Self::Artist(a)
    }
}

impl From<Promoter> for Record {
    fn from(p: Promoter) -> Self {
        Self::Promoter(p)
    }
}

impl From<Venue> for Record {
    fn from(v: Venue) -> Self {
        Self::Venue(v)
    }
}

impl From<Booking> for Record {
    fn from(b: Booking) -> Self {
        Self::Booking(b)
    }
}

impl From<Invoice> for Record {
    fn from(i: Invoice) -> Self {
        Self::Invoice(i)
    }
}

/// Notification about a [`Store`] change.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Change {
    /// [`Artist`] was saved.
    Artist(artist::Id),

    /// [`Promoter`] was saved.
    Promoter(promoter::Id),

    /// [`Venue`] was saved.
    Venue(venue::Id),

    /// [`Booking`] was saved.
    Booking(booking::Id),

    /// [`Invoice`] was saved.
    Invoice(invoice::Id),

    /// All the collections were replaced.
    Refreshed,
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::domain::{artist, contact, Artist};

    use super::{Change, Collection, Record, Snapshot, Store};

    fn artist(name: &str) -> Artist {
        Artist {
            id: artist::Id::new(),
            name: artist::Name::new(name).unwrap(),
            email: contact::Email::new("artist@agency.com").unwrap(),
            phone: contact::Phone::new("5551234567").unwrap(),
            genre: artist::Genre::new("Jazz").unwrap(),
            bio: artist::Bio::new("Plays piano since 1990").unwrap(),
            image_url: None,
            created_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn collection_preserves_fetch_order() {
        let (a, b, c) = (artist("Ann"), artist("Bob"), artist("Cid"));
        let mut col = [a.clone(), b.clone(), c.clone()]
            .into_iter()
            .collect::<Collection<_>>();

        let mut renamed = b.clone();
        renamed.name = artist::Name::new("Bobby").unwrap();
        _ = col.put(renamed);

        let names = col.iter().map(|a| a.name.to_string()).collect::<Vec<_>>();
        assert_eq!(names, ["Ann", "Bobby", "Cid"]);
        assert_eq!(col.len(), 3);
        assert_eq!(col.get(a.id).unwrap().name.to_string(), "Ann");
    }

    #[tokio::test]
    async fn notifies_subscribers_after_saving() {
        let store = Store::new();
        let mut changes = store.subscribe();

        let a = artist("Ann");
        store.save([Record::from(a.clone())]).await;

        assert_eq!(changes.recv().await.unwrap(), Change::Artist(a.id));
        assert!(store.read(|s| s.artists.get(a.id).is_some()).await);

        store.replace(Snapshot::default()).await;

        assert_eq!(changes.recv().await.unwrap(), Change::Refreshed);
        assert!(store.snapshot().await.artists.is_empty());
    }

    #[tokio::test]
    async fn snapshots_are_detached() {
        let store = Store::new();
        store.save([Record::from(artist("Ann"))]).await;

        let mut snapshot = store.snapshot().await;
        snapshot.artists = Collection::default();

        assert_eq!(store.snapshot().await.artists.len(), 1);
    }
}
