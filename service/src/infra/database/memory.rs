//! In-memory [`Database`] implementation.
//!
//! Transactions work on a copy of the committed data, so nothing is visible
//! to other clients until [`Commit`]. Only one transaction runs at a time,
//! which makes every [`Lock`] trivially held.

use std::sync::{Arc, Mutex, PoisonError};

use common::operations::{By, Commit, Insert, Lock, Select, Transact, Update};
use derive_more::{Display, Error as StdError};
use tokio::sync::OwnedMutexGuard;
use tracerr::Traced;

use crate::{
    domain::{
        artist, booking, invoice, promoter, venue, Artist, Booking, Contract,
        Invoice, Itinerary, Promoter, Venue,
    },
    infra::{database, Database},
    read,
};

/// In-memory [`Database`] client.
#[derive(Clone, Debug, Default)]
pub struct Memory<C = NonTx> {
    /// State shared by all the clients.
    shared: Arc<Shared>,

    /// [`Connection`] of this client.
    conn: C,
}

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C> Memory<C> {
    /// Sets the [`Outage`] mode of this [`Memory`] database.
    pub fn set_outage(&self, outage: Outage) {
        *self
            .shared
            .outage
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = outage;
    }

    /// Fails with [`Error::Unavailable`] if the provided operation is
    /// affected by the current [`Outage`].
    fn check_outage(&self, commit: bool) -> Result<(), Traced<database::Error>> {
        let outage = *self
            .shared
            .outage
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match outage {
            Outage::All => {}
            Outage::Commits if commit => {}
            Outage::None | Outage::Commits => return Ok(()),
        }
        Err(tracerr::new!(Error::Unavailable)).map_err(tracerr::map_from)
    }
}

impl<C: Connection> Memory<C> {
    /// Runs the provided function against the [`Tables`] visible to this
    /// client.
    fn with_tables<R>(
        &self,
        f: impl FnOnce(&mut Tables) -> R,
    ) -> Result<R, Traced<database::Error>> {
        self.check_outage(false)?;
        self.conn
            .with_tables(&self.shared.committed, f)
            .map_err(tracerr::wrap!())
    }
}

/// Simulated unavailability of a [`Memory`] database.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Outage {
    /// Everything works.
    #[default]
    None,

    /// Only [`Commit`]s fail.
    Commits,

    /// All the operations fail.
    All,
}

/// State shared by all the [`Memory`] clients.
#[derive(Debug, Default)]
struct Shared {
    /// Committed [`Tables`].
    committed: Mutex<Tables>,

    /// Lock held by the running transaction.
    writer: Arc<tokio::sync::Mutex<()>>,

    /// Current [`Outage`] mode.
    outage: Mutex<Outage>,
}

/// Data stored in a [`Memory`] database.
#[derive(Clone, Debug, Default)]
pub struct Tables {
    /// Stored [`Artist`]s.
    artists: Vec<Artist>,

    /// Stored [`Promoter`]s.
    promoters: Vec<Promoter>,

    /// Stored [`Venue`]s.
    venues: Vec<Venue>,

    /// Stored [`Booking`]s.
    bookings: Vec<Booking>,

    /// Stored [`Invoice`]s.
    invoices: Vec<Invoice>,

    /// Stored [`Contract`]s.
    contracts: Vec<Contract>,

    /// Stored [`Itinerary`]s.
    itineraries: Vec<Itinerary>,
}

/// Non-transactional [`Connection`]: every write is committed at once.
#[derive(Clone, Copy, Debug, Default)]
pub struct NonTx;

/// Transactional [`Connection`].
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`Tables`] changed by this transaction.
    ///
    /// [`None`] once committed.
    staged: Arc<Mutex<Option<Tables>>>,

    /// Guard of the [`Shared::writer`] lock.
    _writer: Arc<OwnedMutexGuard<()>>,
}

/// Connection to a [`Memory`] database.
pub trait Connection {
    /// Runs the provided function against the [`Tables`] visible through this
    /// [`Connection`].
    ///
    /// # Errors
    ///
    /// If this [`Connection`] cannot be used anymore.
    fn with_tables<R>(
        &self,
        committed: &Mutex<Tables>,
        f: impl FnOnce(&mut Tables) -> R,
    ) -> Result<R, Traced<database::Error>>;
}

impl Connection for NonTx {
    fn with_tables<R>(
        &self,
        committed: &Mutex<Tables>,
        f: impl FnOnce(&mut Tables) -> R,
    ) -> Result<R, Traced<database::Error>> {
        Ok(f(&mut committed.lock().unwrap_or_else(PoisonError::into_inner)))
    }
}

impl Connection for Tx {
    fn with_tables<R>(
        &self,
        _: &Mutex<Tables>,
        f: impl FnOnce(&mut Tables) -> R,
    ) -> Result<R, Traced<database::Error>> {
        self.staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_mut()
            .map(f)
            .ok_or_else(|| tracerr::new!(Error::Committed))
            .map_err(tracerr::map_from)
    }
}

/// [`Memory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Database is unavailable due to an [`Outage`].
    #[display("`Memory` database is unavailable")]
    Unavailable,

    /// Transaction was committed already.
    #[display("`Memory` transaction is committed already")]
    Committed,
}

impl Database<Transact> for Memory<NonTx> {
    type Ok = Memory<Tx>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        self.check_outage(false)?;

        let writer = Arc::clone(&self.shared.writer).lock_owned().await;
        let staged = self
            .shared
            .committed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Ok(Memory {
            shared: Arc::clone(&self.shared),
            conn: Tx {
                staged: Arc::new(Mutex::new(Some(staged))),
                _writer: Arc::new(writer),
            },
        })
    }
}

impl Database<Transact> for Memory<Tx> {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.check_outage(true)?;

        let staged = self
            .conn
            .staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| tracerr::new!(Error::Committed))
            .map_err(tracerr::map_from)?;
        *self
            .shared
            .committed
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = staged;
        Ok(())
    }
}

/// Implements row-level [`Database`] operations for the provided entities.
macro_rules! impl_rows {
    ($($ty:ty => $table:ident by $key:ident: $id:ty);* $(;)?) => {$(
        impl<C: Connection> Database<Insert<$ty>> for Memory<C> {
            type Ok = ();
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                Insert(row): Insert<$ty>,
            ) -> Result<Self::Ok, Self::Err> {
                self.execute(Update(row)).await.map_err(tracerr::wrap!())
            }
        }

        impl<C: Connection> Database<Update<$ty>> for Memory<C> {
            type Ok = ();
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                Update(row): Update<$ty>,
            ) -> Result<Self::Ok, Self::Err> {
                self.with_tables(|t| {
                    if let Some(existing) =
                        t.$table.iter_mut().find(|r| r.$key == row.$key)
                    {
                        *existing = row;
                    } else {
                        t.$table.push(row);
                    }
                })
            }
        }

        impl<C: Connection> Database<Select<By<Option<$ty>, $id>>>
            for Memory<C>
        {
            type Ok = Option<$ty>;
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                Select(by): Select<By<Option<$ty>, $id>>,
            ) -> Result<Self::Ok, Self::Err> {
                let key = by.into_inner();
                self.with_tables(|t| {
                    t.$table.iter().find(|r| r.$key == key).cloned()
                })
            }
        }

        impl<C: Connection> Database<Select<By<Vec<$ty>, ()>>> for Memory<C> {
            type Ok = Vec<$ty>;
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                _: Select<By<Vec<$ty>, ()>>,
            ) -> Result<Self::Ok, Self::Err> {
                self.with_tables(|t| t.$table.clone())
            }
        }

        impl<C: Connection> Database<Lock<By<$ty, $id>>> for Memory<C> {
            type Ok = ();
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                _: Lock<By<$ty, $id>>,
            ) -> Result<Self::Ok, Self::Err> {
                // Running transaction holds `Shared::writer` already.
                self.with_tables(|_| ())
            }
        }
    )*};
}

impl_rows! {
    Artist => artists by id: artist::Id;
    Promoter => promoters by id: promoter::Id;
    Venue => venues by id: venue::Id;
    Booking => bookings by id: booking::Id;
    Invoice => invoices by id: invoice::Id;
    Contract => contracts by booking_id: booking::Id;
    Itinerary => itineraries by booking_id: booking::Id;
}

impl<C: Connection> Database<Select<By<Option<Invoice>, booking::Id>>>
    for Memory<C>
{
    type Ok = Option<Invoice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Invoice>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let booking_id = by.into_inner();
        self.with_tables(|t| {
            t.invoices
                .iter()
                .find(|i| i.booking_id == booking_id)
                .cloned()
        })
    }
}

impl<C: Connection> Database<Select<By<Vec<Invoice>, read::invoice::OverdueOn>>>
    for Memory<C>
{
    type Ok = Vec<Invoice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Invoice>, read::invoice::OverdueOn>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::invoice::OverdueOn(today) = by.into_inner();
        self.with_tables(|t| {
            t.invoices
                .iter()
                .filter(|i| i.is_overdue_on(today))
                .cloned()
                .collect()
        })
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Commit, Insert, Select, Transact},
        DateTime, Handler as _,
    };

    use crate::domain::{artist, contact, Artist};

    use super::{Memory, Outage};

    fn artist() -> Artist {
        Artist {
            id: artist::Id::new(),
            name: artist::Name::new("Nina Simone").unwrap(),
            email: contact::Email::new("nina@agency.com").unwrap(),
            phone: contact::Phone::new("5551234567").unwrap(),
            genre: artist::Genre::new("Jazz").unwrap(),
            bio: artist::Bio::new("High Priestess of Soul").unwrap(),
            image_url: None,
            created_at: DateTime::now().coerce(),
        }
    }

    async fn select(db: &Memory, id: artist::Id) -> Option<Artist> {
        db.execute(Select(By::<Option<Artist>, _>::new(id)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn changes_invisible_until_commit() {
        let db = Memory::new();
        let a = artist();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(a.clone())).await.unwrap();
        assert!(select(&db, a.id).await.is_none());

        tx.execute(Commit).await.unwrap();
        assert!(select(&db, a.id).await.is_some());

        assert!(tx.execute(Insert(artist())).await.is_err());
    }

    #[tokio::test]
    async fn dropped_tx_is_rolled_back() {
        let db = Memory::new();
        let a = artist();

        {
            let tx = db.execute(Transact).await.unwrap();
            tx.execute(Insert(a.clone())).await.unwrap();
        }

        assert!(select(&db, a.id).await.is_none());
        // Writer lock is released, so a new transaction may start.
        drop(db.execute(Transact).await.unwrap());
    }

    #[tokio::test]
    async fn failed_commit_changes_nothing() {
        let db = Memory::new();
        let a = artist();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(a.clone())).await.unwrap();
        db.set_outage(Outage::Commits);
        assert!(tx.execute(Commit).await.is_err());
        drop(tx);

        db.set_outage(Outage::None);
        assert!(select(&db, a.id).await.is_none());

        db.set_outage(Outage::All);
        assert!(db
            .execute(Select(By::<Option<Artist>, _>::new(a.id)))
            .await
            .is_err());
    }
}
