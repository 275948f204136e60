//! [`Command`] for creating a new [`Booking`].

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        artist, booking, promoter, venue, Artist, Booking, Promoter, Venue,
    },
    infra::{database, Database},
    store::Record,
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Booking`].
#[derive(Clone, Copy, Debug)]
pub struct CreateBooking {
    /// ID of the performing [`Artist`].
    pub artist_id: artist::Id,

    /// ID of the [`Promoter`] the [`Booking`] is made for.
    pub promoter_id: promoter::Id,

    /// ID of the [`Venue`] hosting the performance.
    pub venue_id: venue::Id,

    /// [`booking::EventDate`] of the performance.
    pub date: booking::EventDate,

    /// [`booking::Fee`] agreed for the performance.
    pub fee: booking::Fee,
}

impl<Db> Command<CreateBooking> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Artist>, artist::Id>>,
            Ok = Option<Artist>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Promoter>, promoter::Id>>,
            Ok = Option<Promoter>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Venue>, venue::Id>>,
            Ok = Option<Venue>,
            Err = Traced<database::Error>,
        > + Database<Insert<Booking>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateBooking {
            artist_id,
            promoter_id,
            venue_id,
            date,
            fee,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Select(By::<Option<Artist>, _>::new(artist_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ArtistNotExists(artist_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        tx.execute(Select(By::<Option<Promoter>, _>::new(promoter_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PromoterNotExists(promoter_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        tx.execute(Select(By::<Option<Venue>, _>::new(venue_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VenueNotExists(venue_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let booking =
            Booking::propose(artist_id, promoter_id, venue_id, date, fee);

        tx.execute(Insert(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.store().save([Record::from(booking.clone())]).await;
        log::info!("`Booking(id: {})` proposed", booking.id);

        Ok(booking)
    }
}

/// Error of [`CreateBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Artist`] with the provided ID does not exist.
    #[display("`Artist(id: {_0})` does not exist")]
    ArtistNotExists(#[error(not(source))] artist::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Promoter`] with the provided ID does not exist.
    #[display("`Promoter(id: {_0})` does not exist")]
    PromoterNotExists(#[error(not(source))] promoter::Id),

    /// [`Venue`] with the provided ID does not exist.
    #[display("`Venue(id: {_0})` does not exist")]
    VenueNotExists(#[error(not(source))] venue::Id),
}
