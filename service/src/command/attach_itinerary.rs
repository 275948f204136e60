//! [`Command`] for attaching an [`Itinerary`] to a [`Booking`].

use common::operations::{
    By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{booking, itinerary, Booking, Itinerary},
    infra::{database, Database},
    store::Record,
    Service,
};

use super::Command;

/// [`Command`] for attaching an [`Itinerary`] to a [`Booking`].
///
/// Replaces the previously attached [`Itinerary`], if any.
#[derive(Clone, Debug)]
pub struct AttachItinerary {
    /// ID of the [`Booking`] to attach the [`Itinerary`] to.
    pub booking_id: booking::Id,

    /// [`itinerary::ScheduleDate`] of the [`Itinerary`].
    pub date: itinerary::ScheduleDate,

    /// [`itinerary::Items`] of the [`Itinerary`].
    pub items: itinerary::Items,

    /// [`itinerary::Notes`] to the [`Itinerary`], if any.
    pub notes: Option<itinerary::Notes>,
}

impl<Db> Command<AttachItinerary> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Booking, booking::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<Insert<Itinerary>, Err = Traced<database::Error>>
        + Database<Update<Booking>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AttachItinerary,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AttachItinerary {
            booking_id,
            date,
            items,
            notes,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent changes of the same `Booking`.
        tx.execute(Lock(By::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut booking = tx
            .execute(Select(By::<Option<Booking>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(booking_id))
            .map_err(tracerr::wrap!())?;

        if !booking.accepts_itinerary() {
            return Err(tracerr::new!(E::IneligibleBooking(
                booking_id,
                booking.status(),
            )));
        }

        tx.execute(Insert(Itinerary {
            booking_id,
            date,
            items,
            notes,
            attached_at: itinerary::AttachmentDateTime::now(),
        }))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))
        .map(drop)?;

        booking.documents.has_itinerary = true;
        tx.execute(Update(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.store().save([Record::from(booking.clone())]).await;
        log::info!("`Itinerary` attached to `Booking(id: {booking_id})`");

        Ok(booking)
    }
}

/// Error of [`AttachItinerary`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Booking`] with the provided ID does not exist.
    #[display("`Booking(id: {_0})` does not exist")]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Booking`] is in a [`booking::Status`] not accepting [`Itinerary`]s.
    #[display("`Booking(id: {_0})` is `{_1}` and cannot have an `Itinerary`")]
    IneligibleBooking(
        #[error(not(source))] booking::Id,
        #[error(not(source))] booking::Status,
    ),
}
