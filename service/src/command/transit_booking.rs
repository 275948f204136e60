//! [`Command`]s moving a [`Booking`] along its [`booking::Status`] graph.

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{booking, Booking},
    infra::{database, Database},
    store::Record,
    Service,
};

use super::Command;

/// Defines a [`Command`] moving a [`Booking`] into the provided
/// [`booking::Status`].
macro_rules! define_transit_command {
    ($(#[$meta:meta])* $name:ident => $status:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug)]
        pub struct $name {
            /// ID of the [`Booking`] to be moved.
            pub booking_id: booking::Id,
        }

        impl<Db> Command<$name> for Service<Db>
        where
            Db: Database<Transact, Err = Traced<database::Error>>,
            Transacted<Db>: Database<
                    Lock<By<Booking, booking::Id>>,
                    Err = Traced<database::Error>,
                > + Database<
                    Select<By<Option<Booking>, booking::Id>>,
                    Ok = Option<Booking>,
                    Err = Traced<database::Error>,
                > + Database<Update<Booking>, Err = Traced<database::Error>>
                + Database<Commit, Err = Traced<database::Error>>,
        {
            type Ok = Booking;
            type Err = Traced<ExecutionError>;

            async fn execute(
                &self,
                cmd: $name,
            ) -> Result<Self::Ok, Self::Err> {
                transit(self, cmd.booking_id, booking::Status::$status)
                    .await
                    .map_err(tracerr::wrap!())
            }
        }
    };
}

define_transit_command! {
    /// [`Command`] for approving the contract of a
    /// [`booking::Status::Proposed`] [`Booking`], confirming it.
    ApproveContract => Confirmed
}

define_transit_command! {
    /// [`Command`] for cancelling a [`Booking`] which is not finished yet.
    CancelBooking => Cancelled
}

define_transit_command! {
    /// [`Command`] for marking a [`booking::Status::Confirmed`] [`Booking`]
    /// as performed.
    CompleteBooking => Completed
}

/// Moves the [`Booking`] with the provided ID into the provided
/// [`booking::Status`].
async fn transit<Db>(
    service: &Service<Db>,
    booking_id: booking::Id,
    to: booking::Status,
) -> Result<Booking, Traced<ExecutionError>>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Booking, booking::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<Update<Booking>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    use ExecutionError as E;

    let tx = service
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

    let from = booking.status();
    booking
        .transit(to)
        .map_err(tracerr::from_and_wrap!(=> E))?;

    tx.execute(Update(booking.clone()))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))
        .map(drop)?;

    tx.execute(Commit)
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))
        .map(drop)?;

    service.store().save([Record::from(booking.clone())]).await;
    log::info!("`Booking(id: {booking_id})` moved from `{from}` to `{to}`");

    Ok(booking)
}

/// Error of moving a [`Booking`] into another [`booking::Status`].
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Booking`] with the provided ID does not exist.
    #[display("`Booking(id: {_0})` does not exist")]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Booking`] cannot move into the requested [`booking::Status`].
    #[display("{_0}")]
    #[from]
    InvalidTransition(booking::InvalidTransition),
}
