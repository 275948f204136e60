//! [`Command`] for creating an [`Invoice`] of a [`Booking`].

use common::operations::{
    By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{booking, invoice, Booking, Invoice},
    infra::{database, Database},
    store::Record,
    Service,
};

use super::Command;

/// [`Command`] for creating an [`Invoice`] of a [`Booking`].
#[derive(Clone, Debug)]
pub struct CreateInvoice {
    /// ID of the [`Booking`] to be billed.
    pub booking_id: booking::Id,

    /// [`invoice::Amount`] to be billed.
    ///
    /// [`Booking`]'s fee is billed if [`None`].
    pub amount: Option<invoice::Amount>,

    /// [`invoice::DueDate`] of a new [`Invoice`].
    pub due_date: invoice::DueDate,

    /// [`invoice::Notes`] to a new [`Invoice`], if any.
    pub notes: Option<invoice::Notes>,
}

impl<Db> Command<CreateInvoice> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Booking, booking::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Invoice>, booking::Id>>,
            Ok = Option<Invoice>,
            Err = Traced<database::Error>,
        > + Database<Insert<Invoice>, Err = Traced<database::Error>>
        + Database<Update<Booking>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Invoice;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateInvoice,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateInvoice {
            booking_id,
            amount,
            due_date,
            notes,
        } = cmd;

        if due_date < invoice::DueDate::today() {
            return Err(tracerr::new!(E::DueDateInPast(due_date)));
        }

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

        let existing = tx
            .execute(Select(By::<Option<Invoice>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !booking.accepts_invoice() || existing.is_some() {
            return Err(tracerr::new!(E::IneligibleBooking(booking_id)));
        }

        let invoice = Invoice::draft(&booking, amount, due_date, notes);
        tx.execute(Insert(invoice.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        booking.documents.has_invoice = true;
        tx.execute(Update(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.store()
            .save([Record::from(invoice.clone()), Record::from(booking)])
            .await;
        log::info!(
            "`Invoice(id: {})` drafted for `Booking(id: {booking_id})`",
            invoice.id,
        );

        Ok(invoice)
    }
}

/// Error of [`CreateInvoice`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Booking`] with the provided ID does not exist.
    #[display("`Booking(id: {_0})` does not exist")]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Provided [`invoice::DueDate`] has passed already.
    #[display("`Invoice` due date `{_0}` is in the past")]
    DueDateInPast(#[error(not(source))] invoice::DueDate),

    /// [`Booking`] is not confirmed or is invoiced already.
    #[display("`Booking(id: {_0})` is not eligible for invoicing")]
    IneligibleBooking(#[error(not(source))] booking::Id),
}
