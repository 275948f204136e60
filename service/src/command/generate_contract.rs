//! [`Command`] for generating a [`Contract`] of a [`Booking`].

use common::operations::{
    By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{booking, contract, Booking, Contract},
    infra::{database, Database},
    store::Record,
    Service,
};

use super::Command;

/// [`Command`] for generating a [`Contract`] of a [`Booking`].
#[derive(Clone, Debug)]
pub struct GenerateContract {
    /// ID of the [`Booking`] to generate the [`Contract`] for.
    pub booking_id: booking::Id,

    /// [`contract::Deposit`] to be paid, if any.
    pub deposit: Option<contract::Deposit>,

    /// [`contract::DepositDueDate`], if any.
    pub deposit_due_date: Option<contract::DepositDueDate>,

    /// [`contract::SpecialTerms`], if any.
    pub special_terms: Option<contract::SpecialTerms>,
}

impl<Db> Command<GenerateContract> for Service<Db>
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
            Select<By<Option<Contract>, booking::Id>>,
            Ok = Option<Contract>,
            Err = Traced<database::Error>,
        > + Database<Insert<Contract>, Err = Traced<database::Error>>
        + Database<Update<Booking>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Contract;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: GenerateContract,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let GenerateContract {
            booking_id,
            deposit,
            deposit_due_date,
            special_terms,
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

        let existing = tx
            .execute(Select(By::<Option<Contract>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() || booking.documents().has_contract() {
            return Err(tracerr::new!(E::ContractExists(booking_id)));
        }
        if !booking.accepts_contract() {
            return Err(tracerr::new!(E::IneligibleBooking(
                booking_id,
                booking.status(),
            )));
        }

        let contract = Contract {
            id: contract::Id::new(),
            booking_id,
            deposit,
            deposit_due_date,
            special_terms,
            document_url: contract::DocumentUrl::of_booking(
                &self.config().documents_base_url,
                booking_id,
            ),
            created_at: contract::CreationDateTime::now(),
        };
        tx.execute(Insert(contract.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        booking.documents.has_contract = true;
        tx.execute(Update(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.store().save([Record::from(booking)]).await;
        log::info!(
            "`Contract(id: {})` generated for `Booking(id: {booking_id})`",
            contract.id,
        );

        Ok(contract)
    }
}

/// Error of [`GenerateContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Booking`] with the provided ID does not exist.
    #[display("`Booking(id: {_0})` does not exist")]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// [`Booking`] has a [`Contract`] already.
    #[display("`Booking(id: {_0})` has a `Contract` already")]
    ContractExists(#[error(not(source))] booking::Id),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Booking`] is in a [`booking::Status`] not accepting [`Contract`]s.
    #[display("`Booking(id: {_0})` is `{_1}` and cannot have a `Contract`")]
    IneligibleBooking(
        #[error(not(source))] booking::Id,
        #[error(not(source))] booking::Status,
    ),
}
