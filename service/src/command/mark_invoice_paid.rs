//! [`Command`] for marking an [`Invoice`] as paid.

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{invoice, Invoice},
    infra::{database, Database},
    store::Record,
    Service,
};

use super::Command;

/// [`Command`] for marking an [`Invoice`] as paid.
#[derive(Clone, Copy, Debug)]
pub struct MarkInvoicePaid {
    /// ID of the [`Invoice`] to be marked as paid.
    pub invoice_id: invoice::Id,
}

impl<Db> Command<MarkInvoicePaid> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Invoice, invoice::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Invoice>, invoice::Id>>,
            Ok = Option<Invoice>,
            Err = Traced<database::Error>,
        > + Database<Update<Invoice>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Invoice;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: MarkInvoicePaid,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let MarkInvoicePaid { invoice_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent changes of the same `Invoice`.
        tx.execute(Lock(By::new(invoice_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut invoice = tx
            .execute(Select(By::<Option<Invoice>, _>::new(invoice_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::InvoiceNotExists(invoice_id))
            .map_err(tracerr::wrap!())?;

        invoice
            .mark_paid(invoice::PaymentDateTime::now())
            .map_err(tracerr::from_and_wrap!(=> E))?;

        tx.execute(Update(invoice.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.store().save([Record::from(invoice.clone())]).await;
        log::info!("`Invoice(id: {invoice_id})` paid");

        Ok(invoice)
    }
}

/// Error of [`MarkInvoicePaid`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Invoice`] is [`invoice::Status::Paid`] already.
    #[display("{_0}")]
    #[from]
    InvalidTransition(invoice::InvalidTransition),

    /// [`Invoice`] with the provided ID does not exist.
    #[display("`Invoice(id: {_0})` does not exist")]
    InvoiceNotExists(#[error(not(source))] invoice::Id),
}
