//! [`MarkOverdueInvoices`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::operations::{
    By, Commit, Lock, Perform, Select, Start, Transact, Transacted, Update,
};
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{invoice, Invoice},
    infra::{database, Database},
    read::invoice::OverdueOn,
    store::Record,
    Service,
};

use super::Task;

/// Configuration for [`MarkOverdueInvoices`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between checks of [`Invoice`]s due dates.
    pub interval: time::Duration,
}

/// [`Task`] moving [`invoice::Status::Sent`] [`Invoice`]s which are past
/// their due date into [`invoice::Status::Overdue`].
#[derive(Clone, Copy, Debug)]
pub struct MarkOverdueInvoices<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db> Task<Start<By<MarkOverdueInvoices<Self>, Config>>> for Service<Db>
where
    MarkOverdueInvoices<Service<Db>>:
        Task<Perform<()>, Ok = usize, Err: Error> + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<MarkOverdueInvoices<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = MarkOverdueInvoices {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            _ = interval.tick().await;
            match task.execute(Perform(())).await {
                Ok(0) => {}
                Ok(n) => log::info!("{n} `Invoice`s marked as overdue"),
                Err(e) => {
                    log::error!("`task::MarkOverdueInvoices` failed: {e}");
                }
            }
        }
    }
}

impl<Db> Task<Perform<()>> for MarkOverdueInvoices<Service<Db>>
where
    Db: Database<
            Select<By<Vec<Invoice>, OverdueOn>>,
            Ok = Vec<Invoice>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
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
    type Ok = usize;
    type Err = ExecutionError;

    /// Returns the number of [`Invoice`]s marked as overdue.
    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let today = invoice::DueDate::today();

        let candidates = self
            .service
            .database()
            .execute(Select(By::<Vec<Invoice>, _>::new(OverdueOn(today))))
            .await
            .map_err(tracerr::wrap!())?;

        let mut marked = 0;
        for candidate in candidates {
            match self.mark(candidate.id, today).await {
                Ok(Some(invoice)) => {
                    self.service.store().save([Record::from(invoice)]).await;
                    marked += 1;
                }
                Ok(None) => {}
                Err(e) => log::error!(
                    "failed to mark `Invoice(id: {})` as overdue: {e}",
                    candidate.id,
                ),
            }
        }
        Ok(marked)
    }
}

impl<Db> MarkOverdueInvoices<Service<Db>>
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
    /// Marks the [`Invoice`] with the provided ID as overdue in its own
    /// transaction, returning it if it has been changed.
    async fn mark(
        &self,
        id: invoice::Id,
        today: invoice::DueDate,
    ) -> Result<Option<Invoice>, ExecutionError> {
        let tx = self
            .service
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;

        // Avoid racing with concurrent payments.
        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        // Re-read, as the `Invoice` may have been paid meanwhile.
        let Some(mut invoice) = tx
            .execute(Select(By::<Option<Invoice>, _>::new(id)))
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };
        if !invoice.mark_overdue(today) {
            return Ok(None);
        }

        tx.execute(Update(invoice.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(Some(invoice))
    }
}

/// Error of [`MarkOverdueInvoices`] execution.
pub type ExecutionError = Traced<database::Error>;

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::operations::{By, Insert, Perform, Select};

    use crate::{
        domain::{artist, booking, invoice, promoter, venue, Booking, Invoice},
        infra::{database::memory::Outage, Memory},
        store::Store,
        task::Task as _,
        Config, Service,
    };

    use super::MarkOverdueInvoices;

    fn sent_invoice(due_in_days: i64) -> Invoice {
        let booking = Booking::propose(
            artist::Id::new(),
            promoter::Id::new(),
            venue::Id::new(),
            booking::EventDate::today(),
            booking::Fee::new("5000USD".parse().unwrap()).unwrap(),
        );
        let mut invoice = Invoice::draft(
            &booking,
            None,
            invoice::DueDate::today()
                .checked_add_days(due_in_days)
                .unwrap(),
            None,
        );
        invoice.send(invoice::SendingDateTime::now()).unwrap();
        invoice
    }

    async fn status(db: &Memory, id: invoice::Id) -> invoice::Status {
        db.execute(Select(By::<Option<Invoice>, _>::new(id)))
            .await
            .unwrap()
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn marks_only_past_due_sent_invoices() {
        let config = super::Config {
            interval: Duration::from_secs(60),
        };
        let service = Service {
            config: Config {
                documents_base_url: "https://docs.example.com".into(),
                mark_overdue_invoices: config,
            },
            database: Memory::new(),
            store: Store::new(),
        };

        let overdue = sent_invoice(-1);
        let due_today = sent_invoice(0);
        for inv in [&overdue, &due_today] {
            service
                .database()
                .execute(Insert(inv.clone()))
                .await
                .unwrap();
        }

        let task = MarkOverdueInvoices { config, service };
        assert_eq!(task.execute(Perform(())).await.unwrap(), 1);
        assert_eq!(task.execute(Perform(())).await.unwrap(), 0);

        let db = task.service.database();
        assert_eq!(status(db, overdue.id).await, invoice::Status::Overdue);
        assert_eq!(status(db, due_today.id).await, invoice::Status::Sent);

        let stored = task
            .service
            .store()
            .read(|s| s.invoices.get(overdue.id).map(Invoice::status))
            .await;
        assert_eq!(stored, Some(invoice::Status::Overdue));
    }

    #[tokio::test]
    async fn failed_invoice_does_not_abort_run() {
        let config = super::Config {
            interval: Duration::from_secs(60),
        };
        let service = Service {
            config: Config {
                documents_base_url: "https://docs.example.com".into(),
                mark_overdue_invoices: config,
            },
            database: Memory::new(),
            store: Store::new(),
        };

        let invoices = [sent_invoice(-3), sent_invoice(-1)];
        for inv in &invoices {
            service
                .database()
                .execute(Insert(inv.clone()))
                .await
                .unwrap();
        }

        let task = MarkOverdueInvoices { config, service };
        let db = task.service.database();

        db.set_outage(Outage::Commits);
        assert_eq!(task.execute(Perform(())).await.unwrap(), 0);
        for inv in &invoices {
            assert_eq!(status(db, inv.id).await, invoice::Status::Sent);
        }

        db.set_outage(Outage::None);
        assert_eq!(task.execute(Perform(())).await.unwrap(), 2);
        for inv in &invoices {
            assert_eq!(status(db, inv.id).await, invoice::Status::Overdue);
        }
    }
}
