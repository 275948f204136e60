//! [`Command`] for refreshing the [`Store`].

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{Artist, Booking, Invoice, Promoter, Venue},
    infra::{database, Database},
    store::Snapshot,
    Service,
};
#[cfg(doc)]
use crate::store::Store;

use super::Command;

/// [`Command`] for replacing the whole [`Store`] contents with the ones
/// fetched from the [`Database`].
#[derive(Clone, Copy, Debug)]
pub struct RefreshStore;

impl<Db> Command<RefreshStore> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Artist>, ()>>,
            Ok = Vec<Artist>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Promoter>, ()>>,
            Ok = Vec<Promoter>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Venue>, ()>>,
            Ok = Vec<Venue>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Booking>, ()>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Invoice>, ()>>,
            Ok = Vec<Invoice>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: RefreshStore) -> Result<Self::Ok, Self::Err> {
        let db = self.database();
        let snapshot = Snapshot {
            artists: db
                .execute(Select(By::<Vec<Artist>, _>::new(())))
                .await
                .map_err(tracerr::wrap!())?
                .into_iter()
                .collect(),
            promoters: db
                .execute(Select(By::<Vec<Promoter>, _>::new(())))
                .await
                .map_err(tracerr::wrap!())?
                .into_iter()
                .collect(),
            venues: db
                .execute(Select(By::<Vec<Venue>, _>::new(())))
                .await
                .map_err(tracerr::wrap!())?
                .into_iter()
                .collect(),
            bookings: db
                .execute(Select(By::<Vec<Booking>, _>::new(())))
                .await
                .map_err(tracerr::wrap!())?
                .into_iter()
                .collect(),
            invoices: db
                .execute(Select(By::<Vec<Invoice>, _>::new(())))
                .await
                .map_err(tracerr::wrap!())?
                .into_iter()
                .collect(),
        };
        log::debug!(
            "`Store` refreshed with {} `Booking`s and {} `Invoice`s",
            snapshot.bookings.len(),
            snapshot.invoices.len(),
        );

        self.store().replace(snapshot).await;
        Ok(())
    }
}

/// Error of [`RefreshStore`] [`Command`] execution.
pub type ExecutionError = database::Error;
