//! Postgres database clients.

use std::{fmt, future::Future, sync::Arc};

use deadpool_postgres::{Object, Pool};
use futures::{FutureExt as _, TryFutureExt as _};
use ouroboros::self_referencing;
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{self, postgres};

/// Postgres client able to run SQL statements.
pub trait Connection {
    /// Runs the provided query statement and returns all the resulting rows.
    ///
    /// # Errors
    ///
    /// If failed to run the statement.
    fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<Vec<Row>, Traced<database::Error>>>
    where
        T: ToStatement + ?Sized;

    /// Runs the provided query statement and returns at most one resulting
    /// row.
    ///
    /// # Errors
    ///
    /// If failed to run the statement, or it returned more than one row.
    fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<Option<Row>, Traced<database::Error>>>
    where
        T: ToStatement + ?Sized;

    /// Runs the provided statement and returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// If failed to run the statement.
    fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<u64, Traced<database::Error>>>
    where
        T: ToStatement + ?Sized;
}

/// Non-transactional Postgres client.
///
/// Checks out a pooled connection for every statement, so the statements are
/// auto-committed one by one.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`Pool`] to check the connections out of.
    pool: Pool,
}

impl NonTx {
    /// Creates a new [`NonTx`] client over the provided [`Pool`].
    #[must_use]
    pub(crate) fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Checks out a connection of this [`NonTx`] client's [`Pool`].
    ///
    /// # Errors
    ///
    /// If the [`Pool`] failed to provide a connection.
    pub(crate) async fn checkout(
        &self,
    ) -> Result<Object, Traced<database::Error>> {
        self.pool
            .get()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl Connection for NonTx {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let client = self.checkout().await.map_err(tracerr::wrap!())?;
        client
            .query(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let client = self.checkout().await.map_err(tracerr::wrap!())?;
        client
            .query_opt(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let client = self.checkout().await.map_err(tracerr::wrap!())?;
        client
            .execute(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

/// Transactional Postgres client.
///
/// The transaction is begun lazily, on the first statement, and is rolled
/// back if this [`Tx`] is dropped without being committed. Its statements are
/// run one at a time.
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`NonTx`] client to check the transaction connection out of.
    origin: NonTx,

    /// Transaction begun by this [`Tx`] client, if any.
    active: Arc<Mutex<Option<Transaction>>>,
}

impl Tx {
    /// Creates a new [`Tx`] client, beginning its transaction over a
    /// connection of the provided [`NonTx`] client.
    #[must_use]
    pub(crate) fn new(origin: NonTx) -> Self {
        Self {
            origin,
            active: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the [`Transaction`] of this [`Tx`] client, beginning it if it
    /// hasn't been yet.
    async fn transaction(
        &self,
    ) -> Result<MappedMutexGuard<'_, Transaction>, Traced<database::Error>>
    {
        let mut active = self.active.lock().await;
        let tx = if let Some(tx) = active.take() {
            tx
        } else {
            let client =
                self.origin.checkout().await.map_err(tracerr::wrap!())?;
            Transaction::begin(client).await.map_err(tracerr::wrap!())?
        };
        Ok(MutexGuard::map(active, |slot| slot.insert(tx)))
    }

    /// Commits the transaction of this [`Tx`] client, if it was begun.
    ///
    /// Following statements will run in a new transaction.
    ///
    /// # Errors
    ///
    /// If failed to commit the transaction.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let active = self.active.lock().await.take();
        match active {
            Some(tx) => tx.commit().await.map_err(tracerr::wrap!()),
            None => Ok(()),
        }
    }
}

impl Connection for Tx {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let tx = self.transaction().await.map_err(tracerr::wrap!())?;
        tx.get()
            .query(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let tx = self.transaction().await.map_err(tracerr::wrap!())?;
        tx.get()
            .query_opt(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let tx = self.transaction().await.map_err(tracerr::wrap!())?;
        tx.get()
            .execute(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

/// Transaction begun over a pooled connection, owning that connection.
#[self_referencing]
struct Transaction {
    /// Pooled connection the transaction is begun over.
    client: Object,

    /// Begun transaction, taken out once committed.
    #[borrows(mut client)]
    #[not_covariant]
    inner: Option<deadpool_postgres::Transaction<'this>>,
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction").finish_non_exhaustive()
    }
}

impl Transaction {
    /// Begins a new [`Transaction`] over the provided pooled connection.
    async fn begin(client: Object) -> Result<Self, Traced<database::Error>> {
        Self::try_new_async_send(client, |c| {
            c.transaction().map_ok(Some).boxed()
        })
        .await
        .map_err(tracerr::from_and_wrap!(=> postgres::Error))
        .map_err(tracerr::map_from)
    }

    /// Returns the begun [`deadpool_postgres::Transaction`].
    fn get(&self) -> &deadpool_postgres::Transaction<'_> {
        self.with_inner(|tx| tx.as_ref().expect("committed by value only"))
    }

    /// Commits this [`Transaction`].
    async fn commit(mut self) -> Result<(), Traced<database::Error>> {
        #[expect(
            clippy::redundant_closure_for_method_calls,
            reason = "`Option::take` doesn't fit the invariant lifetime"
        )]
        let tx = self.with_inner_mut(|tx| tx.take());
        let Some(tx) = tx else {
            return Ok(());
        };
        tx.commit()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}
