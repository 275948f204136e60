//! Postgres [`Database`] implementation.

pub mod client;
mod impls;

use deadpool_postgres::Runtime;
use derive_more::{Deref, Display, Error as StdError, From};
use tokio_postgres::NoTls;
use tracerr::Traced;

use crate::infra::database;
#[cfg(doc)]
use crate::infra::Database;

pub use refinery::embed_migrations;

pub use deadpool_postgres::{Config, PoolConfig};

pub use self::client::{Connection, NonTx, Tx};

/// Postgres [`Database`] client.
#[derive(Clone, Copy, Debug, Deref)]
pub struct Postgres<T = NonTx>(T);

impl Postgres {
    /// Creates a new [`Postgres`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to create a new [`Postgres`] client.
    pub fn new(conf: &Config) -> Result<Self, Traced<database::Error>> {
        let pool = conf
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self(NonTx::new(pool)))
    }
}

/// Postgres database [`Error`].
#[derive(Debug, Display, StdError, From)]
pub enum Error {
    /// Error of running a statement.
    #[display("Statement failed: {_0}")]
    Statement(tokio_postgres::Error),

    /// Error of creating a new [`deadpool_postgres::Pool`].
    #[display("Failed to create connection pool: {_0}")]
    PoolCreation(deadpool_postgres::CreatePoolError),

    /// Error of checking out a connection of a [`deadpool_postgres::Pool`].
    #[display("Failed to check out pooled connection: {_0}")]
    Pool(deadpool_postgres::PoolError),
}
