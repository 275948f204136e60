//! [`Promoter`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{promoter, Promoter},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Reads a [`Promoter`] out of the provided [`Row`].
fn from_row(row: &Row) -> Promoter {
    Promoter {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        company: row.get("company"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Promoter>, promoter::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Promoter>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Promoter>, promoter::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: promoter::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, email, phone, company, created_at \
            FROM promoters \
            WHERE id = $1::UUID";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Promoter>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Promoter>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Promoter>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, email, phone, company, created_at \
            FROM promoters \
            ORDER BY created_at, id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Promoter>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Promoter>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(promoter): Insert<Promoter>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(promoter)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Promoter>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(promoter): Update<Promoter>,
    ) -> Result<Self::Ok, Self::Err> {
        let Promoter {
            id,
            name,
            email,
            phone,
            company,
            created_at,
        } = promoter;

        const SQL: &str = "\
            INSERT INTO promoters (\
                id, name, email, phone, company, created_at\
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                email = EXCLUDED.email, \
                phone = EXCLUDED.phone, \
                company = EXCLUDED.company";
        self.exec(SQL, &[&id, &name, &email, &phone, &company, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
