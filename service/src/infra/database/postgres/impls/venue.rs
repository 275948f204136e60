//! [`Venue`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{venue, Venue},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Reads a [`Venue`] out of the provided [`Row`].
fn from_row(row: &Row) -> Venue {
    Venue {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        capacity: u32::try_from(row.get::<_, i32>("capacity"))
            .ok()
            .and_then(venue::Capacity::new)
            .expect("`capacity` is checked by database constraint"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Venue>, venue::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Venue>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Venue>, venue::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: venue::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, city, state, capacity, created_at \
            FROM venues \
            WHERE id = $1::UUID";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Venue>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Venue>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Venue>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, city, state, capacity, created_at \
            FROM venues \
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

impl<C> Database<Insert<Venue>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Venue>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(venue): Insert<Venue>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(venue)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Venue>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(venue): Update<Venue>,
    ) -> Result<Self::Ok, Self::Err> {
        let Venue {
            id,
            name,
            city,
            state,
            capacity,
            created_at,
        } = venue;

        let capacity = i32::try_from(u32::from(capacity))
            .expect("`Capacity::MAX` fits into `INT4`");

        const SQL: &str = "\
            INSERT INTO venues (\
                id, name, city, state, capacity, created_at\
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::INT4, $6::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                city = EXCLUDED.city, \
                state = EXCLUDED.state, \
                capacity = EXCLUDED.capacity";
        self.exec(SQL, &[&id, &name, &city, &state, &capacity, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
