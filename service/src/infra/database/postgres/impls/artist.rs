//! [`Artist`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{artist, Artist},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of the `artists` table.
const COLUMNS: &str = "id, name, email, phone, genre, bio, image_url, created_at";

/// Reads an [`Artist`] out of the provided [`Row`].
fn from_row(row: &Row) -> Artist {
    Artist {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        genre: row.get("genre"),
        bio: row.get("bio"),
        image_url: row.get("image_url"),
        created_at: row.get("created_at"),
    }
}

impl<C, IDs> Database<Select<By<HashMap<artist::Id, Artist>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[artist::Id]>,
{
    type Ok = HashMap<artist::Id, Artist>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<artist::Id, Artist>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[artist::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM artists \
             WHERE id = ANY($1::UUID[])",
        );
        Ok(self
            .query(&sql, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .map(|a| (a.id, a))
            .collect())
    }
}

impl<C> Database<Select<By<Option<Artist>, artist::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<artist::Id, Artist>, [artist::Id; 1]>>,
        Ok = HashMap<artist::Id, Artist>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Artist>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Artist>, artist::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Select<By<Vec<Artist>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Artist>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Artist>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!(
            "SELECT {COLUMNS} \
             FROM artists \
             ORDER BY created_at, id",
        );
        Ok(self
            .query(&sql, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Artist>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Artist>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(artist): Insert<Artist>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(artist)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Artist>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(artist): Update<Artist>,
    ) -> Result<Self::Ok, Self::Err> {
        let Artist {
            id,
            name,
            email,
            phone,
            genre,
            bio,
            image_url,
            created_at,
        } = artist;

        const SQL: &str = "\
            INSERT INTO artists (\
                id, name, email, phone, genre, bio, image_url, created_at\
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, \
                $8::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                email = EXCLUDED.email, \
                phone = EXCLUDED.phone, \
                genre = EXCLUDED.genre, \
                bio = EXCLUDED.bio, \
                image_url = EXCLUDED.image_url";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &email,
                &phone,
                &genre,
                &bio,
                &image_url,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
