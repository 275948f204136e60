//! [`Booking`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Lock, Select, Update},
    Money,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{booking, Booking},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of the `bookings` table.
const COLUMNS: &str = "\
    id, artist_id, promoter_id, venue_id, date, \
    fee, fee_currency, \
    status, has_contract, has_invoice, has_itinerary, \
    created_at";

/// Reads a [`Booking`] out of the provided [`Row`].
fn from_row(row: &Row) -> Booking {
    let fee = Money {
        amount: row.get("fee"),
        currency: row.get("fee_currency"),
    };
    #[expect(unsafe_code, reason = "checked by database constraint")]
    let fee = unsafe { booking::Fee::new_unchecked(fee) };

    Booking {
        id: row.get("id"),
        artist_id: row.get("artist_id"),
        promoter_id: row.get("promoter_id"),
        venue_id: row.get("venue_id"),
        date: row.get("date"),
        fee,
        status: row.get("status"),
        documents: booking::Documents {
            has_contract: row.get("has_contract"),
            has_invoice: row.get("has_invoice"),
            has_itinerary: row.get("has_itinerary"),
        },
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Booking>, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: booking::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM bookings \
             WHERE id = $1::UUID",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Booking>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Booking>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!(
            "SELECT {COLUMNS} \
             FROM bookings \
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

impl<C> Database<Insert<Booking>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Booking>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(booking)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Booking>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(booking): Update<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        let Booking {
            id,
            artist_id,
            promoter_id,
            venue_id,
            date,
            fee,
            status,
            documents:
                booking::Documents {
                    has_contract,
                    has_invoice,
                    has_itinerary,
                },
            created_at,
        } = booking;
        let Money {
            amount: fee,
            currency: fee_currency,
        } = fee.money();

        const SQL: &str = "\
            INSERT INTO bookings (\
                id, artist_id, promoter_id, venue_id, date, \
                fee, fee_currency, \
                status, has_contract, has_invoice, has_itinerary, \
                created_at\
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::UUID, $5::DATE, \
                $6::DECIMAL, $7::INT2, \
                $8::INT2, $9::BOOL, $10::BOOL, $11::BOOL, \
                $12::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET date = EXCLUDED.date, \
                fee = EXCLUDED.fee, \
                fee_currency = EXCLUDED.fee_currency, \
                status = EXCLUDED.status, \
                has_contract = EXCLUDED.has_contract, \
                has_invoice = EXCLUDED.has_invoice, \
                has_itinerary = EXCLUDED.has_itinerary";
        self.exec(
            SQL,
            &[
                &id,
                &artist_id,
                &promoter_id,
                &venue_id,
                &date,
                &fee,
                &fee_currency,
                &status,
                &has_contract,
                &has_invoice,
                &has_itinerary,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

/// Locks the `bookings_lock` row of an ID until the end of the transaction.
///
/// The row is updated even when it exists already, so the lock is taken
/// whether or not an earlier transaction has committed it.
pub(super) const LOCK_BOOKINGS: &str = "\
    INSERT INTO bookings_lock \
    VALUES ($1::UUID) \
    ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id";

impl<C> Database<Lock<By<Booking, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Booking, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: booking::Id = by.into_inner();

        self.query(LOCK_BOOKINGS, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
