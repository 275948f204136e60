//! [`Invoice`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Lock, Select, Update},
    Money,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{booking, invoice, Invoice},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of the `invoices` table.
const COLUMNS: &str = "\
    id, booking_id, amount, amount_currency, status, due_date, notes, \
    sent_at, paid_at, created_at";

/// Reads an [`Invoice`] out of the provided [`Row`].
fn from_row(row: &Row) -> Invoice {
    let amount = Money {
        amount: row.get("amount"),
        currency: row.get("amount_currency"),
    };
    #[expect(unsafe_code, reason = "checked by database constraint")]
    let amount = unsafe { invoice::Amount::new_unchecked(amount) };

    Invoice {
        id: row.get("id"),
        booking_id: row.get("booking_id"),
        amount,
        status: row.get("status"),
        due_date: row.get("due_date"),
        notes: row.get("notes"),
        sent_at: row.get("sent_at"),
        paid_at: row.get("paid_at"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Invoice>, invoice::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Invoice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Invoice>, invoice::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: invoice::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM invoices \
             WHERE id = $1::UUID",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Option<Invoice>, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Invoice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Invoice>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let booking_id: booking::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM invoices \
             WHERE booking_id = $1::UUID",
        );
        self.query_opt(&sql, &[&booking_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Invoice>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Invoice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Invoice>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!(
            "SELECT {COLUMNS} \
             FROM invoices \
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

impl<C> Database<Select<By<Vec<Invoice>, read::invoice::OverdueOn>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Invoice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Invoice>, read::invoice::OverdueOn>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::invoice::OverdueOn(today) = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM invoices \
             WHERE status = $1::INT2 \
               AND due_date < $2::DATE \
             ORDER BY created_at, id",
        );
        Ok(self
            .query(&sql, &[&invoice::Status::Sent, &today])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Invoice>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Invoice>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(invoice): Insert<Invoice>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(invoice)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Invoice>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(invoice): Update<Invoice>,
    ) -> Result<Self::Ok, Self::Err> {
        let Invoice {
            id,
            booking_id,
            amount,
            status,
            due_date,
            notes,
            sent_at,
            paid_at,
            created_at,
        } = invoice;
        let Money {
            amount,
            currency: amount_currency,
        } = amount.money();

        const SQL: &str = "\
            INSERT INTO invoices (\
                id, booking_id, amount, amount_currency, status, due_date, \
                notes, sent_at, paid_at, created_at\
            ) VALUES (\
                $1::UUID, $2::UUID, $3::DECIMAL, $4::INT2, $5::INT2, \
                $6::DATE, $7::VARCHAR, \
                $8::TIMESTAMPTZ, $9::TIMESTAMPTZ, $10::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET amount = EXCLUDED.amount, \
                amount_currency = EXCLUDED.amount_currency, \
                status = EXCLUDED.status, \
                due_date = EXCLUDED.due_date, \
                notes = EXCLUDED.notes, \
                sent_at = EXCLUDED.sent_at, \
                paid_at = EXCLUDED.paid_at";
        self.exec(
            SQL,
            &[
                &id,
                &booking_id,
                &amount,
                &amount_currency,
                &status,
                &due_date,
                &notes,
                &sent_at,
                &paid_at,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

/// Locks the `invoices_lock` row of an ID until the end of the transaction.
///
/// The row is updated even when it exists already, so the lock is taken
/// whether or not an earlier transaction has committed it.
pub(super) const LOCK_INVOICES: &str = "\
    INSERT INTO invoices_lock \
    VALUES ($1::UUID) \
    ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id";

impl<C> Database<Lock<By<Invoice, invoice::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Invoice, invoice::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: invoice::Id = by.into_inner();

        self.query(LOCK_INVOICES, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
