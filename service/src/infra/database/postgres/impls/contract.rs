//! [`Contract`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select},
    Money,
};
use tracerr::Traced;

use crate::{
    domain::{booking, contract, Contract},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Contract>, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Contract>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let booking_id: booking::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, booking_id, \
                   deposit, deposit_currency, deposit_due_date, \
                   special_terms, document_url, created_at \
            FROM contracts \
            WHERE booking_id = $1::UUID";
        let Some(row) = self
            .query_opt(SQL, &[&booking_id])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let deposit = row.get::<_, Option<_>>("deposit").map(|amount| {
            let money = Money {
                amount,
                currency: row.get("deposit_currency"),
            };
            #[expect(unsafe_code, reason = "checked by database constraint")]
            let deposit = unsafe { contract::Deposit::new_unchecked(money) };
            deposit
        });
        Ok(Some(Contract {
            id: row.get("id"),
            booking_id: row.get("booking_id"),
            deposit,
            deposit_due_date: row.get("deposit_due_date"),
            special_terms: row.get("special_terms"),
            document_url: row.get("document_url"),
            created_at: row.get("created_at"),
        }))
    }
}

impl<C> Database<Insert<Contract>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(contract): Insert<Contract>,
    ) -> Result<Self::Ok, Self::Err> {
        let Contract {
            id,
            booking_id,
            deposit,
            deposit_due_date,
            special_terms,
            document_url,
            created_at,
        } = contract;
        let deposit = deposit.map(contract::Deposit::money);
        let deposit_currency = deposit.map(|m| m.currency);
        let deposit = deposit.map(|m| m.amount);

        // Second `Contract` of the same `Booking` violates the
        // `contracts_booking_id_key` constraint.
        const SQL: &str = "\
            INSERT INTO contracts (\
                id, booking_id, \
                deposit, deposit_currency, deposit_due_date, \
                special_terms, document_url, created_at\
            ) VALUES (\
                $1::UUID, $2::UUID, \
                $3::DECIMAL, $4::INT2, $5::DATE, \
                $6::VARCHAR, $7::VARCHAR, $8::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &booking_id,
                &deposit,
                &deposit_currency,
                &deposit_due_date,
                &special_terms,
                &document_url,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
