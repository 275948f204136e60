//! [`Itinerary`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{booking, itinerary, Itinerary},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Itinerary>, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Itinerary>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Itinerary>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let booking_id: booking::Id = by.into_inner();

        const SQL: &str = "\
            SELECT booking_id, date, notes, attached_at \
            FROM itineraries \
            WHERE booking_id = $1::UUID";
        let Some(row) = self
            .query_opt(SQL, &[&booking_id])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        const ITEMS_SQL: &str = "\
            SELECT time, kind, description, location \
            FROM itinerary_items \
            WHERE booking_id = $1::UUID \
            ORDER BY position";
        let items = self
            .query(ITEMS_SQL, &[&booking_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| itinerary::Item {
                time: row.get("time"),
                kind: row.get("kind"),
                description: row.get("description"),
                location: row.get("location"),
            })
            .collect();

        Ok(Some(Itinerary {
            booking_id: row.get("booking_id"),
            date: row.get("date"),
            items: itinerary::Items::new(items)
                .expect("`Itinerary` is never stored without items"),
            notes: row.get("notes"),
            attached_at: row.get("attached_at"),
        }))
    }
}

impl<C> Database<Insert<Itinerary>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    /// Inserts the provided [`Itinerary`], replacing the existing one of the
    /// same [`Booking`].
    ///
    /// [`Booking`]: crate::domain::Booking
    async fn execute(
        &self,
        Insert(itinerary): Insert<Itinerary>,
    ) -> Result<Self::Ok, Self::Err> {
        let Itinerary {
            booking_id,
            date,
            items,
            notes,
            attached_at,
        } = itinerary;

        const SQL: &str = "\
            INSERT INTO itineraries (\
                booking_id, date, notes, attached_at\
            ) VALUES (\
                $1::UUID, $2::DATE, $3::VARCHAR, $4::TIMESTAMPTZ\
            ) \
            ON CONFLICT (booking_id) DO UPDATE \
            SET date = EXCLUDED.date, \
                notes = EXCLUDED.notes, \
                attached_at = EXCLUDED.attached_at";
        _ = self
            .exec(SQL, &[&booking_id, &date, &notes, &attached_at])
            .await
            .map_err(tracerr::wrap!())?;

        const CLEAR_SQL: &str = "\
            DELETE FROM itinerary_items \
            WHERE booking_id = $1::UUID";
        _ = self
            .exec(CLEAR_SQL, &[&booking_id])
            .await
            .map_err(tracerr::wrap!())?;

        const ITEM_SQL: &str = "\
            INSERT INTO itinerary_items (\
                booking_id, position, time, kind, description, location\
            ) VALUES (\
                $1::UUID, $2::INT4, $3::TIME, $4::INT2, \
                $5::VARCHAR, $6::VARCHAR\
            )";
        for (position, item) in (0_i32..).zip(items.into_inner()) {
            let itinerary::Item {
                time,
                kind,
                description,
                location,
            } = item;
            _ = self
                .exec(
                    ITEM_SQL,
                    &[
                        &booking_id,
                        &position,
                        &time,
                        &kind,
                        &description,
                        &location,
                    ],
                )
                .await
                .map_err(tracerr::wrap!())?;
        }
        Ok(())
    }
}
