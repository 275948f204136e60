//! [`Command`] for creating a new [`Venue`].

use common::operations::Insert;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{venue, Venue},
    infra::{database, Database},
    store::Record,
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Venue`].
#[derive(Clone, Debug)]
pub struct CreateVenue {
    /// [`venue::Name`] of a new [`Venue`].
    pub name: venue::Name,

    /// [`venue::City`] of a new [`Venue`].
    pub city: venue::City,

    /// [`venue::State`] of a new [`Venue`], if any.
    pub state: Option<venue::State>,

    /// [`venue::Capacity`] of a new [`Venue`].
    pub capacity: venue::Capacity,
}

impl<Db> Command<CreateVenue> for Service<Db>
where
    Db: Database<Insert<Venue>, Err = Traced<database::Error>>,
{
    type Ok = Venue;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateVenue) -> Result<Self::Ok, Self::Err> {
        let CreateVenue {
            name,
            city,
            state,
            capacity,
        } = cmd;

        let venue = Venue {
            id: venue::Id::new(),
            name,
            city,
            state,
            capacity,
            created_at: venue::CreationDateTime::now(),
        };

        self.database()
            .execute(Insert(venue.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.store().save([Record::from(venue.clone())]).await;
        log::info!("`Venue(id: {})` created", venue.id);

        Ok(venue)
    }
}

/// Error of [`CreateVenue`] [`Command`] execution.
pub type ExecutionError = database::Error;
