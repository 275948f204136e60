//! [`Command`] for creating a new [`Artist`].

use common::operations::Insert;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{artist, contact, Artist},
    infra::{database, Database},
    store::Record,
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Artist`].
#[derive(Clone, Debug)]
pub struct CreateArtist {
    /// [`artist::Name`] of a new [`Artist`].
    pub name: artist::Name,

    /// [`contact::Email`] of a new [`Artist`].
    pub email: contact::Email,

    /// [`contact::Phone`] of a new [`Artist`].
    pub phone: contact::Phone,

    /// [`artist::Genre`] of a new [`Artist`].
    pub genre: artist::Genre,

    /// [`artist::Bio`] of a new [`Artist`].
    pub bio: artist::Bio,

    /// [`artist::ImageUrl`] of a new [`Artist`], if any.
    pub image_url: Option<artist::ImageUrl>,
}

impl<Db> Command<CreateArtist> for Service<Db>
where
    Db: Database<Insert<Artist>, Err = Traced<database::Error>>,
{
    type Ok = Artist;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateArtist) -> Result<Self::Ok, Self::Err> {
        let CreateArtist {
            name,
            email,
            phone,
            genre,
            bio,
            image_url,
        } = cmd;

        let artist = Artist {
            id: artist::Id::new(),
            name,
            email,
            phone,
            genre,
            bio,
            image_url,
            created_at: artist::CreationDateTime::now(),
        };

        self.database()
            .execute(Insert(artist.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.store().save([Record::from(artist.clone())]).await;
        log::info!("`Artist(id: {})` created", artist.id);

        Ok(artist)
    }
}

/// Error of [`CreateArtist`] [`Command`] execution.
pub type ExecutionError = database::Error;
