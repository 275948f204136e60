//! [`Command`] for creating a new [`Promoter`].

use common::operations::Insert;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{contact, promoter, Promoter},
    infra::{database, Database},
    store::Record,
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Promoter`].
#[derive(Clone, Debug)]
pub struct CreatePromoter {
    /// [`promoter::Name`] of a new [`Promoter`].
    pub name: promoter::Name,

    /// [`contact::Email`] of a new [`Promoter`].
    pub email: contact::Email,

    /// [`contact::Phone`] of a new [`Promoter`].
    pub phone: contact::Phone,

    /// [`promoter::Company`] a new [`Promoter`] represents.
    pub company: promoter::Company,
}

impl<Db> Command<CreatePromoter> for Service<Db>
where
    Db: Database<Insert<Promoter>, Err = Traced<database::Error>>,
{
    type Ok = Promoter;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreatePromoter,
    ) -> Result<Self::Ok, Self::Err> {
        let CreatePromoter {
            name,
            email,
            phone,
            company,
        } = cmd;

        let promoter = Promoter {
            id: promoter::Id::new(),
            name,
            email,
            phone,
            company,
            created_at: promoter::CreationDateTime::now(),
        };

        self.database()
            .execute(Insert(promoter.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.store().save([Record::from(promoter.clone())]).await;
        log::info!("`Promoter(id: {})` created", promoter.id);

        Ok(promoter)
    }
}

/// Error of [`CreatePromoter`] [`Command`] execution.
pub type ExecutionError = database::Error;
