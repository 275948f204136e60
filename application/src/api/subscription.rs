//! GraphQL [`Subscription`]s definitions.

use futures::{
    future,
    stream::{self, BoxStream},
    StreamExt as _,
};
use juniper::graphql_subscription;
use service::{domain, query, store::Change, Query as _};
use tokio::sync::broadcast::error::RecvError;

use crate::{api, AsError, Context, Error, Service};

/// Root of all GraphQL subscription.
#[derive(Clone, Copy, Debug)]
pub struct Subscription;

#[graphql_subscription(context = Context)]
impl Subscription {
    /// Subscription to the `Booking` changes.
    ///
    /// Emits the changed `Booking` each time it's saved. Only the `Booking`
    /// with the specified ID is watched, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "bookingChanged",
            id = ?id.map(|id| id.to_string()),
            otel.name = "GraphQL subscription",
        ),
    )]
    pub async fn booking_changed(
        &self,
        id: Option<api::booking::Id>,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<api::Booking, Error>>, Error> {
        let service = ctx.service().clone();
        let watched = id.map(domain::booking::Id::from);

        let changes = service.store().subscribe();
        Ok(stream::unfold(changes, |mut changes| async move {
            loop {
                match changes.recv().await {
                    Ok(Change::Booking(id)) => return Some((id, changes)),
                    Ok(_) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => return None,
                }
            }
        })
        .filter(move |id| future::ready(watched.map_or(true, |w| w == *id)))
        .filter_map(move |id| load(service.clone(), id))
        .boxed())
    }
}

/// Loads the [`domain::Booking`] with the provided ID from the
/// [`service::Store`], skipping it if it's gone.
async fn load(
    service: Service,
    id: domain::booking::Id,
) -> Option<Result<api::Booking, Error>> {
    service
        .execute(query::booking::ById::by(id))
        .await
        .map_err(AsError::into_error)
        .map(|b| b.map(Into::into))
        .transpose()
}
