//! [`Query`] collection related to a [`Collection`].

use std::convert::Infallible;

use crate::{
    domain::{
        catalog::{Entry, Snapshot},
        Collection,
    },
    Service,
};

use super::Query;

/// Resolves a [`Collection`] into an ordered list of active catalog
/// [`Entry`]s.
#[derive(Clone, Copy, Debug)]
pub struct ResolveItems<'a> {
    /// [`Collection`] to resolve.
    pub collection: &'a Collection,

    /// [`Snapshot`] of the catalog to resolve the [`Collection`] against.
    pub snapshot: &'a Snapshot,
}

impl Query<ResolveItems<'_>> for Service {
    type Ok = Vec<Entry>;
    type Err = Infallible;

    #[tracing::instrument(
        skip_all,
        fields(
            collection = %query.collection.id,
            mode = %query.collection.mode,
        ),
    )]
    async fn execute(
        &self,
        query: ResolveItems<'_>,
    ) -> Result<Self::Ok, Self::Err> {
        let ResolveItems {
            collection,
            snapshot,
        } = query;

        Ok(collection.resolve(snapshot))
    }
}
