//! [`Query`] collection related to a [`LandingConfig`].

use std::convert::Infallible;

use crate::{
    domain::{
        catalog::{Complex, Listing},
        landing::{stored::FeatureDraft, Stored},
        LandingConfig,
    },
    Service,
};
#[cfg(doc)]
use crate::domain::landing::FeaturePreset;

use super::Query;

/// Derives a [`LandingConfig`] of a [`Complex`] from its feed data only.
#[derive(Clone, Copy, Debug)]
pub struct BuildAuto<'a> {
    /// [`Complex`] to derive the [`LandingConfig`] of.
    pub complex: &'a Complex,

    /// [`Listing`]s of the [`Complex`].
    pub listings: &'a [Listing],
}

impl Query<BuildAuto<'_>> for Service {
    type Ok = LandingConfig;
    type Err = Infallible;

    #[tracing::instrument(
        skip_all,
        fields(
            complex = %query.complex.id,
            listings = query.listings.len(),
        ),
    )]
    async fn execute(
        &self,
        query: BuildAuto<'_>,
    ) -> Result<Self::Ok, Self::Err> {
        let BuildAuto { complex, listings } = query;

        Ok(self.config().landing.build_auto(complex, listings))
    }
}

/// Normalizes a [`Stored`] (possibly legacy or absent) landing configuration
/// of a [`Complex`] into a canonical [`LandingConfig`].
#[derive(Clone, Copy, Debug)]
pub struct Normalize<'a> {
    /// [`Stored`] landing configuration, if any.
    pub stored: Option<&'a Stored>,

    /// [`Complex`] the landing configuration belongs to.
    pub complex: &'a Complex,

    /// [`Listing`]s of the [`Complex`].
    pub listings: &'a [Listing],
}

impl Query<Normalize<'_>> for Service {
    type Ok = LandingConfig;
    type Err = Infallible;

    #[tracing::instrument(
        skip_all,
        fields(
            complex = %query.complex.id,
            legacy = matches!(query.stored, Some(Stored::Legacy(_))),
            listings = query.listings.len(),
            stored = query.stored.is_some(),
        ),
    )]
    async fn execute(
        &self,
        query: Normalize<'_>,
    ) -> Result<Self::Ok, Self::Err> {
        let Normalize {
            stored,
            complex,
            listings,
        } = query;

        Ok(self.config().landing.normalize(stored, complex, listings))
    }
}

/// Infers the [`FeaturePreset`] key of a stored feature ticker item.
#[derive(Clone, Copy, Debug)]
pub struct InferPresetKey<'a>(pub &'a FeatureDraft);

impl Query<InferPresetKey<'_>> for Service {
    type Ok = Option<String>;
    type Err = Infallible;

    async fn execute(
        &self,
        InferPresetKey(feature): InferPresetKey<'_>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.config().landing.infer_preset_key(feature))
    }
}
