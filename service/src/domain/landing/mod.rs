//! [`LandingConfig`] definitions.

mod auto;
pub mod catalog;
#[cfg(test)]
mod fixture;
mod format;
mod normalize;
mod plans;
pub mod stored;

use std::hash::Hash as _;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use xxhash_rust::xxh3;

#[cfg(doc)]
use crate::domain::catalog::Complex;

pub use self::{
    catalog::{Catalog, FeaturePreset},
    stored::{LandingDraft, Stored},
};

/// Maximum number of [`Fact`]s in a [`LandingConfig`].
pub const MAX_FACTS: usize = 12;

/// Maximum number of [`FeatureItem`]s in a [`LandingConfig`].
pub const MAX_FEATURES: usize = 20;

/// Maximum number of [`FeatureItem`]s derived automatically.
pub const MAX_AUTO_FEATURES: usize = 12;

/// Maximum number of preview images of a [`FloorPlanBucket`].
pub const MAX_PLAN_PREVIEWS: usize = 12;

/// Content of a [`Complex`] landing page.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LandingConfig {
    /// Accent color of the page.
    pub accent_color: String,

    /// Surface (background) color of the page.
    pub surface_color: String,

    /// Hero image URL.
    pub hero_image: Option<String>,

    /// Label of the main call-to-action button.
    pub cta_label: Option<String>,

    /// Label of the floor-plan preview photo link.
    pub preview_photo_label: Option<String>,

    /// [`Tag`]s shown above the title.
    pub tags: Vec<Tag>,

    /// Highlight [`Fact`]s.
    pub facts: Vec<Fact>,

    /// Feature ticker items.
    pub features: Vec<FeatureItem>,

    /// Floor-plan summary.
    pub plans: PlansBlock,
}

/// Short label shown above a landing title.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tag {
    /// ID of this [`Tag`].
    pub id: String,

    /// Text of this [`Tag`].
    pub label: String,
}

/// Highlight fact card.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Fact {
    /// ID of this [`Fact`].
    pub id: String,

    /// Title of this [`Fact`].
    pub title: String,

    /// Value of this [`Fact`].
    pub value: String,

    /// Optional subtitle of this [`Fact`].
    pub subtitle: Option<String>,

    /// Background image URL of this [`Fact`].
    pub image: Option<String>,
}

/// Item of a feature ticker.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FeatureItem {
    /// ID of this [`FeatureItem`].
    pub id: String,

    /// Title of this [`FeatureItem`].
    pub title: String,

    /// Image URL of this [`FeatureItem`].
    pub image: Option<String>,

    /// Key of the [`FeaturePreset`] this [`FeatureItem`] is based on.
    pub preset: Option<String>,
}

/// Floor-plan summary block.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlansBlock {
    /// Title of this block.
    pub title: String,

    /// Description of this block.
    pub description: String,

    /// Label of the call-to-action button of this block.
    pub cta_label: String,

    /// [`FloorPlanBucket`]s, ascending by bedroom count.
    pub items: Vec<FloorPlanBucket>,
}

/// Aggregated summary of the active listings sharing a bedroom count.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FloorPlanBucket {
    /// ID of this [`FloorPlanBucket`].
    pub id: String,

    /// Display name of this [`FloorPlanBucket`].
    pub name: String,

    /// Formatted minimal price.
    pub price: String,

    /// Formatted minimal area.
    pub area: String,

    /// Number of listings summarized by this [`FloorPlanBucket`].
    pub variants: usize,

    /// Bedroom count of this [`FloorPlanBucket`] (`0` for studios).
    pub bedrooms: u8,

    /// Optional note.
    pub note: Option<String>,

    /// Representative preview image URL.
    pub preview: Option<String>,

    /// Preview image candidates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previews: Vec<String>,
}

/// Generates a content-derived ID for a landing item lacking one.
///
/// The same `prefix`, `position` and `text` always produce the same ID, so
/// normalizing an already normalized config keeps its IDs intact.
#[must_use]
pub fn derive_id(prefix: &str, position: usize, text: &str) -> String {
    // WARNING: Avoid changing the order of the fields in the hasher, because
    //          it will change IDs of the items stored without them.
    let mut hasher = xxh3::Xxh3Builder::new().build();
    prefix.hash(&mut hasher);
    u64::try_from(position).unwrap_or(u64::MAX).hash(&mut hasher);
    text.hash(&mut hasher);

    format!("{prefix}-{}", Uuid::from_u128(hasher.digest128()))
}

#[cfg(test)]
mod spec {
    use super::derive_id;

    #[test]
    fn derived_ids_are_stable() {
        assert_eq!(derive_id("tag", 0, "Бизнес"), derive_id("tag", 0, "Бизнес"));
        assert!(derive_id("tag", 0, "Бизнес").starts_with("tag-"));
    }

    #[test]
    fn derived_ids_depend_on_every_part() {
        let id = derive_id("fact", 1, "Класс");

        assert_ne!(id, derive_id("fact", 2, "Класс"));
        assert_ne!(id, derive_id("fact", 1, "Цена"));
        assert_ne!(id, derive_id("tag", 1, "Класс"));
    }
}
