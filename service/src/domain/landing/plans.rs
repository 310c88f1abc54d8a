//! [`FloorPlanBucket`]s derivation.

use common::text;
use itertools::Itertools as _;

use crate::domain::catalog::{Complex, Listing, Record as _};

use super::{format, Catalog, FloorPlanBucket, MAX_PLAN_PREVIEWS};

/// Bedroom counts of the placeholder [`FloorPlanBucket`]s.
const PLACEHOLDER_BEDROOMS: [u8; 4] = [0, 1, 2, 3];

/// Note of a placeholder [`FloorPlanBucket`].
const PLACEHOLDER_NOTE: &str = "Уточняйте наличие у менеджера";

impl Catalog {
    /// Derives [`FloorPlanBucket`]s of the active [`Listing`]s, ascending by
    /// bedroom count.
    ///
    /// Placeholder [`FloorPlanBucket`]s based on the [`Complex`] are returned
    /// if there are no active [`Listing`]s at all.
    pub(super) fn floor_plans(
        &self,
        complex: &Complex,
        listings: &[Listing],
    ) -> Vec<FloorPlanBucket> {
        let active = listings.iter().filter(|l| l.is_active()).collect_vec();
        if active.is_empty() {
            return PLACEHOLDER_BEDROOMS
                .into_iter()
                .map(|bedrooms| placeholder(complex, bedrooms))
                .collect();
        }

        active
            .into_iter()
            .filter_map(|l| Some((l.bedroom_count()?, l)))
            .into_group_map()
            .into_iter()
            .sorted_by_key(|(bedrooms, _)| *bedrooms)
            .map(|(bedrooms, group)| self.bucket(bedrooms, &group))
            .collect()
    }

    /// Summarizes the provided [`Listing`]s having the same `bedrooms`
    /// count.
    fn bucket(&self, bedrooms: u8, group: &[&Listing]) -> FloorPlanBucket {
        let price = group
            .iter()
            .filter_map(|l| l.positive_price())
            .reduce(f64::min);
        let area = group
            .iter()
            .filter_map(|l| l.positive_area())
            .reduce(f64::min);

        let (plans, photos): (Vec<_>, Vec<_>) = group
            .iter()
            .flat_map(|l| l.image_urls())
            .partition(|url| self.plan_image.is_match(url));
        let previews =
            text::dedup_and_cap(plans.into_iter().chain(photos), MAX_PLAN_PREVIEWS);

        FloorPlanBucket {
            id: format!("plan-{bedrooms}"),
            name: bucket_name(bedrooms),
            price: price.map_or_else(
                || format::PRICE_ON_REQUEST.to_owned(),
                format::price_from,
            ),
            area: area
                .map_or_else(|| format::ON_REQUEST.to_owned(), format::area_from),
            variants: group.len(),
            bedrooms,
            note: None,
            preview: previews.first().cloned(),
            previews,
        }
    }
}

/// Creates a placeholder [`FloorPlanBucket`] based on the provided
/// [`Complex`].
fn placeholder(complex: &Complex, bedrooms: u8) -> FloorPlanBucket {
    FloorPlanBucket {
        id: format!("plan-placeholder-{bedrooms}"),
        name: bucket_name(bedrooms),
        price: complex.positive_price_from().map_or_else(
            || format::PRICE_ON_REQUEST.to_owned(),
            format::price_from,
        ),
        area: complex
            .positive_area_from()
            .map_or_else(|| format::ON_REQUEST.to_owned(), format::area_from),
        variants: 0,
        bedrooms,
        note: Some(PLACEHOLDER_NOTE.to_owned()),
        preview: None,
        previews: vec![],
    }
}

/// Returns the display name of a [`FloorPlanBucket`] with the provided
/// bedroom count.
fn bucket_name(bedrooms: u8) -> String {
    match bedrooms {
        0 => "Студии".to_owned(),
        n => format!("{n}-комнатные"),
    }
}
