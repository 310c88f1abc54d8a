//! [`Collection`] definitions.

use common::{define_kind, numeric, text, Numeric};
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};
use tracing as log;

use crate::domain::catalog::{self, Entry, Kind, Record, Snapshot};

/// Editorial grouping of catalog records shown together.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Collection {
    /// ID of this [`Collection`].
    pub id: Id,

    /// [`Mode`] of this [`Collection`].
    pub mode: Mode,

    /// Hand-picked [`Pointer`]s, used in [`Mode::Manual`].
    #[serde(default)]
    pub items: Vec<Pointer>,

    /// [`AutoRules`], used in [`Mode::Auto`].
    #[serde(default)]
    pub rules: Option<AutoRules>,
}

impl Collection {
    /// Resolves this [`Collection`] into an ordered list of active catalog
    /// [`Entry`]s of the provided [`Snapshot`].
    #[must_use]
    pub fn resolve(&self, snapshot: &Snapshot) -> Vec<Entry> {
        let entries = match self.mode {
            Mode::Manual => self.resolve_manual(snapshot),
            Mode::Auto => self
                .rules
                .as_ref()
                .map(|rules| rules.select(snapshot))
                .unwrap_or_default(),
        };
        log::debug!(
            collection = %self.id,
            mode = %self.mode,
            count = entries.len(),
            "resolved `Collection`",
        );
        entries
    }

    /// Resolves [`Pointer`]s of this [`Collection`] preserving their order.
    ///
    /// Missing and non-active records are skipped.
    fn resolve_manual(&self, snapshot: &Snapshot) -> Vec<Entry> {
        self.items
            .iter()
            .filter_map(|Pointer { kind, ref_id }| {
                let entry = snapshot.find_active(*kind, ref_id);
                if entry.is_none() {
                    log::debug!(
                        collection = %self.id,
                        %kind,
                        %ref_id,
                        "skipping missing or non-active `Collection` item",
                    );
                }
                entry
            })
            .collect()
    }
}

/// ID of a [`Collection`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(forward)]
#[from(String, &str)]
pub struct Id(String);

define_kind! {
    #[doc = "Way the contents of a [`Collection`] are defined."]
    enum Mode {
        #[doc = "Hand-curated list of [`Pointer`]s."]
        Manual = 1,

        #[doc = "Declarative [`AutoRules`] evaluated on demand."]
        Auto = 2,
    }
}

/// Pointer to a catalog record in a [`Mode::Manual`] [`Collection`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Pointer {
    /// [`Kind`] of the referenced record.
    pub kind: Kind,

    /// ID of the referenced record.
    pub ref_id: catalog::Id,
}

/// Declarative predicate set of a [`Mode::Auto`] [`Collection`].
///
/// Malformed numeric bounds are treated as absent.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AutoRules {
    /// [`Kind`] of the selected records.
    #[serde(alias = "type")]
    pub kind: Kind,

    /// Category of the selected listings.
    #[serde(default)]
    pub category: Option<String>,

    /// Bedroom count of the selected listings.
    #[serde(default)]
    pub bedrooms: Option<Numeric>,

    /// Minimal price (or starting price) of the selected records.
    #[serde(default)]
    pub price_min: Option<Numeric>,

    /// Maximal price (or starting price) of the selected records.
    #[serde(default)]
    pub price_max: Option<Numeric>,

    /// Minimal area (or starting area) of the selected records.
    #[serde(default)]
    pub area_min: Option<Numeric>,

    /// Maximal area (or starting area) of the selected records.
    #[serde(default)]
    pub area_max: Option<Numeric>,

    /// District of the selected records, compared ignoring case.
    #[serde(default)]
    pub district: Option<String>,

    /// Metro stations, at least one of which the selected records must be
    /// near.
    #[serde(default)]
    pub metro: Vec<String>,

    /// Free-text query matched against title, district and metro stations.
    #[serde(default)]
    pub query: Option<String>,
}

impl AutoRules {
    /// Creates new [`AutoRules`] selecting all active records of the
    /// provided [`Kind`].
    #[must_use]
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            category: None,
            bedrooms: None,
            price_min: None,
            price_max: None,
            area_min: None,
            area_max: None,
            district: None,
            metro: vec![],
            query: None,
        }
    }

    /// Selects the active records of the provided [`Snapshot`] matching
    /// these [`AutoRules`], the most recently updated first.
    #[must_use]
    pub fn select(&self, snapshot: &Snapshot) -> Vec<Entry> {
        match self.kind {
            Kind::Listing => self.select_from(&snapshot.listings),
            Kind::Complex => self.select_from(&snapshot.complexes),
        }
    }

    /// Selects the matching active `records` of a single [`Kind`].
    fn select_from<R>(&self, records: &[R]) -> Vec<Entry>
    where
        R: Record + Clone + Into<Entry>,
    {
        let filter = Filter::new(self);

        let mut selected = records
            .iter()
            .filter(|r| r.is_active() && filter.matches(*r))
            .collect::<Vec<_>>();
        // Stable: ties keep their snapshot order.
        selected.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));

        log::trace!(
            kind = %R::KIND,
            total = records.len(),
            selected = selected.len(),
            "applied `AutoRules`",
        );

        selected.into_iter().cloned().map(Into::into).collect()
    }
}

/// [`AutoRules`] with coerced bounds and normalized strings.
#[derive(Debug)]
struct Filter<'r> {
    /// Required category.
    category: Option<String>,

    /// Required bedroom count.
    bedrooms: Option<f64>,

    /// Lower price bound.
    price_min: Option<f64>,

    /// Upper price bound.
    price_max: Option<f64>,

    /// Lower area bound.
    area_min: Option<f64>,

    /// Upper area bound.
    area_max: Option<f64>,

    /// Required district, lowercased.
    district: Option<String>,

    /// Metro stations to match any of.
    metro: &'r [String],

    /// Free-text query, lowercased.
    query: Option<String>,
}

impl<'r> Filter<'r> {
    /// Prepares a new [`Filter`] out of the provided [`AutoRules`].
    fn new(rules: &'r AutoRules) -> Self {
        let lowercased = |s: Option<&str>| {
            text::sanitize_opt(s).map(|s| s.to_lowercase())
        };
        Self {
            category: text::sanitize_opt(rules.category.as_deref()),
            bedrooms: numeric::value_of(rules.bedrooms.as_ref()),
            price_min: numeric::value_of(rules.price_min.as_ref()),
            price_max: numeric::value_of(rules.price_max.as_ref()),
            area_min: numeric::value_of(rules.area_min.as_ref()),
            area_max: numeric::value_of(rules.area_max.as_ref()),
            district: lowercased(rules.district.as_deref()),
            metro: &rules.metro,
            query: lowercased(rules.query.as_deref()),
        }
    }

    /// Checks whether the provided [`Record`] passes every predicate of
    /// this [`Filter`], applied in their fixed order.
    fn matches<R: Record>(&self, record: &R) -> bool {
        self.category
            .as_deref()
            .map_or(true, |c| record.matches_category(c))
            && self.bedrooms.map_or(true, |b| record.matches_bedrooms(b))
            && at_least(record.price_like(), self.price_min)
            && at_most(record.price_like(), self.price_max)
            && at_least(record.area_like(), self.area_min)
            && at_most(record.area_like(), self.area_max)
            && self.district.as_deref().map_or(true, |d| {
                record
                    .district()
                    .is_some_and(|rd| rd.trim().to_lowercase() == d)
            })
            && (self.metro.is_empty()
                || record.metro().iter().any(|m| self.metro.contains(m)))
            && self.query.as_deref().map_or(true, |q| {
                text::contains_lowercased(record.title(), q)
                    || record
                        .district()
                        .is_some_and(|d| text::contains_lowercased(d, q))
                    || record
                        .metro()
                        .iter()
                        .any(|m| text::contains_lowercased(m, q))
            })
    }
}

/// Checks the `value` against the lower `bound`.
///
/// Absent values are not filtered.
fn at_least(value: Option<f64>, bound: Option<f64>) -> bool {
    match (value, bound) {
        (Some(v), Some(min)) => v >= min,
        (None, _) | (_, None) => true,
    }
}

/// Checks the `value` against the upper `bound`.
///
/// Absent values are not filtered.
fn at_most(value: Option<f64>, bound: Option<f64>) -> bool {
    match (value, bound) {
        (Some(v), Some(max)) => v <= max,
        (None, _) | (_, None) => true,
    }
}
