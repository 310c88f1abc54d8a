//! Catalog definitions.

pub mod complex;
pub mod listing;

use common::define_kind;
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

pub use self::{complex::Complex, listing::Listing};

define_kind! {
    #[doc = "Kind of a catalog [`Entry`]."]
    enum Kind {
        #[doc = "A single [`Listing`] (apartment, lot)."]
        Listing = 1,

        #[doc = "A residential [`Complex`]."]
        Complex = 2,
    }
}

define_kind! {
    #[doc = "Publication status of a catalog record."]
    enum Status {
        #[doc = "Published and visible."]
        Active = 1,

        #[doc = "Withdrawn from sale."]
        Archived = 2,

        #[doc = "Hidden by an editor."]
        Hidden = 3,
    }
}

/// ID of a catalog record.
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

/// Last-updated timestamp of a catalog record.
///
/// Kept as a zero-padded ISO 8601 string, so the lexicographic order is the
/// chronological one.
#[derive(
    AsRef,
    Clone,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(forward)]
#[from(String, &str)]
pub struct UpdatedAt(String);

/// Accessors shared by every kind of catalog record.
///
/// Each kind maps its own fields onto the "price-like" and "area-like"
/// slots, so filtering never has to guess a kind by field presence.
pub trait Record {
    /// [`Kind`] of this [`Record`].
    const KIND: Kind;

    /// Returns ID of this [`Record`].
    fn id(&self) -> &Id;

    /// Returns [`Status`] of this [`Record`].
    fn status(&self) -> Status;

    /// Indicates whether this [`Record`] may be surfaced.
    fn is_active(&self) -> bool {
        self.status() == Status::Active
    }

    /// Returns the title of this [`Record`].
    fn title(&self) -> &str;

    /// Returns the district of this [`Record`], if known.
    fn district(&self) -> Option<&str>;

    /// Returns the metro stations near this [`Record`].
    fn metro(&self) -> &[String];

    /// Returns the price (or the starting price) of this [`Record`].
    fn price_like(&self) -> Option<f64>;

    /// Returns the area (or the starting area) of this [`Record`].
    fn area_like(&self) -> Option<f64>;

    /// Returns the [`UpdatedAt`] timestamp of this [`Record`].
    fn updated_at(&self) -> &UpdatedAt;

    /// Checks whether this [`Record`] belongs to the provided category.
    ///
    /// Kinds without a category pass unfiltered.
    fn matches_category(&self, _category: &str) -> bool {
        true
    }

    /// Checks whether this [`Record`] has the provided bedroom count.
    ///
    /// Kinds without a bedroom count pass unfiltered.
    fn matches_bedrooms(&self, _bedrooms: f64) -> bool {
        true
    }
}

/// Typed reference to a catalog record.
#[derive(Clone, Debug, Deserialize, From, PartialEq, Serialize)]
#[serde(tag = "kind", content = "ref", rename_all = "snake_case")]
pub enum Entry {
    /// [`Listing`] entry.
    Listing(Listing),

    /// [`Complex`] entry.
    Complex(Complex),
}

impl Entry {
    /// Returns [`Kind`] of this [`Entry`].
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Listing(_) => Kind::Listing,
            Self::Complex(_) => Kind::Complex,
        }
    }

    /// Returns ID of the referenced record.
    #[must_use]
    pub fn id(&self) -> &Id {
        match self {
            Self::Listing(l) => l.id(),
            Self::Complex(c) => c.id(),
        }
    }
}

/// Point-in-time view of the catalog.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Snapshot {
    /// All known [`Listing`]s, in any status.
    pub listings: Vec<Listing>,

    /// All known [`Complex`]es, in any status.
    pub complexes: Vec<Complex>,
}

impl Snapshot {
    /// Looks up an active record of the provided [`Kind`] by its [`Id`].
    #[must_use]
    pub fn find_active(&self, kind: Kind, id: &Id) -> Option<Entry> {
        match kind {
            Kind::Listing => find_by_id(&self.listings, id)
                .filter(|l| l.is_active())
                .cloned()
                .map(Entry::from),
            Kind::Complex => find_by_id(&self.complexes, id)
                .filter(|c| c.is_active())
                .cloned()
                .map(Entry::from),
        }
    }
}

/// Finds the first [`Record`] with the provided [`Id`].
fn find_by_id<'r, R: Record>(records: &'r [R], id: &Id) -> Option<&'r R> {
    records.iter().find(|r| r.id() == id)
}
