//! [`Listing`] definitions.

use common::{numeric, text, Numeric};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use super::Complex;
use super::{Id, Kind, Record, Status, UpdatedAt};

/// Single lot (apartment, townhouse, commercial unit) offered for sale.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// ID of the [`Complex`] this [`Listing`] belongs to, if any.
    #[serde(default)]
    pub complex_id: Option<Id>,

    /// Title of this [`Listing`].
    #[serde(default)]
    pub title: String,

    /// Category of this [`Listing`] (`newbuild`, `secondary`, `rent`, etc).
    #[serde(default)]
    pub category: Option<String>,

    /// District this [`Listing`] is located in.
    #[serde(default)]
    pub district: Option<String>,

    /// Metro stations near this [`Listing`], nearest first.
    #[serde(default)]
    pub metro: Vec<String>,

    /// Price of this [`Listing`].
    #[serde(default)]
    pub price: Option<Numeric>,

    /// Total area of this [`Listing`] in square meters.
    #[serde(default)]
    pub area_total: Option<Numeric>,

    /// Number of bedrooms of this [`Listing`] (`0` for a studio).
    #[serde(default)]
    pub bedrooms: Option<Numeric>,

    /// Floor this [`Listing`] is located on.
    #[serde(default)]
    pub floor: Option<Numeric>,

    /// Number of floors in the building of this [`Listing`].
    #[serde(default)]
    pub floors_total: Option<Numeric>,

    /// [`Status`] of this [`Listing`].
    pub status: Status,

    /// Free-text description of this [`Listing`].
    #[serde(default)]
    pub description: Option<String>,

    /// Image URLs of this [`Listing`].
    #[serde(default)]
    pub images: Vec<String>,

    /// [`UpdatedAt`] timestamp of this [`Listing`].
    #[serde(default)]
    pub updated_at: UpdatedAt,
}

impl Listing {
    /// Returns the price of this [`Listing`], if it's a positive number.
    #[must_use]
    pub fn positive_price(&self) -> Option<f64> {
        numeric::value_of(self.price.as_ref()).filter(|p| *p > 0.0)
    }

    /// Returns the total area of this [`Listing`], if it's a positive
    /// number.
    #[must_use]
    pub fn positive_area(&self) -> Option<f64> {
        numeric::value_of(self.area_total.as_ref()).filter(|a| *a > 0.0)
    }

    /// Returns the number of floors in the building of this [`Listing`], if
    /// it's a positive number.
    #[must_use]
    pub fn floors(&self) -> Option<f64> {
        numeric::value_of(self.floors_total.as_ref())
            .filter(|f| *f > 0.0)
            .map(f64::round)
    }

    /// Returns the bedroom count of this [`Listing`].
    ///
    /// [`None`] is returned if the count is absent, malformed or out of
    /// range.
    #[must_use]
    pub fn bedroom_count(&self) -> Option<u8> {
        let bedrooms = numeric::value_of(self.bedrooms.as_ref())?.round();
        if !(0.0..=f64::from(u8::MAX)).contains(&bedrooms) {
            return None;
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "range checked above"
        )]
        let count = bedrooms as u8;
        Some(count)
    }

    /// Returns sanitized image URLs of this [`Listing`].
    pub fn image_urls(&self) -> impl Iterator<Item = String> + '_ {
        self.images.iter().filter_map(|i| text::sanitize(i))
    }
}

impl Record for Listing {
    const KIND: Kind = Kind::Listing;

    fn id(&self) -> &Id {
        &self.id
    }

    fn status(&self) -> Status {
        self.status
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    fn metro(&self) -> &[String] {
        &self.metro
    }

    fn price_like(&self) -> Option<f64> {
        numeric::value_of(self.price.as_ref())
    }

    fn area_like(&self) -> Option<f64> {
        numeric::value_of(self.area_total.as_ref())
    }

    fn updated_at(&self) -> &UpdatedAt {
        &self.updated_at
    }

    fn matches_category(&self, category: &str) -> bool {
        self.category.as_deref().map(str::trim) == Some(category)
    }

    fn matches_bedrooms(&self, bedrooms: f64) -> bool {
        numeric::value_of(self.bedrooms.as_ref())
            .map_or(true, |b| (b - bedrooms).abs() < f64::EPSILON)
    }
}

#[cfg(test)]
mod spec {
    use common::Numeric;

    use super::{Listing, Status};

    fn listing(bedrooms: Option<Numeric>) -> Listing {
        Listing {
            id: "l-1".into(),
            complex_id: None,
            title: "Квартира".into(),
            category: Some("newbuild".into()),
            district: None,
            metro: vec![],
            price: Some(" 5 000 000 ".into()),
            area_total: Some(Numeric::Number(-1.0)),
            bedrooms,
            floor: None,
            floors_total: Some("24,6".into()),
            status: Status::Active,
            description: None,
            images: vec![],
            updated_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn coerces_numeric_fields() {
        let l = listing(Some("2".into()));

        assert_eq!(l.positive_price(), Some(5_000_000.0));
        assert_eq!(l.positive_area(), None);
        assert_eq!(l.floors(), Some(25.0));
        assert_eq!(l.bedroom_count(), Some(2));
    }

    #[test]
    fn rejects_out_of_range_bedrooms() {
        assert_eq!(listing(None).bedroom_count(), None);
        assert_eq!(listing(Some("много".into())).bedroom_count(), None);
        assert_eq!(listing(Some(Numeric::Number(-1.0))).bedroom_count(), None);
        assert_eq!(listing(Some(Numeric::Number(300.0))).bedroom_count(), None);
        assert_eq!(listing(Some(Numeric::Number(0.0))).bedroom_count(), Some(0));
    }
}
