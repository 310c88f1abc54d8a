//! [`Complex`] definitions.

use common::{numeric, text, Numeric};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use super::Listing;
use super::{Id, Kind, Record, Status, UpdatedAt};
use crate::domain::geo::Point;

/// Residential complex grouping a number of [`Listing`]s.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Complex {
    /// ID of this [`Complex`].
    pub id: Id,

    /// Title of this [`Complex`].
    #[serde(default)]
    pub title: String,

    /// District this [`Complex`] is located in.
    #[serde(default)]
    pub district: Option<String>,

    /// Metro stations near this [`Complex`], nearest first.
    #[serde(default)]
    pub metro: Vec<String>,

    /// Starting price of the lots in this [`Complex`].
    #[serde(default)]
    pub price_from: Option<Numeric>,

    /// Starting area of the lots in this [`Complex`] in square meters.
    #[serde(default)]
    pub area_from: Option<Numeric>,

    /// Building class of this [`Complex`] (`Комфорт`, `Бизнес`, etc).
    #[serde(default)]
    pub class: Option<String>,

    /// Handover date of this [`Complex`] as provided by the developer.
    #[serde(default)]
    pub handover: Option<String>,

    /// Finish type of the lots in this [`Complex`].
    #[serde(default)]
    pub finish: Option<String>,

    /// Latitude of this [`Complex`].
    #[serde(default)]
    pub lat: Option<Numeric>,

    /// Longitude of this [`Complex`].
    #[serde(default)]
    pub lon: Option<Numeric>,

    /// [`Status`] of this [`Complex`].
    pub status: Status,

    /// Free-text description of this [`Complex`].
    #[serde(default)]
    pub description: Option<String>,

    /// Image URLs of this [`Complex`].
    #[serde(default)]
    pub images: Vec<String>,

    /// [`UpdatedAt`] timestamp of this [`Complex`].
    #[serde(default)]
    pub updated_at: UpdatedAt,
}

impl Complex {
    /// Returns the explicit starting price of this [`Complex`], if it's a
    /// positive number.
    #[must_use]
    pub fn positive_price_from(&self) -> Option<f64> {
        numeric::value_of(self.price_from.as_ref()).filter(|p| *p > 0.0)
    }

    /// Returns the explicit starting area of this [`Complex`], if it's a
    /// positive number.
    #[must_use]
    pub fn positive_area_from(&self) -> Option<f64> {
        numeric::value_of(self.area_from.as_ref()).filter(|a| *a > 0.0)
    }

    /// Returns the geographic location of this [`Complex`], if both
    /// coordinates are known.
    #[must_use]
    pub fn location(&self) -> Option<Point> {
        Point::new(
            numeric::value_of(self.lat.as_ref())?,
            numeric::value_of(self.lon.as_ref())?,
        )
    }

    /// Returns the nearest metro station of this [`Complex`], if any.
    #[must_use]
    pub fn nearest_metro(&self) -> Option<String> {
        self.metro.iter().find_map(|m| text::sanitize(m))
    }

    /// Returns the sanitized description of this [`Complex`], if any.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        text::sanitize_opt(self.description.as_deref())
    }
}

impl Record for Complex {
    const KIND: Kind = Kind::Complex;

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
        numeric::value_of(self.price_from.as_ref())
    }

    fn area_like(&self) -> Option<f64> {
        numeric::value_of(self.area_from.as_ref())
    }

    fn updated_at(&self) -> &UpdatedAt {
        &self.updated_at
    }
}
