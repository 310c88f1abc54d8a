//! [`Config`]-related definitions.

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Display, Error};
use serde::Deserialize;
use service::domain::geo::Point;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Landing configuration.
    #[serde(default)]
    pub landing: Landing,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Landing configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Landing {
    /// Landmark the distance fact is measured to.
    pub landmark: Landmark,

    /// Accent color of the landing pages.
    #[default("#B08D57".to_owned())]
    pub accent_color: String,

    /// Surface color of the landing pages.
    #[default("#F6F3EE".to_owned())]
    pub surface_color: String,
}

/// Landmark coordinates.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Landmark {
    /// Latitude in degrees.
    #[default(55.753_930)]
    pub lat: f64,

    /// Longitude in degrees.
    #[default(37.620_795)]
    pub lon: f64,
}

impl TryFrom<Landing> for service::Config {
    type Error = InvalidLandmark;

    fn try_from(value: Landing) -> Result<Self, Self::Error> {
        let Landing {
            landmark: Landmark { lat, lon },
            accent_color,
            surface_color,
        } = value;

        let mut landing = service::domain::landing::Catalog::default();
        landing.landmark.point =
            Point::new(lat, lon).ok_or(InvalidLandmark { lat, lon })?;
        landing.labels.accent_color = accent_color;
        landing.labels.surface_color = surface_color;

        Ok(Self { landing })
    }
}

/// Error of configuring out-of-range landmark coordinates.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("landmark coordinates `({lat}, {lon})` are out of range")]
pub struct InvalidLandmark {
    /// Configured latitude.
    pub lat: f64,

    /// Configured longitude.
    pub lon: f64,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
