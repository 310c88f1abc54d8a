//! [`Request`] definitions of the preview [`Command`]s.

use std::io;

use derive_more::Display;
use serde::Deserialize;
use service::domain::{
    catalog::{Complex, Listing, Snapshot},
    landing::{stored::FeatureDraft, Stored},
    Collection,
};

use crate::args::Command;

/// Decoded input of a [`Command`].
#[derive(Clone, Debug)]
pub enum Request {
    /// Input of [`Command::Collection`].
    Collection(CollectionInput),

    /// Input of [`Command::Landing`].
    Landing(LandingInput),

    /// Input of [`Command::AutoLanding`].
    AutoLanding(AutoLandingInput),

    /// Input of [`Command::PresetKey`].
    PresetKey(FeatureDraft),
}

impl Request {
    /// Reads the [`Request`] of the provided [`Command`] from its input file.
    ///
    /// # Errors
    ///
    /// Errors if the input file cannot be read or decoded.
    pub async fn load(command: &Command) -> Result<Self, Error> {
        let json = tokio::fs::read(command.input()).await?;
        Self::decode(command, &json)
    }

    /// Decodes the [`Request`] of the provided [`Command`] from JSON.
    ///
    /// # Errors
    ///
    /// Errors if the `json` doesn't describe the [`Command`] input.
    pub fn decode(command: &Command, json: &[u8]) -> Result<Self, Error> {
        Ok(match command {
            Command::Collection(_) => {
                Self::Collection(serde_json::from_slice(json)?)
            }
            Command::Landing(_) => Self::Landing(serde_json::from_slice(json)?),
            Command::AutoLanding(_) => {
                Self::AutoLanding(serde_json::from_slice(json)?)
            }
            Command::PresetKey(_) => {
                Self::PresetKey(serde_json::from_slice(json)?)
            }
        })
    }
}

/// Input of [`Command::Collection`].
#[derive(Clone, Debug, Deserialize)]
pub struct CollectionInput {
    /// [`Collection`] to resolve.
    pub collection: Collection,

    /// [`Snapshot`] to resolve the [`Collection`] against.
    #[serde(default)]
    pub snapshot: Snapshot,
}

/// Input of [`Command::Landing`].
#[derive(Clone, Debug, Deserialize)]
pub struct LandingInput {
    /// [`Complex`] the landing belongs to.
    pub complex: Complex,

    /// [`Listing`]s of the [`Complex`].
    #[serde(default)]
    pub listings: Vec<Listing>,

    /// [`Stored`] landing configuration, if any.
    #[serde(default)]
    pub stored: Option<Stored>,
}

/// Input of [`Command::AutoLanding`].
#[derive(Clone, Debug, Deserialize)]
pub struct AutoLandingInput {
    /// [`Complex`] to derive the landing of.
    pub complex: Complex,

    /// [`Listing`]s of the [`Complex`].
    #[serde(default)]
    pub listings: Vec<Listing>,
}

/// Error of loading a [`Request`].
#[derive(Debug, Display, derive_more::Error, derive_more::From)]
pub enum Error {
    /// Input file cannot be read.
    #[display("failed to read input file: {_0}")]
    Read(io::Error),

    /// Input JSON cannot be decoded.
    #[display("failed to decode input JSON: {_0}")]
    Decode(serde_json::Error),
}
