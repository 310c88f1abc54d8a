//! [`Args`] definitions.

use std::path::{Path, PathBuf};

use clap::Parser;

/// Admin preview tool of the catalog curation.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    /// [`Command`] to preview.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Operation to preview.
#[derive(Clone, Debug, clap::Subcommand)]
pub enum Command {
    /// Resolves a collection against a catalog snapshot.
    Collection(Input),

    /// Normalizes a stored (possibly legacy) landing configuration.
    Landing(Input),

    /// Derives a landing configuration from the feed data only.
    AutoLanding(Input),

    /// Infers the preset key of a feature ticker item.
    PresetKey(Input),
}

impl Command {
    /// Returns the path to the JSON input of this [`Command`].
    #[must_use]
    pub fn input(&self) -> &Path {
        match self {
            Self::Collection(i)
            | Self::Landing(i)
            | Self::AutoLanding(i)
            | Self::PresetKey(i) => &i.input,
        }
    }
}

/// Input of a [`Command`].
#[derive(Clone, Debug, clap::Args)]
pub struct Input {
    /// Path to the JSON input file.
    #[arg(short, long)]
    pub input: PathBuf,
}
