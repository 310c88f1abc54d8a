//! Domain definitions.

pub mod catalog;
pub mod collection;
pub mod geo;
pub mod landing;

pub use self::{collection::Collection, landing::LandingConfig};
