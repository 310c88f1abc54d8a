//! [`Query`] definition.

pub mod collection;
pub mod landing;

#[cfg(doc)]
use crate::Service;

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;
