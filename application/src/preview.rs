//! Rendering of [`Request`] previews.

use service::{
    query::{collection, landing},
    Query as _, Service,
};
use tracing as log;

use crate::input::{AutoLandingInput, CollectionInput, LandingInput, Request};

/// Executes the provided [`Request`] and renders its result as pretty-printed
/// JSON.
///
/// # Errors
///
/// Errors if the result cannot be encoded as JSON.
pub async fn render(
    service: &Service,
    request: Request,
) -> Result<String, serde_json::Error> {
    match request {
        Request::Collection(CollectionInput {
            collection,
            snapshot,
        }) => {
            let entries = service
                .execute(collection::ResolveItems {
                    collection: &collection,
                    snapshot: &snapshot,
                })
                .await
                .unwrap_or_else(|e| match e {});
            log::info!(count = entries.len(), "resolved `Collection` items");
            serde_json::to_string_pretty(&entries)
        }
        Request::Landing(LandingInput {
            complex,
            listings,
            stored,
        }) => {
            let config = service
                .execute(landing::Normalize {
                    stored: stored.as_ref(),
                    complex: &complex,
                    listings: &listings,
                })
                .await
                .unwrap_or_else(|e| match e {});
            serde_json::to_string_pretty(&config)
        }
        Request::AutoLanding(AutoLandingInput { complex, listings }) => {
            let config = service
                .execute(landing::BuildAuto {
                    complex: &complex,
                    listings: &listings,
                })
                .await
                .unwrap_or_else(|e| match e {});
            serde_json::to_string_pretty(&config)
        }
        Request::PresetKey(feature) => {
            let key = service
                .execute(landing::InferPresetKey(&feature))
                .await
                .unwrap_or_else(|e| match e {});
            serde_json::to_string_pretty(&key)
        }
    }
}
