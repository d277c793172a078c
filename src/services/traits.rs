// src/services/traits.rs
// DOCUMENTATION: Seams for every external collaborator
// PURPOSE: Components receive these as injected trait objects so tests can swap in fakes

use crate::errors::GuideError;
use crate::services::google_maps_client::{DirectionsRequest, DirectionsRoute, GooglePlace};
use async_trait::async_trait;
use geo_types::Point;
use serde_json::Value;

/// Geocoding, places and directions provider
#[async_trait]
pub trait MapsProvider: Send + Sync {
    /// First geocoding match for a free-text address, None when nothing matches
    async fn geocode(&self, address: &str) -> Result<Option<Point<f64>>, GuideError>;

    /// Places of `place_type` within `radius` meters of `center`
    async fn nearby_search(
        &self,
        center: Point<f64>,
        radius: u32,
        place_type: &str,
    ) -> Result<Vec<GooglePlace>, GuideError>;

    /// Details for one place, None when the identifier is unknown
    async fn place_details(&self, place_id: &str) -> Result<Option<GooglePlace>, GuideError>;

    /// Route options in provider order (empty when no route exists)
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<DirectionsRoute>, GuideError>;

    /// Direct image URL for a photo reference
    fn photo_url(&self, photo_reference: &str, max_width: u32) -> String;
}

/// Chat-style text completion
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Single non-streaming completion, returns the first choice's text
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, GuideError>;
}

/// Schema-guided page extraction
#[async_trait]
pub trait ExtractionBackend: Send + Sync {
    /// Extract one object matching `schema` from the page at `url`.
    /// Ok(None) means the page yielded nothing usable.
    async fn extract(
        &self,
        url: &str,
        schema: &Value,
        system_prompt: &str,
    ) -> Result<Option<Value>, GuideError>;
}

/// A fully rendered email
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Email transport
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), GuideError>;
}
