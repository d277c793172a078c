// src/models/place.rs
// DOCUMENTATION: Place data structures exposed by the search API
// PURPOSE: Normalized place records merged from nearby search + details lookups

use serde::{Deserialize, Serialize};

/// Description used when a place has no editorial summary or its details lookup failed
pub const NO_DESCRIPTION: &str = "No description available.";

/// Default category for place searches
pub const DEFAULT_PLACE_TYPE: &str = "tourist_attraction";

/// Default search radius in meters
pub const DEFAULT_SEARCH_RADIUS: u32 = 5000;

/// Upper bound accepted by the provider's nearby search
pub const MAX_SEARCH_RADIUS: u32 = 50_000;

/// Latitude/longitude pair in the provider's wire shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<geo_types::Point<f64>> for LatLng {
    fn from(point: geo_types::Point<f64>) -> Self {
        // geo-types stores x = longitude, y = latitude
        LatLng {
            lat: point.y(),
            lng: point.x(),
        }
    }
}

impl From<LatLng> for geo_types::Point<f64> {
    fn from(coord: LatLng) -> Self {
        geo_types::Point::new(coord.lng, coord.lat)
    }
}

/// A candidate place returned by the search endpoint
/// DOCUMENTATION: Nearby search result enriched with a details lookup.
/// A failed details lookup leaves `description` at NO_DESCRIPTION and `photo` empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Provider's opaque place identifier
    pub place_id: String,
    pub name: String,
    /// Short address (vicinity)
    pub address: Option<String>,
    /// None when the provider returned no geometry
    pub location: Option<LatLng>,
    pub rating: Option<f32>,
    pub user_ratings_total: Option<i32>,
    /// Category tags (e.g., ["museum", "tourist_attraction"])
    pub types: Vec<String>,
    /// Ready-to-use photo URL
    pub photo: Option<String>,
    pub description: String,
}

/// Query parameters for GET /api/search_places
#[derive(Debug, Deserialize)]
pub struct SearchPlacesQuery {
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    /// Raw value; anything that is not a whole number of meters falls back to the default
    pub radius: Option<String>,
}

impl SearchPlacesQuery {
    pub fn place_type(&self) -> &str {
        self.type_
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_PLACE_TYPE)
    }

    pub fn radius(&self) -> u32 {
        self.radius
            .as_deref()
            .and_then(|r| r.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_SEARCH_RADIUS)
            .clamp(1, MAX_SEARCH_RADIUS)
    }
}

/// Response body for GET /api/search_places
#[derive(Debug, Serialize)]
pub struct SearchPlacesResponse {
    pub places: Vec<PlaceRecord>,
    pub count: usize,
}

impl From<Vec<PlaceRecord>> for SearchPlacesResponse {
    fn from(places: Vec<PlaceRecord>) -> Self {
        let count = places.len();
        SearchPlacesResponse { places, count }
    }
}
