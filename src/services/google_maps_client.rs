// src/services/google_maps_client.rs
// DOCUMENTATION: Google Maps Web Services client
// PURPOSE: Geocoding, nearby search, place details, directions and photo URLs

use crate::errors::GuideError;
use crate::models::{EncodedPolyline, LatLng, RouteBounds, RouteStep, TextValue, TravelMode};
use crate::services::MapsProvider;
use async_trait::async_trait;
use geo_types::Point;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Fields requested from Place Details
const DETAIL_FIELDS: &str = "name,place_id,geometry,formatted_address,vicinity,rating,user_ratings_total,price_level,types,business_status,opening_hours,formatted_phone_number,website,url,reviews,photos,editorial_summary";

/// Google Maps API client
/// DOCUMENTATION: Handles authentication and API calls to Google Maps Web Services
pub struct GoogleMapsClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Maps API key
    api_key: String,
    /// Base URL for Google Maps APIs
    base_url: String,
}

/// Individual place from Google Places API
/// DOCUMENTATION: Shared shape of nearby-search results and detail records
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GooglePlace {
    /// Google's unique place identifier
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    /// Place types array (e.g., ["museum", "tourist_attraction"])
    #[serde(default)]
    pub types: Vec<String>,
    pub geometry: Option<GoogleGeometry>,
    /// Formatted address (detailed, from Place Details)
    pub formatted_address: Option<String>,
    /// Vicinity (short address, from Nearby Search)
    pub vicinity: Option<String>,
    /// Rating (0-5)
    pub rating: Option<f32>,
    pub user_ratings_total: Option<i32>,
    /// Price level (0-4: free to very expensive)
    pub price_level: Option<i32>,
    pub business_status: Option<String>,
    pub opening_hours: Option<GoogleOpeningHours>,
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
    /// Google Maps URL
    pub url: Option<String>,
    pub reviews: Option<Vec<GoogleReview>>,
    pub photos: Option<Vec<GooglePhoto>>,
    /// Short editorial overview (Place Details only)
    pub editorial_summary: Option<GoogleEditorialSummary>,
}

impl GooglePlace {
    pub fn location(&self) -> Option<LatLng> {
        self.geometry.as_ref().map(|g| g.location)
    }

    /// Reference of the first photo, if any
    pub fn first_photo_reference(&self) -> Option<&str> {
        self.photos
            .as_ref()
            .and_then(|photos| photos.first())
            .map(|photo| photo.photo_reference.as_str())
            .filter(|reference| !reference.is_empty())
    }

    pub fn overview(&self) -> Option<&str> {
        self.editorial_summary
            .as_ref()
            .and_then(|summary| summary.overview.as_deref())
            .filter(|overview| !overview.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleGeometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleOpeningHours {
    pub open_now: Option<bool>,
    pub weekday_text: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleReview {
    pub author_name: Option<String>,
    pub rating: Option<i32>,
    pub text: Option<String>,
    /// Unix timestamp
    pub time: Option<i64>,
    pub relative_time_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GooglePhoto {
    /// Photo reference (used to fetch actual photo)
    pub photo_reference: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    /// HTML attributions (required by Google)
    pub html_attributions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleEditorialSummary {
    pub overview: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    results: Vec<GooglePlace>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: Option<GooglePlace>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: GoogleGeometry,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
    pub status: String,
    pub error_message: Option<String>,
}

/// One route option from the Directions API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
    pub overview_polyline: Option<EncodedPolyline>,
    pub bounds: Option<RouteBounds>,
    pub summary: Option<String>,
}

/// Origin-to-destination segment between two consecutive stops
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectionsLeg {
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
    #[serde(default)]
    pub steps: Vec<RouteStep>,
    pub start_address: Option<String>,
    pub end_address: Option<String>,
}

/// Parameters for a directions lookup
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    pub waypoints: Vec<String>,
    pub mode: TravelMode,
    pub optimize_waypoints: bool,
}

impl DirectionsRequest {
    /// Query parameters (without the API key)
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("origin", self.origin.clone()),
            ("destination", self.destination.clone()),
            ("mode", self.mode.as_str().to_string()),
        ];

        if !self.waypoints.is_empty() {
            let mut stops = Vec::with_capacity(self.waypoints.len() + 1);
            if self.optimize_waypoints {
                stops.push("optimize:true".to_string());
            }
            stops.extend(self.waypoints.iter().cloned());
            params.push(("waypoints", stops.join("|")));
        }

        // Transit schedules need a departure time
        if self.mode == TravelMode::Transit {
            params.push(("departure_time", "now".to_string()));
        }

        params
    }
}

/// Translate a non-OK Google status into an error
fn status_error(api: &str, status: &str, error_message: Option<String>) -> GuideError {
    match status {
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => {
            log::error!("Google {} API quota exceeded", api);
            GuideError::RateLimitExceeded
        }
        "REQUEST_DENIED" => {
            let msg = error_message.unwrap_or_else(|| "Request denied".to_string());
            log::error!("Google {} API request denied: {}", api, msg);
            GuideError::ExternalApiError(msg)
        }
        other => {
            let msg = error_message.unwrap_or_else(|| format!("Unknown status: {}", other));
            log::error!("Google {} API unexpected status: {}", api, msg);
            GuideError::ExternalApiError(msg)
        }
    }
}

impl GoogleMapsClient {
    /// Create new Google Maps API client
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://maps.googleapis.com/maps/api".to_string(),
        }
    }

    /// Issue a GET against `path` with the API key appended and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, GuideError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                log::error!("Google Maps request to {} failed: {}", path, e);
                GuideError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Google Maps API error {} on {}: {}", status, path, body);
            return Err(GuideError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        response.json::<T>().await.map_err(|e| {
            log::error!("Failed to parse Google Maps response from {}: {}", path, e);
            GuideError::ExternalApiError(format!("Parse error: {}", e))
        })
    }
}

#[async_trait]
impl MapsProvider for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> Result<Option<Point<f64>>, GuideError> {
        log::debug!("Google geocode lookup: address={}", address);

        let response: GeocodeResponse = self
            .get_json("geocode/json", &[("address", address.to_string())])
            .await?;

        match response.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(response
                .results
                .into_iter()
                .next()
                .map(|result| result.geometry.location.into())),
            other => Err(status_error("Geocoding", other, response.error_message)),
        }
    }

    async fn nearby_search(
        &self,
        center: Point<f64>,
        radius: u32,
        place_type: &str,
    ) -> Result<Vec<GooglePlace>, GuideError> {
        log::debug!(
            "Google Places nearby search: lat={}, lng={}, radius={}, type={}",
            center.y(),
            center.x(),
            radius,
            place_type
        );

        let params = [
            ("location", format!("{},{}", center.y(), center.x())),
            ("radius", radius.to_string()),
            ("type", place_type.to_string()),
        ];

        let response: NearbySearchResponse =
            self.get_json("place/nearbysearch/json", &params).await?;

        match response.status.as_str() {
            "OK" | "ZERO_RESULTS" => {
                log::info!(
                    "Google Places search returned {} results",
                    response.results.len()
                );
                Ok(response.results)
            }
            other => Err(status_error("Places", other, response.error_message)),
        }
    }

    async fn place_details(&self, place_id: &str) -> Result<Option<GooglePlace>, GuideError> {
        log::debug!("Google Places details lookup: place_id={}", place_id);

        let params = [
            ("place_id", place_id.to_string()),
            ("fields", DETAIL_FIELDS.to_string()),
        ];

        let response: DetailsResponse = self.get_json("place/details/json", &params).await?;

        match response.status.as_str() {
            "OK" => Ok(response.result),
            // Unknown or malformed identifiers
            "NOT_FOUND" | "ZERO_RESULTS" | "INVALID_REQUEST" => Ok(None),
            other => Err(status_error("Place Details", other, response.error_message)),
        }
    }

    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<DirectionsRoute>, GuideError> {
        log::debug!(
            "Google directions: {} -> {} via {} waypoint(s), mode={}",
            request.origin,
            request.destination,
            request.waypoints.len(),
            request.mode
        );

        let response: DirectionsResponse = self
            .get_json("directions/json", &request.query_params())
            .await?;

        match response.status.as_str() {
            "OK" | "ZERO_RESULTS" | "NOT_FOUND" => Ok(response.routes),
            other => Err(status_error("Directions", other, response.error_message)),
        }
    }

    /// Get photo URL from photo reference
    /// DOCUMENTATION: Converts Google photo_reference to a URL usable in img tags
    fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        format!(
            "{}/place/photo?maxwidth={}&photoreference={}&key={}",
            self.base_url, max_width, photo_reference, self.api_key
        )
    }
}
