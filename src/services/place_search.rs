// src/services/place_search.rs
// DOCUMENTATION: Place search pipeline
// PURPOSE: Geocode a free-text location, search nearby places, enrich each with details

use crate::errors::GuideError;
use crate::models::{PlaceRecord, NO_DESCRIPTION};
use crate::services::google_maps_client::GooglePlace;
use crate::services::MapsProvider;
use std::sync::Arc;

/// Max width of photo URLs attached to search results
pub const PHOTO_MAX_WIDTH: u32 = 400;

/// Single "details for a place identifier" lookup
pub struct PlaceDetailsClient {
    maps: Arc<dyn MapsProvider>,
}

impl PlaceDetailsClient {
    pub fn new(maps: Arc<dyn MapsProvider>) -> Self {
        Self { maps }
    }

    /// Ok(None) when the provider does not know the identifier
    pub async fn try_lookup(&self, place_id: &str) -> Result<Option<GooglePlace>, GuideError> {
        if place_id.trim().is_empty() {
            return Ok(None);
        }
        self.maps.place_details(place_id).await
    }

    /// Failures collapse to None (logged)
    pub async fn lookup(&self, place_id: &str) -> Option<GooglePlace> {
        match self.try_lookup(place_id).await {
            Ok(details) => details,
            Err(e) => {
                log::error!("Error fetching place details for {}: {}", place_id, e);
                None
            }
        }
    }
}

/// Free-text location + category search, enriched with details
pub struct PlaceSearchAggregator {
    maps: Arc<dyn MapsProvider>,
    details: PlaceDetailsClient,
}

impl PlaceSearchAggregator {
    pub fn new(maps: Arc<dyn MapsProvider>) -> Self {
        Self {
            details: PlaceDetailsClient::new(maps.clone()),
            maps,
        }
    }

    pub fn details_client(&self) -> &PlaceDetailsClient {
        &self.details
    }

    /// Search places around the first geocoding match for `location`
    /// DOCUMENTATION: Ok(empty) when the location does not geocode; Err when the
    /// geocode or nearby search call itself fails. Per-place details failures
    /// never fail the search.
    pub async fn try_search(
        &self,
        location: &str,
        place_type: &str,
        radius: u32,
    ) -> Result<Vec<PlaceRecord>, GuideError> {
        let center = match self.maps.geocode(location).await? {
            Some(point) => point,
            None => {
                log::info!("No geocoding match for location: {}", location);
                return Ok(Vec::new());
            }
        };

        let places = self.maps.nearby_search(center, radius, place_type).await?;

        let mut records = Vec::with_capacity(places.len());
        for place in places {
            records.push(self.enrich(place).await);
        }

        Ok(records)
    }

    /// Compatibility wrapper: any upstream failure becomes an empty list
    pub async fn search(&self, location: &str, place_type: &str, radius: u32) -> Vec<PlaceRecord> {
        match self.try_search(location, place_type, radius).await {
            Ok(records) => records,
            Err(e) => {
                log::error!("Error searching places near {}: {}", location, e);
                Vec::new()
            }
        }
    }

    /// Merge a nearby-search hit with its details record
    async fn enrich(&self, place: GooglePlace) -> PlaceRecord {
        let location = place.location();
        if location.is_none() {
            log::debug!("Place without geometry: {}", place.place_id);
        }

        let details = match self.details.try_lookup(&place.place_id).await {
            Ok(details) => details,
            Err(e) => {
                log::warn!(
                    "Could not get details for place_id={}: {}",
                    place.place_id,
                    e
                );
                None
            }
        };

        let description = details
            .as_ref()
            .and_then(|d| d.overview())
            .unwrap_or(NO_DESCRIPTION)
            .to_string();

        let photo = details
            .as_ref()
            .and_then(|d| d.first_photo_reference())
            .map(|reference| self.maps.photo_url(reference, PHOTO_MAX_WIDTH));

        PlaceRecord {
            place_id: place.place_id,
            name: place.name,
            address: place.vicinity.or(place.formatted_address),
            location,
            rating: place.rating,
            user_ratings_total: place.user_ratings_total,
            types: place.types,
            photo,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::google_maps_client::{GoogleEditorialSummary, GoogleGeometry, GooglePhoto};
    use crate::services::testing::FakeMaps;
    use crate::models::LatLng;
    use geo_types::Point;

    fn nearby_place(id: &str, name: &str) -> GooglePlace {
        GooglePlace {
            place_id: id.to_string(),
            name: name.to_string(),
            types: vec!["museum".to_string(), "tourist_attraction".to_string()],
            geometry: Some(GoogleGeometry {
                location: LatLng { lat: 48.86, lng: 2.33 },
            }),
            vicinity: Some("Rue de Rivoli, Paris".to_string()),
            rating: Some(4.7),
            ..Default::default()
        }
    }

    fn detailed_place(id: &str) -> GooglePlace {
        GooglePlace {
            place_id: id.to_string(),
            photos: Some(vec![GooglePhoto {
                photo_reference: format!("photo-{}", id),
                width: Some(1024),
                height: Some(768),
                html_attributions: None,
            }]),
            editorial_summary: Some(GoogleEditorialSummary {
                overview: Some("World-famous art museum.".to_string()),
                language: Some("en".to_string()),
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_ungeocodable_location_returns_empty() {
        let maps = Arc::new(FakeMaps::new().with_geocode(Ok(None)));
        let aggregator = PlaceSearchAggregator::new(maps.clone());

        let result = aggregator.try_search("Nowhereville", "museum", 5000).await;

        assert_eq!(result, Ok(Vec::new()));
        assert!(maps.details_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_outer_failure_collapses_to_empty() {
        let maps = Arc::new(
            FakeMaps::new().with_geocode(Err(GuideError::ExternalApiError("timeout".into()))),
        );
        let aggregator = PlaceSearchAggregator::new(maps);

        assert!(aggregator.try_search("Paris", "museum", 5000).await.is_err());
        assert!(aggregator.search("Paris", "museum", 5000).await.is_empty());
    }

    #[tokio::test]
    async fn test_details_failure_only_affects_one_place() {
        let maps = Arc::new(
            FakeMaps::new()
                .with_geocode(Ok(Some(Point::new(2.35, 48.85))))
                .with_nearby(Ok(vec![
                    nearby_place("louvre", "Louvre"),
                    nearby_place("orsay", "Musée d'Orsay"),
                ]))
                .with_details("louvre", Ok(Some(detailed_place("louvre"))))
                .with_details(
                    "orsay",
                    Err(GuideError::ExternalApiError("details down".into())),
                ),
        );
        let aggregator = PlaceSearchAggregator::new(maps.clone());

        let places = aggregator.search("Paris", "museum", 5000).await;

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].description, "World-famous art museum.");
        assert_eq!(
            places[0].photo.as_deref(),
            Some("https://photos.test/photo-louvre?w=400")
        );
        assert_eq!(places[0].address.as_deref(), Some("Rue de Rivoli, Paris"));
        assert_eq!(places[1].name, "Musée d'Orsay");
        assert_eq!(places[1].description, NO_DESCRIPTION);
        assert!(places[1].photo.is_none());
        assert_eq!(maps.details_calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_place_without_geometry_is_kept() {
        let mut bare = nearby_place("kiosk", "Tourist Kiosk");
        bare.geometry = None;
        let maps = Arc::new(
            FakeMaps::new()
                .with_geocode(Ok(Some(Point::new(2.35, 48.85))))
                .with_nearby(Ok(vec![nearby_place("louvre", "Louvre"), bare])),
        );
        let aggregator = PlaceSearchAggregator::new(maps);

        let places = aggregator.search("Paris", "museum", 5000).await;

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].location, Some(LatLng { lat: 48.86, lng: 2.33 }));
        assert_eq!(places[1].name, "Tourist Kiosk");
        assert!(places[1].location.is_none());
        assert_eq!(places[1].description, NO_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_details_lookup_skips_blank_identifier() {
        let maps = Arc::new(FakeMaps::new());
        let client = PlaceDetailsClient::new(maps.clone());

        assert!(client.lookup("  ").await.is_none());
        assert!(maps.details_calls.lock().unwrap().is_empty());
    }
}
