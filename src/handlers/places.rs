// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place operations
// PURPOSE: Parse requests, call services, return responses

use crate::errors::GuideError;
use crate::handlers::{required_param, AppState};
use crate::models::{SearchPlacesQuery, SearchPlacesResponse};
use actix_web::{web, HttpResponse, Responder};

/// GET /api/search_places
/// Places of a category around a free-text location
///
/// DOCUMENTATION: Upstream failures and unknown locations both return an empty list
pub async fn search_places(
    state: web::Data<AppState>,
    query: web::Query<SearchPlacesQuery>,
) -> Result<impl Responder, GuideError> {
    let location = required_param(query.location.as_deref(), "location")?;
    let place_type = query.place_type();
    let radius = query.radius();

    log::info!(
        "Searching {} within {}m of {}",
        place_type,
        radius,
        location
    );

    let places = state.places.search(&location, place_type, radius).await;
    Ok(HttpResponse::Ok().json(SearchPlacesResponse::from(places)))
}

/// GET /api/place/{place_id}
/// Provider details record for one place
///
/// DOCUMENTATION: Unknown identifiers and failed lookups are both 404
pub async fn get_place(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder, GuideError> {
    let place_id = path.into_inner();

    let place = state
        .places
        .details_client()
        .lookup(&place_id)
        .await
        .ok_or_else(|| GuideError::NotFound("Place".to_string()))?;

    Ok(HttpResponse::Ok().json(place))
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/search_places", web::get().to(search_places))
        .route("/api/place/{place_id}", web::get().to(get_place));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::TestDeps;
    use crate::models::LatLng;
    use crate::services::google_maps_client::{GoogleGeometry, GooglePlace};
    use crate::services::testing::FakeMaps;
    use actix_web::{http::StatusCode, test, App};
    use geo_types::Point;
    use std::sync::Arc;

    fn place(id: &str) -> GooglePlace {
        GooglePlace {
            place_id: id.to_string(),
            name: "Louvre Museum".to_string(),
            types: vec!["museum".to_string()],
            geometry: Some(GoogleGeometry {
                location: LatLng {
                    lat: 48.8606,
                    lng: 2.3376,
                },
            }),
            vicinity: Some("Rue de Rivoli".to_string()),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn test_search_requires_location() {
        let deps = TestDeps::new();
        let app =
            test::init_service(App::new().app_data(deps.state()).configure(config)).await;

        let req = test::TestRequest::get()
            .uri("/api/search_places?location=%20%20")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert!(deps.maps.geocode_calls.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_search_returns_places_and_count() {
        let mut deps = TestDeps::new();
        deps.maps = Arc::new(
            FakeMaps::new()
                .with_geocode(Ok(Some(Point::new(2.35, 48.85))))
                .with_nearby(Ok(vec![place("p1")])),
        );
        let app =
            test::init_service(App::new().app_data(deps.state()).configure(config)).await;

        let req = test::TestRequest::get()
            .uri("/api/search_places?location=Paris&type=museum&radius=2000")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["places"][0]["name"], "Louvre Museum");
        assert_eq!(body["places"][0]["description"], "No description available.");
    }

    #[actix_web::test]
    async fn test_search_non_numeric_radius_uses_default() {
        let mut deps = TestDeps::new();
        deps.maps = Arc::new(
            FakeMaps::new()
                .with_geocode(Ok(Some(Point::new(2.35, 48.85))))
                .with_nearby(Ok(vec![place("p1")])),
        );
        let app =
            test::init_service(App::new().app_data(deps.state()).configure(config)).await;

        let req = test::TestRequest::get()
            .uri("/api/search_places?location=Paris&radius=abc")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["count"], 1);
        assert_eq!(deps.maps.geocode_calls.lock().unwrap().len(), 1);
        assert_eq!(*deps.maps.nearby_radii.lock().unwrap(), vec![5000]);
    }

    #[actix_web::test]
    async fn test_search_failure_is_empty_list() {
        let mut deps = TestDeps::new();
        deps.maps = Arc::new(FakeMaps::new().with_geocode(Err(GuideError::RateLimitExceeded)));
        let app =
            test::init_service(App::new().app_data(deps.state()).configure(config)).await;

        let req = test::TestRequest::get()
            .uri("/api/search_places?location=Paris")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["count"], 0);
    }

    #[actix_web::test]
    async fn test_place_details_found_and_missing() {
        let mut deps = TestDeps::new();
        deps.maps = Arc::new(FakeMaps::new().with_details("p1", Ok(Some(place("p1")))));
        let app =
            test::init_service(App::new().app_data(deps.state()).configure(config)).await;

        let req = test::TestRequest::get().uri("/api/place/p1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["place_id"], "p1");

        let req = test::TestRequest::get().uri("/api/place/unknown").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["message"], "Place not found");
    }

    #[actix_web::test]
    async fn test_failed_details_lookup_is_not_found() {
        let mut deps = TestDeps::new();
        deps.maps = Arc::new(
            FakeMaps::new().with_details("p1", Err(GuideError::ExternalApiError("down".into()))),
        );
        let app =
            test::init_service(App::new().app_data(deps.state()).configure(config)).await;

        let req = test::TestRequest::get().uri("/api/place/p1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
