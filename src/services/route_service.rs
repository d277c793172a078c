// src/services/route_service.rs
// DOCUMENTATION: Route lookup and multi-leg aggregation
// PURPOSE: Fold the legs of the first route option into a single RouteSummary

use crate::errors::GuideError;
use crate::models::{format_distance, format_duration, RouteSummary, TravelMode};
use crate::services::google_maps_client::{DirectionsRequest, DirectionsRoute};
use crate::services::MapsProvider;
use std::sync::Arc;

pub struct RouteAggregator {
    maps: Arc<dyn MapsProvider>,
}

impl RouteAggregator {
    pub fn new(maps: Arc<dyn MapsProvider>) -> Self {
        Self { maps }
    }

    /// Request a route with waypoint optimization and summarize the first option
    /// DOCUMENTATION: Ok(None) when the provider has no route; Err when the call fails
    pub async fn try_route(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[String],
        mode: TravelMode,
    ) -> Result<Option<RouteSummary>, GuideError> {
        let request = DirectionsRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
            waypoints: waypoints.to_vec(),
            mode,
            optimize_waypoints: true,
        };

        let routes = self.maps.directions(&request).await?;

        if routes.len() > 1 {
            log::debug!("Discarding {} alternate route(s)", routes.len() - 1);
        }

        Ok(routes.into_iter().next().map(summarize_route))
    }

    /// Compatibility wrapper: failures are logged and reported as "no route"
    pub async fn route(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[String],
        mode: TravelMode,
    ) -> Option<RouteSummary> {
        match self.try_route(origin, destination, waypoints, mode).await {
            Ok(summary) => summary,
            Err(e) => {
                log::error!("Error getting route from {} to {}: {}", origin, destination, e);
                None
            }
        }
    }
}

/// Sum distance/duration over every leg, concatenate steps in leg order,
/// and take the polyline from the overview geometry
pub fn summarize_route(route: DirectionsRoute) -> RouteSummary {
    let mut distance_meters = 0;
    let mut duration_seconds = 0;
    let mut steps = Vec::new();

    for leg in route.legs {
        distance_meters += leg.distance.map(|d| d.value).unwrap_or(0);
        duration_seconds += leg.duration.map(|d| d.value).unwrap_or(0);
        steps.extend(leg.steps);
    }

    RouteSummary {
        total_distance: format_distance(distance_meters),
        total_duration: format_duration(duration_seconds),
        distance_meters,
        duration_seconds,
        steps,
        polyline: route.overview_polyline.map(|p| p.points),
        bounds: route.bounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EncodedPolyline, RouteStep, TextValue};
    use crate::services::google_maps_client::DirectionsLeg;
    use crate::services::testing::FakeMaps;

    fn step(instruction: &str) -> RouteStep {
        RouteStep {
            html_instructions: Some(instruction.to_string()),
            distance: None,
            duration: None,
            travel_mode: Some("WALKING".to_string()),
            start_location: None,
            end_location: None,
            polyline: None,
            maneuver: None,
        }
    }

    fn leg(meters: u64, seconds: u64, steps: Vec<RouteStep>) -> DirectionsLeg {
        DirectionsLeg {
            distance: Some(TextValue { text: None, value: meters }),
            duration: Some(TextValue { text: None, value: seconds }),
            steps,
            ..Default::default()
        }
    }

    fn two_leg_route() -> DirectionsRoute {
        DirectionsRoute {
            legs: vec![
                leg(1200, 600, vec![step("a1"), step("a2")]),
                leg(800, 300, vec![step("b1")]),
            ],
            overview_polyline: Some(EncodedPolyline {
                points: "overview".to_string(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_two_leg_aggregation() {
        let summary = summarize_route(two_leg_route());

        assert_eq!(summary.total_distance, "2.0 km");
        assert_eq!(summary.total_duration, "15 mins");
        assert_eq!(summary.distance_meters, 2000);
        assert_eq!(summary.duration_seconds, 900);
        let order: Vec<_> = summary
            .steps
            .iter()
            .filter_map(|s| s.html_instructions.as_deref())
            .collect();
        assert_eq!(order, vec!["a1", "a2", "b1"]);
        assert_eq!(summary.polyline.as_deref(), Some("overview"));
    }

    #[test]
    fn test_leg_without_distance_counts_as_zero() {
        let route = DirectionsRoute {
            legs: vec![DirectionsLeg::default(), leg(500, 120, Vec::new())],
            ..Default::default()
        };

        let summary = summarize_route(route);
        assert_eq!(summary.total_distance, "0.5 km");
        assert_eq!(summary.total_duration, "2 mins");
        assert!(summary.polyline.is_none());
    }

    #[tokio::test]
    async fn test_only_first_route_option_is_used() {
        let alternate = DirectionsRoute {
            legs: vec![leg(99_000, 9_000, Vec::new())],
            ..Default::default()
        };
        let maps = Arc::new(FakeMaps::new().with_routes(Ok(vec![two_leg_route(), alternate])));
        let aggregator = RouteAggregator::new(maps.clone());

        let summary = aggregator
            .route("Louvre", "Eiffel Tower", &["Orsay".to_string()], TravelMode::Walking)
            .await
            .expect("route");

        assert_eq!(summary.total_distance, "2.0 km");

        let calls = maps.directions_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].optimize_waypoints);
        assert_eq!(calls[0].waypoints, vec!["Orsay".to_string()]);
    }

    #[tokio::test]
    async fn test_no_route_and_failure_both_yield_none() {
        let empty = RouteAggregator::new(Arc::new(FakeMaps::new().with_routes(Ok(Vec::new()))));
        assert_eq!(
            empty.try_route("A", "B", &[], TravelMode::Driving).await,
            Ok(None)
        );

        let failing = RouteAggregator::new(Arc::new(
            FakeMaps::new().with_routes(Err(GuideError::RateLimitExceeded)),
        ));
        assert_eq!(
            failing.try_route("A", "B", &[], TravelMode::Driving).await,
            Err(GuideError::RateLimitExceeded)
        );
        assert!(failing.route("A", "B", &[], TravelMode::Driving).await.is_none());
    }
}
