// src/handlers/routes.rs
// DOCUMENTATION: HTTP handler for route lookups
// PURPOSE: Parse origin/destination/waypoints/mode and return the aggregated route

use crate::errors::GuideError;
use crate::handlers::{required_param, AppState};
use crate::models::TravelMode;
use actix_web::{web, HttpRequest, HttpResponse, Responder};

/// Parsed GET /api/route query
#[derive(Debug, PartialEq)]
struct RouteQuery {
    origin: String,
    destination: String,
    waypoints: Vec<String>,
    mode: TravelMode,
}

/// Waypoints may repeat (`waypoints=a&waypoints=b`) or be pipe-separated
fn parse_route_query(query_string: &str) -> Result<RouteQuery, GuideError> {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(query_string)
        .map_err(|e| GuideError::InvalidInput(format!("Invalid query string: {}", e)))?
        .into_inner();

    let first = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    let origin = required_param(first("origin"), "origin")?;
    let destination = required_param(first("destination"), "destination")?;

    let mode = match first("mode").map(str::trim).filter(|m| !m.is_empty()) {
        Some(mode) => mode.parse::<TravelMode>()?,
        None => TravelMode::default(),
    };

    let waypoints = pairs
        .iter()
        .filter(|(k, _)| k == "waypoints")
        .flat_map(|(_, v)| v.split('|'))
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();

    Ok(RouteQuery {
        origin,
        destination,
        waypoints,
        mode,
    })
}

/// GET /api/route
/// Aggregated route through optional waypoints
///
/// DOCUMENTATION: 400 when origin/destination is missing or the mode is unknown,
/// 404 when the provider has no route or the lookup fails
pub async fn get_route(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, GuideError> {
    let query = parse_route_query(req.query_string())?;

    log::info!(
        "Route {} -> {} ({}, {} waypoint(s))",
        query.origin,
        query.destination,
        query.mode,
        query.waypoints.len()
    );

    let summary = state
        .routes
        .route(&query.origin, &query.destination, &query.waypoints, query.mode)
        .await
        .ok_or_else(|| GuideError::NotFound("Route".to_string()))?;

    Ok(HttpResponse::Ok().json(summary))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/route", web::get().to(get_route));
}
