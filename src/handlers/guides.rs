// src/handlers/guides.rs
// DOCUMENTATION: HTTP handler for travel guide generation
// PURPOSE: Generate an itinerary, email it when an address is given, wrap it in the envelope

use crate::handlers::AppState;
use crate::models::{GuideResponse, TripRequest};
use crate::services::failure_response;
use actix_web::{web, HttpResponse, Responder};

/// POST /api/generate-travel-guide
///
/// DOCUMENTATION: 200 with the guide, 400 for missing or invalid fields,
/// 500 for unexpected failures. Email delivery problems never change the status.
pub async fn generate_travel_guide(
    state: web::Data<AppState>,
    body: web::Json<TripRequest>,
) -> impl Responder {
    let result = match state.guides.try_generate(body.into_inner()).await {
        Ok(result) => result,
        Err(e) if e.is_client_error() => {
            log::warn!("Rejected travel guide request: {}", e);
            return HttpResponse::BadRequest().json(failure_response(&e));
        }
        Err(e) => return HttpResponse::InternalServerError().json(failure_response(&e)),
    };

    if result.email.is_some() {
        if let Err(e) = state.notifier.dispatch(&result).await {
            log::error!(
                "Failed to email travel guide for {}: {}",
                result.destination,
                e
            );
        }
    }

    HttpResponse::Ok().json(GuideResponse::generated(result))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/generate-travel-guide",
        web::post().to(generate_travel_guide),
    );
}
