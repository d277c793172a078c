// src/handlers/safety.rs
// DOCUMENTATION: HTTP handler for destination safety alerts

use crate::errors::GuideError;
use crate::handlers::{required_param, AppState};
use crate::models::{SafetyAlertsQuery, SafetyAlertsResponse, DEFAULT_MIN_ALERTS};
use actix_web::{web, HttpResponse, Responder};

/// GET /api/safety_alerts?destination=&min_alerts=
///
/// DOCUMENTATION: 503 when no extraction backend is configured
pub async fn safety_alerts(
    state: web::Data<AppState>,
    query: web::Query<SafetyAlertsQuery>,
) -> Result<impl Responder, GuideError> {
    let destination = required_param(query.destination.as_deref(), "destination")?;

    let collector = state.safety.as_ref().ok_or_else(|| {
        GuideError::ConfigurationError("safety alert extraction".to_string())
    })?;

    let alerts = collector
        .collect(&destination, query.min_alerts.unwrap_or(DEFAULT_MIN_ALERTS))
        .await?;

    Ok(HttpResponse::Ok().json(SafetyAlertsResponse {
        count: alerts.len(),
        destination,
        alerts,
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/safety_alerts", web::get().to(safety_alerts));
}
