// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components and hold the shared application state

pub mod guides;
pub mod health;
pub mod places;
pub mod routes;
pub mod safety;

pub use guides::config as guides_config;
pub use health::config as health_config;
pub use places::config as places_config;
pub use routes::config as routes_config;
pub use safety::config as safety_config;

use crate::db::GuideStore;
use crate::errors::GuideError;
use crate::services::{
    CompletionBackend, ExtractionBackend, ItineraryGenerator, Mailer, MapsProvider,
    NotificationDispatcher, PlaceSearchAggregator, RouteAggregator, SafetyAlertCollector,
};
use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, HttpRequest,
};
use std::sync::Arc;
use std::time::Duration;

/// Pipelines shared by every worker, built once at startup
pub struct AppState {
    pub places: PlaceSearchAggregator,
    pub routes: RouteAggregator,
    pub guides: ItineraryGenerator,
    pub notifier: NotificationDispatcher,
    /// None when no extraction backend is configured
    pub safety: Option<SafetyAlertCollector>,
}

impl AppState {
    pub fn new(
        maps: Arc<dyn MapsProvider>,
        completion: Arc<dyn CompletionBackend>,
        extraction: Option<Arc<dyn ExtractionBackend>>,
        mailer: Arc<dyn Mailer>,
        store: Arc<dyn GuideStore>,
        safety_query_interval: Duration,
    ) -> Self {
        Self {
            places: PlaceSearchAggregator::new(maps.clone()),
            routes: RouteAggregator::new(maps),
            guides: ItineraryGenerator::new(completion, store),
            notifier: NotificationDispatcher::new(mailer),
            safety: extraction
                .map(|backend| SafetyAlertCollector::new(backend, safety_query_interval)),
        }
    }
}

/// JSON body extractor config: malformed bodies become 400 error envelopes
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        log::warn!("Rejected JSON body: {}", err);
        GuideError::InvalidInput(format!("Invalid JSON body: {}", err)).into()
    })
}

/// Query string extractor config, same envelope as json_config
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        log::warn!("Rejected query string: {}", err);
        GuideError::InvalidInput(format!("Invalid query string: {}", err)).into()
    })
}

/// Trimmed, non-empty query value
pub(crate) fn required_param(value: Option<&str>, name: &str) -> Result<String, GuideError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| GuideError::InvalidInput(format!("{} parameter is required", name)))
}
