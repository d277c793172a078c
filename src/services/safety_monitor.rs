// src/services/safety_monitor.rs
// DOCUMENTATION: Safety alert collection for a destination
// PURPOSE: Run a fixed series of news queries through the extraction backend,
// deduplicate the alerts and stop once enough distinct ones are found

use crate::errors::GuideError;
use crate::models::SafetyAlert;
use crate::services::ExtractionBackend;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Url;
use schemars::schema_for;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

const NEWS_SEARCH_URL: &str = "https://news.google.com/search";

/// Query suffixes, run in this order after the destination name
pub const QUERY_SUFFIXES: [&str; 5] = [
    "emergency alert news",
    "safety warning",
    "travel warning",
    "crisis news",
    "security alert",
];

const EXTRACTION_PROMPT: &str = "You are a travel safety analyst. From this news search page, \
extract only recent safety alerts, emergencies or dangerous situations that affect travelers \
to the searched destination. Skip any item that is not genuinely about traveler safety, such \
as sports, business or entertainment news. Do not return duplicate items that report the same \
event. For each alert return its description, its publication date and the complete, direct \
URL of the source article, never a search or aggregator link.";

type QueryPacer = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

pub struct SafetyAlertCollector {
    backend: Arc<dyn ExtractionBackend>,
    query_interval: Duration,
}

impl SafetyAlertCollector {
    /// `query_interval` is the minimum pause between consecutive queries
    pub fn new(backend: Arc<dyn ExtractionBackend>, query_interval: Duration) -> Self {
        Self {
            backend,
            query_interval,
        }
    }

    /// Collect distinct alerts for `destination`
    /// DOCUMENTATION: Queries run sequentially and stop once `min_count` distinct
    /// alerts are held. Alerts are distinct by exact `alert` text and keep
    /// first-seen order. A failed query is logged and skipped, except for
    /// configuration errors which abort the whole collection.
    pub async fn collect(
        &self,
        destination: &str,
        min_count: usize,
    ) -> Result<Vec<SafetyAlert>, GuideError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(GuideError::InvalidInput("destination is required".to_string()));
        }
        let min_count = min_count.max(1);

        let schema = alert_schema()?;
        let pacer = Quota::with_period(self.query_interval).map(QueryPacer::direct);

        let mut alerts: Vec<SafetyAlert> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for suffix in QUERY_SUFFIXES {
            if alerts.len() >= min_count {
                break;
            }

            if let Some(pacer) = &pacer {
                pacer.until_ready().await;
            }

            let query = format!("{} {}", destination, suffix);
            let url = search_url(&query)?;
            log::info!("Searching safety news: {}", query);

            match self.backend.extract(url.as_str(), &schema, EXTRACTION_PROMPT).await {
                Ok(Some(value)) => match serde_json::from_value::<SafetyAlert>(value) {
                    Ok(alert) if alert.alert.trim().is_empty() => {
                        log::debug!("Empty alert text for '{}'", query);
                    }
                    Ok(alert) => {
                        if seen.insert(alert.alert.clone()) {
                            alerts.push(alert);
                        } else {
                            log::debug!("Duplicate alert for '{}' skipped", query);
                        }
                    }
                    Err(e) => log::warn!("Unusable extraction for '{}': {}", query, e),
                },
                Ok(None) => log::debug!("No alert extracted for '{}'", query),
                Err(e @ GuideError::ConfigurationError(_)) => return Err(e),
                Err(e) => log::warn!("Safety query '{}' failed: {}", query, e),
            }
        }

        log::info!(
            "Collected {} safety alert(s) for {}",
            alerts.len(),
            destination
        );

        Ok(alerts)
    }
}

/// JSON schema describing one SafetyAlert
pub fn alert_schema() -> Result<Value, GuideError> {
    serde_json::to_value(schema_for!(SafetyAlert))
        .map_err(|e| GuideError::InternalError(format!("Alert schema failed: {}", e)))
}

fn search_url(query: &str) -> Result<Url, GuideError> {
    Url::parse_with_params(NEWS_SEARCH_URL, &[("q", query)])
        .map_err(|e| GuideError::InternalError(format!("Invalid search URL: {}", e)))
}
