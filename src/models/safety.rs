// src/models/safety.rs

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default number of distinct alerts after which collection stops
pub const DEFAULT_MIN_ALERTS: usize = 3;

/// A scraped safety alert. Two alerts are duplicates when `alert` text matches exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SafetyAlert {
    /// A clear description of the safety alert, emergency, or dangerous situation
    pub alert: String,
    /// The date when this alert was published
    pub date: String,
    /// Source link of this news
    pub link: String,
}

#[derive(Debug, Deserialize)]
pub struct SafetyAlertsQuery {
    pub destination: Option<String>,
    pub min_alerts: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SafetyAlertsResponse {
    pub destination: String,
    pub alerts: Vec<SafetyAlert>,
    pub count: usize,
}
