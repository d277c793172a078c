// src/models/trip.rs
// DOCUMENTATION: Trip request, derived duration, and itinerary result models
// PURPOSE: Input/output shapes for POST /api/generate-travel-guide

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use validator::Validate;

/// Sentinel used for dates and durations the traveler did not provide
pub const NOT_SPECIFIED: &str = "Not specified";

pub const DEFAULT_INTERESTS: &str = "General sightseeing";
pub const DEFAULT_SPECIAL_REQUESTS: &str = "None";

/// Calendar date format accepted for trip dates
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trip parameters submitted by the traveler
/// DOCUMENTATION: destination, travelers and budget are required; everything
/// else falls back to a default. Required fields are checked by the generator
/// (so a missing field yields a failure result, not a deserialization error).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TripRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub destination: Option<String>,

    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub end_date: Option<String>,

    /// Accepts a JSON number or a numeric string
    #[serde(default, deserialize_with = "deserialize_count")]
    #[validate(range(min = 1))]
    pub travelers: Option<u32>,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub budget: Option<String>,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub interests: Option<String>,

    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(max = 2000))]
    pub special_requests: Option<String>,
}

impl TripRequest {
    /// Trim every text field and drop the empty ones
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        TripRequest {
            destination: clean(self.destination),
            start_date: clean(self.start_date),
            end_date: clean(self.end_date),
            travelers: self.travelers.filter(|n| *n > 0),
            budget: clean(self.budget),
            interests: clean(self.interests),
            email: clean(self.email),
            special_requests: clean(self.special_requests),
        }
    }

    /// Names of required fields that are absent
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.destination.is_none() {
            missing.push("destination");
        }
        if self.travelers.is_none() {
            missing.push("travelers");
        }
        if self.budget.is_none() {
            missing.push("budget");
        }
        missing
    }

    pub fn start_date_or_default(&self) -> &str {
        self.start_date.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    pub fn end_date_or_default(&self) -> &str {
        self.end_date.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    pub fn interests_or_default(&self) -> &str {
        self.interests.as_deref().unwrap_or(DEFAULT_INTERESTS)
    }

    pub fn special_requests_or_default(&self) -> &str {
        self.special_requests
            .as_deref()
            .unwrap_or(DEFAULT_SPECIAL_REQUESTS)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountField {
    Number(i64),
    Text(String),
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<CountField>::deserialize(deserializer)? {
        None => Ok(None),
        Some(CountField::Number(n)) => u32::try_from(n)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("travelers must be a positive integer, got {}", n))),
        Some(CountField::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(CountField::Text(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("travelers must be a positive integer, got '{}'", s))),
    }
}

/// Trip length derived once from the request dates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripDuration {
    /// Inclusive day count
    Days(i64),
    NotSpecified,
    /// Carries the reason the range was rejected
    InvalidRange(String),
}

impl TripDuration {
    /// Inclusive day count when both dates are given and end > start
    pub fn from_dates(start: Option<&str>, end: Option<&str>) -> Self {
        let (start, end) = match (start, end) {
            (Some(s), Some(e)) if s != NOT_SPECIFIED && e != NOT_SPECIFIED => (s, e),
            _ => return TripDuration::NotSpecified,
        };

        let parsed = NaiveDate::parse_from_str(start, DATE_FORMAT)
            .and_then(|s| NaiveDate::parse_from_str(end, DATE_FORMAT).map(|e| (s, e)));

        match parsed {
            Ok((start, end)) if end > start => TripDuration::Days((end - start).num_days() + 1),
            Ok(_) => TripDuration::InvalidRange("End date must be after start date".to_string()),
            Err(e) => TripDuration::InvalidRange(e.to_string()),
        }
    }

    pub fn days(&self) -> Option<i64> {
        match self {
            TripDuration::Days(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripDuration::Days(d) => write!(f, "{}", d),
            TripDuration::NotSpecified => f.write_str(NOT_SPECIFIED),
            TripDuration::InvalidRange(reason) => write!(f, "Invalid date range: {}", reason),
        }
    }
}

/// Day counts serialize as numbers, markers as strings
impl Serialize for TripDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TripDuration::Days(d) => serializer.serialize_i64(*d),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

/// Where the itinerary text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItinerarySource {
    Generated,
    Fallback,
}

/// A generated travel guide
/// DOCUMENTATION: Echoes the request plus derived duration, itinerary text
/// (markdown) and generation timestamp. Created fresh per request, never updated.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryResult {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub number_of_days: TripDuration,
    pub travelers: u32,
    pub budget: String,
    pub interests: String,
    pub special_requests: String,
    pub itinerary: String,
    pub itinerary_source: ItinerarySource,
    pub email: Option<String>,
    pub generated_at: String,
}

/// Serializes as `{}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyData {}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GuideData {
    Guide(Box<ItineraryResult>),
    Empty(EmptyData),
}

/// Envelope returned by the travel guide endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GuideResponse {
    pub success: bool,
    pub message: String,
    pub data: GuideData,
}

impl GuideResponse {
    pub fn generated(result: ItineraryResult) -> Self {
        GuideResponse {
            success: true,
            message: "Travel guide generated successfully!".to_string(),
            data: GuideData::Guide(Box::new(result)),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        GuideResponse {
            success: false,
            message: message.into(),
            data: GuideData::Empty(EmptyData::default()),
        }
    }

    pub fn guide(&self) -> Option<&ItineraryResult> {
        match &self.data {
            GuideData::Guide(result) => Some(result),
            GuideData::Empty(_) => None,
        }
    }
}
