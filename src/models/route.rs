// src/models/route.rs
// DOCUMENTATION: Route request/response models
// PURPOSE: Travel modes and the aggregated multi-leg route summary

use crate::errors::GuideError;
use crate::models::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported travel modes for directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Walking,
    Driving,
    Transit,
    Bicycling,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
            TravelMode::Transit => "transit",
            TravelMode::Bicycling => "bicycling",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = GuideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walking" => Ok(TravelMode::Walking),
            "driving" => Ok(TravelMode::Driving),
            "transit" => Ok(TravelMode::Transit),
            "bicycling" => Ok(TravelMode::Bicycling),
            other => Err(GuideError::InvalidInput(format!(
                "Unsupported travel mode '{}' (expected walking, driving, transit or bicycling)",
                other
            ))),
        }
    }
}

/// Text/value pair as returned by the directions provider (e.g. "1.2 km" / 1200)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextValue {
    pub text: Option<String>,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedPolyline {
    pub points: String,
}

/// One navigation step inside a route leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub html_instructions: Option<String>,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
    pub travel_mode: Option<String>,
    pub start_location: Option<LatLng>,
    pub end_location: Option<LatLng>,
    pub polyline: Option<EncodedPolyline>,
    pub maneuver: Option<String>,
}

/// Viewport enclosing the whole route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteBounds {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

/// Aggregated summary of the first route option
/// DOCUMENTATION: Distance/duration are sums over every leg, steps are the
/// concatenation of every leg's steps in order, polyline is the overview geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    /// e.g. "2.0 km"
    pub total_distance: String,
    /// e.g. "15 mins"
    pub total_duration: String,
    pub distance_meters: u64,
    pub duration_seconds: u64,
    pub steps: Vec<RouteStep>,
    pub polyline: Option<String>,
    pub bounds: Option<RouteBounds>,
}

/// Kilometers with one decimal place
pub fn format_distance(meters: u64) -> String {
    format!("{:.1} km", meters as f64 / 1000.0)
}

/// Whole minutes, ties rounded to the even minute
pub fn format_duration(seconds: u64) -> String {
    let (minutes, rest) = (seconds / 60, seconds % 60);
    let round_up = rest > 30 || (rest == 30 && minutes % 2 == 1);
    format!("{} mins", minutes + u64::from(round_up))
}
