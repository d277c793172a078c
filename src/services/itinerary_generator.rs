// src/services/itinerary_generator.rs
// DOCUMENTATION: Itinerary generation pipeline
// PURPOSE: Validate trip parameters, prompt the completion backend, fall back to a
// local template when generation fails, and record the result

use crate::db::{GuideStore, ANONYMOUS_USER};
use crate::errors::GuideError;
use crate::models::{
    GuideResponse, ItineraryResult, ItinerarySource, TripDuration, TripRequest,
};
use crate::services::CompletionBackend;
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant";

/// Phrase used in the prompt when the traveler has no special requests
const NO_SPECIAL_REQUESTS: &str = "wanting a great experience";

pub struct ItineraryGenerator {
    completion: Arc<dyn CompletionBackend>,
    store: Arc<dyn GuideStore>,
}

impl ItineraryGenerator {
    pub fn new(completion: Arc<dyn CompletionBackend>, store: Arc<dyn GuideStore>) -> Self {
        Self { completion, store }
    }

    /// Generate a guide
    /// DOCUMENTATION: Required-field and validation errors return before any
    /// network call. Completion failures are replaced by a fallback itinerary
    /// and persistence failures are logged; neither fails the request.
    pub async fn try_generate(&self, trip: TripRequest) -> Result<ItineraryResult, GuideError> {
        let trip = trip.normalized();

        let (Some(destination), Some(travelers), Some(budget)) =
            (trip.destination.clone(), trip.travelers, trip.budget.clone())
        else {
            return Err(GuideError::MissingFields(
                trip.missing_required_fields().join(", "),
            ));
        };

        trip.validate()
            .map_err(|e| GuideError::ValidationError(e.to_string()))?;

        let duration =
            TripDuration::from_dates(trip.start_date.as_deref(), trip.end_date.as_deref());
        let prompt = build_prompt(&trip, &duration);

        log::info!(
            "Requesting itinerary for {} ({} chars of prompt)",
            destination,
            prompt.len()
        );

        let (itinerary, itinerary_source) =
            match self.completion.complete(SYSTEM_PROMPT, &prompt).await {
                Ok(text) => {
                    log::info!("Itinerary generation succeeded for {}", destination);
                    (text, ItinerarySource::Generated)
                }
                Err(e) => {
                    log::error!("Itinerary generation failed for {}: {}", destination, e);
                    (
                        fallback_itinerary(&destination, &duration),
                        ItinerarySource::Fallback,
                    )
                }
            };

        let result = ItineraryResult {
            destination,
            start_date: trip.start_date_or_default().to_string(),
            end_date: trip.end_date_or_default().to_string(),
            number_of_days: duration,
            travelers,
            budget,
            interests: trip.interests_or_default().to_string(),
            special_requests: trip.special_requests_or_default().to_string(),
            itinerary,
            itinerary_source,
            email: trip.email.clone(),
            generated_at: Utc::now().to_rfc3339(),
        };

        if let Some(email) = &result.email {
            match self.store.save(ANONYMOUS_USER, &result).await {
                Ok(id) => log::info!("Travel guide {} recorded for {}", id, email),
                Err(e) => log::error!("Failed to record travel guide for {}: {}", email, e),
            }
        }

        Ok(result)
    }
}

/// Failure envelope for an error raised anywhere in the pipeline
pub fn failure_response(error: &GuideError) -> GuideResponse {
    if error.is_client_error() {
        GuideResponse::failed(error.to_string())
    } else {
        log::error!("Error generating travel guide: {}", error);
        GuideResponse::failed(format!("Failed to generate travel guide: {}", error))
    }
}

/// Natural-language instruction for the completion backend
pub fn build_prompt(trip: &TripRequest, duration: &TripDuration) -> String {
    let destination = trip.destination.as_deref().unwrap_or_default();
    let travelers = trip.travelers.unwrap_or(1);
    let budget = trip.budget.as_deref().unwrap_or_default();

    let length = match duration {
        TripDuration::Days(days) => format!("{}-day trip", days),
        other => format!("trip (length: {})", other),
    };

    let special_requests = trip.special_requests_or_default();
    let special_requests = if special_requests.eq_ignore_ascii_case("none") {
        NO_SPECIAL_REQUESTS
    } else {
        special_requests
    };

    format!(
        "Please plan a {length} to {destination} for {travelers} traveler(s), from {start} to {end}. \
         They are working with a {budget} budget and enjoy {interests}. \
         They also mentioned {special_requests}.\n\n\
         Write a detailed day-by-day itinerary with the exact places to visit, where to eat, \
         and the activities for each day. Include practical advice on getting around, the costs \
         to expect, and what to watch out for such as safety, scams or weather. \
         It will be sent by email, so make it thorough. \
         Where information is missing, add your own suggestions that match these interests.",
        start = trip.start_date_or_default(),
        end = trip.end_date_or_default(),
        interests = trip.interests_or_default(),
    )
}

/// Deterministic itinerary built only from local fields
pub fn fallback_itinerary(destination: &str, duration: &TripDuration) -> String {
    format!(
        "Here's a generic itinerary for your trip to {}:\n\n\
         For {} days, we recommend exploring local landmarks, \
         enjoying regional cuisine, and relaxing at popular spots.",
        destination, duration
    )
}
