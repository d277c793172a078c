// src/services/testing.rs
// DOCUMENTATION: Fake collaborators for unit and handler tests
// PURPOSE: Scriptable stand-ins for the maps, completion, extraction, mail and store seams

use crate::db::GuideStore;
use crate::errors::GuideError;
use crate::models::ItineraryResult;
use crate::services::google_maps_client::{DirectionsRequest, DirectionsRoute, GooglePlace};
use crate::services::{CompletionBackend, ExtractionBackend, Mailer, MapsProvider, OutgoingEmail};
use async_trait::async_trait;
use geo_types::Point;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

// =============================================================================
// Maps
// =============================================================================

pub struct FakeMaps {
    geocode: Result<Option<Point<f64>>, GuideError>,
    nearby: Result<Vec<GooglePlace>, GuideError>,
    details: HashMap<String, Result<Option<GooglePlace>, GuideError>>,
    routes: Result<Vec<DirectionsRoute>, GuideError>,
    pub geocode_calls: Mutex<Vec<String>>,
    pub nearby_radii: Mutex<Vec<u32>>,
    pub details_calls: Mutex<Vec<String>>,
    pub directions_calls: Mutex<Vec<DirectionsRequest>>,
}

impl FakeMaps {
    pub fn new() -> Self {
        Self {
            geocode: Ok(None),
            nearby: Ok(Vec::new()),
            details: HashMap::new(),
            routes: Ok(Vec::new()),
            geocode_calls: Mutex::new(Vec::new()),
            nearby_radii: Mutex::new(Vec::new()),
            details_calls: Mutex::new(Vec::new()),
            directions_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_geocode(mut self, result: Result<Option<Point<f64>>, GuideError>) -> Self {
        self.geocode = result;
        self
    }

    pub fn with_nearby(mut self, result: Result<Vec<GooglePlace>, GuideError>) -> Self {
        self.nearby = result;
        self
    }

    pub fn with_details(
        mut self,
        place_id: &str,
        result: Result<Option<GooglePlace>, GuideError>,
    ) -> Self {
        self.details.insert(place_id.to_string(), result);
        self
    }

    pub fn with_routes(mut self, result: Result<Vec<DirectionsRoute>, GuideError>) -> Self {
        self.routes = result;
        self
    }
}

#[async_trait]
impl MapsProvider for FakeMaps {
    async fn geocode(&self, address: &str) -> Result<Option<Point<f64>>, GuideError> {
        self.geocode_calls.lock().unwrap().push(address.to_string());
        self.geocode.clone()
    }

    async fn nearby_search(
        &self,
        _center: Point<f64>,
        radius: u32,
        _place_type: &str,
    ) -> Result<Vec<GooglePlace>, GuideError> {
        self.nearby_radii.lock().unwrap().push(radius);
        self.nearby.clone()
    }

    async fn place_details(&self, place_id: &str) -> Result<Option<GooglePlace>, GuideError> {
        self.details_calls.lock().unwrap().push(place_id.to_string());
        self.details.get(place_id).cloned().unwrap_or(Ok(None))
    }

    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<DirectionsRoute>, GuideError> {
        self.directions_calls.lock().unwrap().push(request.clone());
        self.routes.clone()
    }

    fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        format!("https://photos.test/{}?w={}", photo_reference, max_width)
    }
}

// =============================================================================
// Completion
// =============================================================================

pub struct FakeCompletion {
    response: Result<String, GuideError>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeCompletion {
    pub fn replying(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GuideError) -> Self {
        Self {
            response: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionBackend for FakeCompletion {
    async fn complete(&self, _system_prompt: &str, user_prompt: &str) -> Result<String, GuideError> {
        self.prompts.lock().unwrap().push(user_prompt.to_string());
        self.response.clone()
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Replays queued responses in order, then yields Ok(None)
pub struct FakeExtraction {
    responses: Mutex<Vec<Result<Option<Value>, GuideError>>>,
    pub urls: Mutex<Vec<String>>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeExtraction {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            urls: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn then(self, response: Result<Option<Value>, GuideError>) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn call_count(&self) -> usize {
        self.urls.lock().unwrap().len()
    }
}

#[async_trait]
impl ExtractionBackend for FakeExtraction {
    async fn extract(
        &self,
        url: &str,
        _schema: &Value,
        system_prompt: &str,
    ) -> Result<Option<Value>, GuideError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.prompts.lock().unwrap().push(system_prompt.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(None)
        } else {
            responses.remove(0)
        }
    }
}

// =============================================================================
// Mail
// =============================================================================

pub struct FakeMailer {
    fail: bool,
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl FakeMailer {
    pub fn new() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), GuideError> {
        if self.fail {
            return Err(GuideError::ExternalApiError("mail transport unreachable".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// =============================================================================
// Guide store
// =============================================================================

pub struct FakeGuideStore {
    fail: bool,
    pub saved: Mutex<Vec<(String, ItineraryResult)>>,
}

impl FakeGuideStore {
    pub fn new() -> Self {
        Self {
            fail: false,
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn saved_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

#[async_trait]
impl GuideStore for FakeGuideStore {
    async fn save(&self, user_id: &str, guide: &ItineraryResult) -> Result<Uuid, GuideError> {
        if self.fail {
            return Err(GuideError::DatabaseError("connection refused".to_string()));
        }
        self.saved
            .lock()
            .unwrap()
            .push((user_id.to_string(), guide.clone()));
        Ok(Uuid::new_v4())
    }
}
