// src/services/firecrawl_client.rs
// DOCUMENTATION: Firecrawl scrape-and-extract client
// PURPOSE: Ask Firecrawl to render a page and extract one schema-shaped object from it

use crate::errors::GuideError;
use crate::services::ExtractionBackend;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";

pub struct FirecrawlClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'static str; 1],
    extract: ExtractOptions<'a>,
}

#[derive(Serialize)]
struct ExtractOptions<'a> {
    schema: &'a Value,
    #[serde(rename = "systemPrompt")]
    system_prompt: &'a str,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    data: Option<ScrapeData>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ScrapeData {
    extract: Option<Value>,
}

impl FirecrawlClient {
    /// Fails with ConfigurationError when no API key is available
    pub fn new(api_key: impl Into<String>) -> Result<Self, GuideError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GuideError::ConfigurationError(
                "FIRECRAWL_API_KEY is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| GuideError::InternalError(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: FIRECRAWL_API_URL.to_string(),
        })
    }
}

/// Extracted object from a scrape response, None when absent, null or empty
fn extracted_value(response: ScrapeResponse) -> Result<Option<Value>, GuideError> {
    if !response.success {
        return Err(GuideError::ExternalApiError(format!(
            "Firecrawl scrape failed: {}",
            response.error.unwrap_or_else(|| "unknown error".to_string())
        )));
    }

    Ok(response
        .data
        .and_then(|data| data.extract)
        .filter(|value| match value {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            _ => true,
        }))
}

#[async_trait]
impl ExtractionBackend for FirecrawlClient {
    async fn extract(
        &self,
        url: &str,
        schema: &Value,
        system_prompt: &str,
    ) -> Result<Option<Value>, GuideError> {
        let start = Instant::now();
        let request = ScrapeRequest {
            url,
            formats: ["extract"],
            extract: ExtractOptions {
                schema,
                system_prompt,
            },
        };

        let response = self
            .client
            .post(format!("{}/scrape", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GuideError::ExternalApiError(format!("Firecrawl request failed: {}", e)))?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(GuideError::ConfigurationError(format!(
                    "Firecrawl rejected the API key ({})",
                    status
                )));
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(GuideError::RateLimitExceeded),
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(GuideError::ExternalApiError(format!(
                    "Firecrawl error {}: {}",
                    status, body
                )));
            }
            _ => {}
        }

        let parsed: ScrapeResponse = response
            .json()
            .await
            .map_err(|e| GuideError::ExternalApiError(format!("Parse error: {}", e)))?;

        log::debug!(
            "Firecrawl extract for {} took {}ms",
            url,
            start.elapsed().as_millis()
        );

        extracted_value(parsed)
    }
}
