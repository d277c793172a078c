// src/services/completion_client.rs
// DOCUMENTATION: OpenAI-compatible chat completion client (DeepSeek by default)
// PURPOSE: Turn an itinerary prompt into generated text

use crate::errors::GuideError;
use crate::services::CompletionBackend;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Instant;

pub struct ChatCompletionClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionClient {
    pub fn new(api_key: String, base_url: String, model: String, temperature: f32) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            temperature,
        }
    }
}

/// First non-empty choice content
fn first_content(response: ChatResponse) -> Result<String, GuideError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| GuideError::ExternalApiError("Completion returned no content".to_string()))
}

#[async_trait]
impl CompletionBackend for ChatCompletionClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, GuideError> {
        if self.api_key.is_empty() {
            return Err(GuideError::ConfigurationError(
                "completion API key not configured".to_string(),
            ));
        }

        let start = Instant::now();
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.temperature,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Completion request failed: {}", e);
                GuideError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GuideError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Completion API error {}: {}", status, body);
            return Err(GuideError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GuideError::ExternalApiError(format!("Parse error: {}", e)))?;

        let content = first_content(parsed)?;

        log::debug!(
            "Chat completion with {} took {}ms",
            self.model,
            start.elapsed().as_millis()
        );

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_content() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "## Day 1\nVisit the old town."}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }))
        .unwrap();

        assert_eq!(first_content(response).unwrap(), "## Day 1\nVisit the old town.");
    }

    #[test]
    fn test_empty_choices_is_error() {
        let response: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            first_content(response),
            Err(GuideError::ExternalApiError(_))
        ));
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "deepseek-chat",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.7,
            stream: false,
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["stream"], json!(false));
        assert_eq!(body["messages"][0]["role"], json!("user"));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let client = ChatCompletionClient::new(
            String::new(),
            "https://api.deepseek.com/".to_string(),
            "deepseek-chat".to_string(),
            0.7,
        );

        let result = client.complete("system", "prompt").await;
        assert!(matches!(result, Err(GuideError::ConfigurationError(_))));
    }
}
