//! Lightweight Gemini REST client.

use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::{Error, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID, not a `models/...`-prefixed path
    /// segment.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: Client) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One synchronous `generateContent` call: exactly one response or one
    /// classified error. Retrying is the caller's concern.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Gemini API error (status {}): {}", status, error_text);
            return Err(classify_api_error(status, &error_text));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            Error::Provider(format!("Failed to parse Gemini response: {}", e))
        })
    }
}

/// Map a non-success API status to the error taxonomy. Only results that
/// indicate temporary unavailability come back as transient.
fn classify_api_error(status: StatusCode, body: &str) -> Error {
    let detail = format!("status {}: {}", status, body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Permission(detail),
        StatusCode::NOT_FOUND => Error::ModelOrRegion(detail),
        StatusCode::TOO_MANY_REQUESTS => Error::ServiceUnavailable(detail),
        status if status.is_server_error() => Error::ServiceUnavailable(detail),
        _ => {
            let lower = body.to_ascii_lowercase();
            if lower.contains("temporarily unavailable") || lower.contains("overloaded") {
                Error::ServiceUnavailable(detail)
            } else {
                Error::Provider(detail)
            }
        }
    }
}
