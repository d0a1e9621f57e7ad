//! Generation request execution with bounded retry.

use super::client::GeminiClient;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig,
    InlineData, Part,
};
use super::GenerationService;
use crate::content::ContentPart;
use crate::models::{Config, GenerationOptions};
use crate::retry::RetryPolicy;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

const INIT_RETRY: RetryPolicy = RetryPolicy::new(3, Duration::from_millis(500));
const CALL_RETRY: RetryPolicy = RetryPolicy::new(3, Duration::from_secs(1));

pub struct GeminiGenerator {
    http: GeminiClient,
    retry: RetryPolicy,
}

impl GeminiGenerator {
    /// Resolve configuration and build the client once per process.
    ///
    /// Setup failures are retried with backoff; exhausting the bound is
    /// fatal for the invocation.
    pub async fn new() -> Result<Self> {
        let config = INIT_RETRY
            .run(
                || async {
                    let config = Config::from_env()?;
                    tracing::debug!("Resolved configuration for model {}", config.model);
                    Ok(config)
                },
                |error: &Error| {
                    tracing::warn!("Client initialization failed: {}. Will retry...", error);
                    true
                },
            )
            .await
            .map_err(|e| match e {
                already @ Error::Initialization(_) => already,
                other => Error::Initialization(other.to_string()),
            })?;

        Ok(Self::new_with_client(config, reqwest::Client::new()))
    }

    pub fn new_with_client(config: Config, client: reqwest::Client) -> Self {
        if let Some(project) = &config.project {
            tracing::info!("Client initialized for project {}", project);
        }

        Self {
            http: GeminiClient::new_with_client(config.api_key, config.model, client),
            retry: CALL_RETRY,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    /// Override the call retry policy. Tests shrink the delays.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }
}

fn wire_part(part: &ContentPart) -> Part {
    use base64::Engine as _;

    match part {
        ContentPart::Text(text) => Part::Text { text: text.clone() },
        ContentPart::Image { bytes, mime_type } => Part::InlineData {
            inline_data: InlineData {
                mime_type: (*mime_type).to_string(),
                data: base64::engine::general_purpose::STANDARD.encode(bytes),
            },
        },
    }
}

fn build_request(parts: &[ContentPart], options: &GenerationOptions) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: parts.iter().map(wire_part).collect(),
        }],
        generation_config: GenerationConfig {
            response_modalities: options.response_modalities.clone(),
            candidate_count: options.candidate_count,
            image_config: Some(ImageConfig {
                aspect_ratio: options.aspect_ratio.as_str().to_string(),
            }),
        },
    }
}

#[async_trait]
impl GenerationService for GeminiGenerator {
    async fn generate(
        &self,
        parts: &[ContentPart],
        options: &GenerationOptions,
    ) -> Result<GenerateContentResponse> {
        let request = build_request(parts, options);
        tracing::info!("Sending request to Gemini model: {}", self.http.model());

        self.retry
            .run(
                || {
                    let request = request.clone();
                    async move { self.http.generate_content(&request).await }
                },
                |error: &Error| {
                    let transient = error.is_transient();
                    if transient {
                        tracing::warn!("Transient API failure: {}. Will retry...", error);
                    }
                    transient
                },
            )
            .await
    }
}
