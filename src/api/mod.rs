//! Gemini API integration for image generation
//!
//! A thin REST client plus a retrying executor behind the
//! [`GenerationService`] seam, so the application layer and tests can swap
//! in a mock.

pub mod client;
pub mod generate;
pub mod mock;
pub mod types;

pub use generate::GeminiGenerator;
pub use mock::MockGenerationClient;

use crate::content::ContentPart;
use crate::models::GenerationOptions;
use crate::Result;
use async_trait::async_trait;
use types::GenerateContentResponse;

#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(
        &self,
        parts: &[ContentPart],
        options: &GenerationOptions,
    ) -> Result<GenerateContentResponse>;
}
