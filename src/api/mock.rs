use super::types::{Candidate, Content, GenerateContentResponse, InlineData, Part};
use super::GenerationService;
use crate::content::ContentPart;
use crate::models::GenerationOptions;
use crate::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Response with a single candidate carrying one inline image part.
pub fn image_response(bytes: &[u8]) -> GenerateContentResponse {
    use base64::Engine as _;

    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Content {
                role: Some("model".to_string()),
                parts: vec![Part::InlineData {
                    inline_data: InlineData {
                        mime_type: "image/png".to_string(),
                        data: base64::engine::general_purpose::STANDARD.encode(bytes),
                    },
                }],
            },
        }],
    }
}

/// Response with a single candidate carrying only text.
pub fn text_response(text: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Content {
                role: Some("model".to_string()),
                parts: vec![Part::Text {
                    text: text.to_string(),
                }],
            },
        }],
    }
}

/// Response with no candidates at all.
pub fn empty_response() -> GenerateContentResponse {
    GenerateContentResponse { candidates: vec![] }
}

#[derive(Clone)]
pub struct MockGenerationClient {
    responses: Arc<Mutex<Vec<GenerateContentResponse>>>,
    calls: Arc<Mutex<Vec<(Vec<ContentPart>, GenerationOptions)>>>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: GenerateContentResponse) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_image_response(self, bytes: &[u8]) -> Self {
        let response = image_response(bytes);
        self.with_response(response)
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Parts and options of every call, in call order.
    pub fn recorded_calls(&self) -> Vec<(Vec<ContentPart>, GenerationOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationService for MockGenerationClient {
    async fn generate(
        &self,
        parts: &[ContentPart],
        options: &GenerationOptions,
    ) -> Result<GenerateContentResponse> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((parts.to_vec(), options.clone()));
        let count = calls.len();
        drop(calls);

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default: a tiny PNG payload.
            Ok(image_response(&[0x89, 0x50, 0x4E, 0x47]))
        } else {
            let index = (count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AspectRatio;

    #[tokio::test]
    async fn test_mock_cycles_configured_responses() {
        let client = MockGenerationClient::new()
            .with_response(text_response("first"))
            .with_response(text_response("second"));

        let options = GenerationOptions::default();
        let parts = vec![ContentPart::Text("p".to_string())];

        for expected in ["first", "second", "first"] {
            let response = client.generate(&parts, &options).await.unwrap();
            assert!(matches!(
                &response.candidates[0].content.parts[0],
                Part::Text { text } if text == expected
            ));
        }
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_records_parts_and_options() {
        let client = MockGenerationClient::new();
        let options = GenerationOptions::new(AspectRatio::Square);
        let parts = vec![
            ContentPart::Image {
                bytes: vec![1, 2],
                mime_type: "image/png",
            },
            ContentPart::Text("prompt".to_string()),
        ];

        client.generate(&parts, &options).await.unwrap();

        let calls = client.recorded_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, parts);
        assert_eq!(calls[0].1.aspect_ratio, AspectRatio::Square);
    }
}
