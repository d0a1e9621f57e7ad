//! Gemini `generateContent` payload types.

use serde::{Deserialize, Serialize};

/// Content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 inline payload carrying image data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Top-level `generateContent` request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
    pub candidate_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,
}

/// Top-level `generateContent` response envelope.
///
/// An absent or empty candidate list is a valid empty result, not a parse
/// error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One alternative generated output.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_without_candidates_field_parses_empty() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.candidates.is_empty());
    }

    #[test]
    fn test_untagged_part_decoding() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "some commentary" },
                        { "inlineData": { "mimeType": "image/png", "data": "QUJD" } }
                    ]
                }
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let parts = &response.candidates[0].content.parts;
        assert!(matches!(&parts[0], Part::Text { text } if text == "some commentary"));
        assert!(matches!(
            &parts[1],
            Part::InlineData { inline_data } if inline_data.mime_type == "image/png"
        ));
    }

    #[test]
    fn test_generation_config_serializes_camel_case() {
        let config = GenerationConfig {
            response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            candidate_count: 1,
            image_config: Some(ImageConfig {
                aspect_ratio: "16:9".to_string(),
            }),
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"responseModalities\""));
        assert!(json.contains("\"candidateCount\":1"));
        assert!(json.contains("\"aspectRatio\":\"16:9\""));
    }
}
