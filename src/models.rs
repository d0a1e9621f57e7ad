//! Data models and structures
//!
//! Defines the aspect ratio and generation option types shared between the
//! CLI layer and the Gemini API client, plus environment configuration.

use crate::{Error, Result};

/// Output aspect ratios accepted by the image model.
///
/// The set is fixed by the API; anything else is rejected during argument
/// parsing, before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    UltraWide,  // 21:9
    Widescreen, // 16:9
    Landscape,  // 4:3
    Classic,    // 3:2
    Square,     // 1:1
    Vertical,   // 9:16
    Portrait,   // 3:4
    ClassicPortrait, // 2:3
    LargeFormat,     // 5:4
    LargeFormatPortrait, // 4:5
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 10] = [
        AspectRatio::UltraWide,
        AspectRatio::Widescreen,
        AspectRatio::Landscape,
        AspectRatio::Classic,
        AspectRatio::Square,
        AspectRatio::Vertical,
        AspectRatio::Portrait,
        AspectRatio::ClassicPortrait,
        AspectRatio::LargeFormat,
        AspectRatio::LargeFormatPortrait,
    ];

    /// The wire form sent in `imageConfig.aspectRatio`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::UltraWide => "21:9",
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Classic => "3:2",
            AspectRatio::Square => "1:1",
            AspectRatio::Vertical => "9:16",
            AspectRatio::Portrait => "3:4",
            AspectRatio::ClassicPortrait => "2:3",
            AspectRatio::LargeFormat => "5:4",
            AspectRatio::LargeFormatPortrait => "4:5",
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Widescreen
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == input)
            .ok_or_else(|| {
                let accepted: Vec<&str> = AspectRatio::ALL.iter().map(|r| r.as_str()).collect();
                format!(
                    "Invalid aspect ratio '{}'. Expected one of: {}",
                    input,
                    accepted.join(", ")
                )
            })
    }
}

/// Per-request generation settings.
///
/// `candidate_count` stays at 1: the tool writes a single output image, so
/// extra candidates would only be discarded.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub aspect_ratio: AspectRatio,
    pub candidate_count: u32,
    pub response_modalities: Vec<String>,
}

impl GenerationOptions {
    pub fn new(aspect_ratio: AspectRatio) -> Self {
        Self {
            aspect_ratio,
            candidate_count: 1,
            response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::new(AspectRatio::default())
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub project: Option<String>,
    pub model: String,
}

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| Error::Initialization("GEMINI_API_KEY not set".to_string()))?;

        let project = std::env::var("GOOGLE_CLOUD_PROJECT").ok();
        if project.is_none() {
            tracing::warn!("GOOGLE_CLOUD_PROJECT environment variable not set");
        }

        let model =
            std::env::var("GEMINI_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            project,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_aspect_ratio_accepts_every_supported_value() {
        for expected in ["21:9", "16:9", "4:3", "3:2", "1:1", "9:16", "3:4", "2:3", "5:4", "4:5"] {
            let ratio = AspectRatio::from_str(expected).unwrap();
            assert_eq!(ratio.as_str(), expected);
        }
    }

    #[test]
    fn test_aspect_ratio_rejects_unknown_value() {
        let err = AspectRatio::from_str("17:10").unwrap_err();
        assert!(err.contains("Invalid aspect ratio"));
        assert!(err.contains("16:9"));
    }

    #[test]
    fn test_default_aspect_ratio_is_widescreen() {
        assert_eq!(AspectRatio::default().as_str(), "16:9");
    }

    #[test]
    fn test_generation_options_request_single_candidate() {
        let options = GenerationOptions::new(AspectRatio::Square);
        assert_eq!(options.candidate_count, 1);
        assert_eq!(options.response_modalities, vec!["TEXT", "IMAGE"]);
    }
}
