//! Response handling and output persistence.
//!
//! Walks the first candidate's parts in order, writing image payloads to the
//! output path and collecting text parts as commentary. Scanning never
//! short-circuits: text after an image is still collected, and a later image
//! part overwrites the earlier write.

use crate::api::types::{GenerateContentResponse, Part};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// What an invocation produced, beyond the exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An image payload was written to the output path.
    ImageWritten(PathBuf),
    /// The response carried no candidates at all.
    EmptyNoCandidates,
    /// A candidate came back, but none of its parts carried image data.
    EmptyNoImage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled {
    pub outcome: Outcome,
    /// Text parts returned alongside (or instead of) the image.
    pub commentary: Vec<String>,
}

pub fn handle(response: &GenerateContentResponse, output_path: &Path) -> Result<Handled> {
    use base64::Engine as _;

    let Some(candidate) = response.candidates.first() else {
        return Ok(Handled {
            outcome: Outcome::EmptyNoCandidates,
            commentary: Vec::new(),
        });
    };

    let mut commentary = Vec::new();
    let mut written = None;

    for part in &candidate.content.parts {
        match part {
            Part::InlineData { inline_data } if !inline_data.data.is_empty() => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(&inline_data.data)
                    .map_err(|e| {
                        Error::Provider(format!("Failed to decode inline image data: {}", e))
                    })?;

                std::fs::write(output_path, &bytes).map_err(|source| Error::Write {
                    path: output_path.to_path_buf(),
                    source,
                })?;

                tracing::info!(
                    "Output image saved to {} ({} bytes)",
                    output_path.display(),
                    bytes.len()
                );
                written = Some(output_path.to_path_buf());
            }
            Part::InlineData { .. } => {
                tracing::warn!("Skipping inline part with empty payload");
            }
            Part::Text { text } => commentary.push(text.clone()),
        }
    }

    let outcome = match written {
        Some(path) => Outcome::ImageWritten(path),
        None => Outcome::EmptyNoImage,
    };

    Ok(Handled {
        outcome,
        commentary,
    })
}
