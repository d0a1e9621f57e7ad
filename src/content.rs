//! Request content assembly.
//!
//! Each subcommand declares an ordered list of image slots; the assembler
//! resolves the present ones in declaration order and appends the prompt as
//! the final part. A failed resolution aborts the whole request before any
//! later slot is touched.

use crate::locator::ImageSource;
use crate::{Error, Result};

/// One atomic unit of the request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    Image {
        bytes: Vec<u8>,
        mime_type: &'static str,
    },
}

/// A named input position declared by a subcommand.
#[derive(Debug, Clone)]
pub struct Slot {
    pub name: &'static str,
    pub reference: Option<String>,
}

impl Slot {
    pub fn filled(name: &'static str, reference: String) -> Self {
        Self {
            name,
            reference: Some(reference),
        }
    }

    pub fn maybe(name: &'static str, reference: Option<String>) -> Self {
        Self { name, reference }
    }
}

/// Resolve every present slot in order and append the prompt last.
///
/// `require_image` enforces the compose-style precondition that at least one
/// of the optional slots is filled, before any generation call is made.
pub async fn assemble(
    source: &dyn ImageSource,
    slots: &[Slot],
    prompt: &str,
    require_image: bool,
) -> Result<Vec<ContentPart>> {
    let mut parts = Vec::with_capacity(slots.len() + 1);

    for slot in slots {
        let Some(reference) = &slot.reference else {
            continue;
        };

        let resolved = source.resolve(reference).await?;
        let bytes = std::fs::read(&resolved.path)?;
        tracing::info!(
            "Loaded {} ({} bytes) as {}",
            slot.name,
            bytes.len(),
            resolved.mime_type
        );
        parts.push(ContentPart::Image {
            bytes,
            mime_type: resolved.mime_type,
        });
    }

    if require_image && parts.is_empty() {
        return Err(Error::InvalidReference(
            "at least one input image is required for this mode".to_string(),
        ));
    }

    parts.push(ContentPart::Text(prompt.to_string()));
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::MockImageSource;

    fn image_mimes(parts: &[ContentPart]) -> Vec<&'static str> {
        parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Image { mime_type, .. } => Some(*mime_type),
                ContentPart::Text(_) => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_prompt_only_assembly() {
        let source = MockImageSource::new();
        let parts = assemble(&source, &[], "a castle at dusk", false)
            .await
            .unwrap();

        assert_eq!(parts, vec![ContentPart::Text("a castle at dusk".to_string())]);
    }

    #[tokio::test]
    async fn test_images_precede_prompt_in_slot_order() {
        let source = MockImageSource::new()
            .with_image("a.png", b"A".to_vec())
            .with_image("b.jpg", b"B".to_vec())
            .with_image("c.webp", b"C".to_vec());

        let slots = vec![
            Slot::filled("input_file1", "a.png".to_string()),
            Slot::filled("input_file2", "b.jpg".to_string()),
            Slot::filled("input_file3", "c.webp".to_string()),
        ];

        let parts = assemble(&source, &slots, "combine these", true)
            .await
            .unwrap();

        assert_eq!(parts.len(), 4);
        assert_eq!(
            image_mimes(&parts),
            vec!["image/png", "image/jpeg", "image/webp"]
        );
        assert_eq!(
            parts[0],
            ContentPart::Image {
                bytes: b"A".to_vec(),
                mime_type: "image/png"
            }
        );
        assert_eq!(parts[3], ContentPart::Text("combine these".to_string()));
    }

    #[tokio::test]
    async fn test_absent_slots_are_skipped_without_gaps() {
        let source = MockImageSource::new().with_image("b.png", b"B".to_vec());

        let slots = vec![
            Slot::maybe("input_file1", None),
            Slot::maybe("input_file2", Some("b.png".to_string())),
            Slot::maybe("input_file3", None),
        ];

        let parts = assemble(&source, &slots, "compose", true).await.unwrap();

        assert_eq!(
            parts,
            vec![
                ContentPart::Image {
                    bytes: b"B".to_vec(),
                    mime_type: "image/png"
                },
                ContentPart::Text("compose".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_aborts_before_later_slots() {
        let source = MockImageSource::new()
            .with_image("a.png", b"A".to_vec())
            .with_not_found("missing.png")
            .with_image("c.png", b"C".to_vec());

        let slots = vec![
            Slot::filled("input_file1", "a.png".to_string()),
            Slot::filled("input_file2", "missing.png".to_string()),
            Slot::filled("input_file3", "c.png".to_string()),
        ];

        let err = assemble(&source, &slots, "compose", true)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
        // Slot 3 was never attempted.
        assert_eq!(source.resolved_references(), vec!["a.png", "missing.png"]);
    }

    #[tokio::test]
    async fn test_reported_error_is_the_failing_slots_error() {
        let source = MockImageSource::new()
            .with_download_failure("https://host/a.png", "connection reset");

        let slots = vec![Slot::filled("input_file", "https://host/a.png".to_string())];

        let err = assemble(&source, &slots, "edit", false).await.unwrap_err();
        match err {
            Error::Download(message) => assert_eq!(message, "connection reset"),
            other => panic!("expected Download error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_all_slots_empty_with_required_image_fails() {
        let source = MockImageSource::new();
        let slots = vec![
            Slot::maybe("input_file1", None),
            Slot::maybe("input_file2", None),
            Slot::maybe("input_file3", None),
        ];

        let err = assemble(&source, &slots, "compose", true).await.unwrap_err();
        assert!(matches!(err, Error::InvalidReference(_)));
        assert!(source.resolved_references().is_empty());
    }
}
