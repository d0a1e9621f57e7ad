//! Static extension/MIME mappings for image inputs.

use std::path::Path;

/// MIME type for a file, keyed on extension alone.
///
/// Unrecognized or missing extensions fall back to `image/jpeg` rather than
/// failing: the API tolerates a wrong-but-plausible type better than the
/// tool refusing a request.
pub fn for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("gif") => "image/gif",
        other => {
            tracing::warn!(
                "Could not determine MIME type for {} (extension {:?}), attempting image/jpeg",
                path.display(),
                other
            );
            "image/jpeg"
        }
    }
}

/// File extension for a server-reported Content-Type, used when a URL path
/// carries no extension of its own.
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    let lower = content_type.to_ascii_lowercase();
    if lower.contains("jpeg") || lower.contains("jpg") {
        "jpg"
    } else if lower.contains("png") {
        "png"
    } else if lower.contains("webp") {
        "webp"
    } else {
        "jpg"
    }
}
