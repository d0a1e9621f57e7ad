//! HTTP(S) reference download.

use super::{mime, ResolvedImage};
use crate::{Error, Result};
use std::path::Path;

/// Download `url` into the staging directory.
///
/// The local filename is taken from the URL's last path segment; when that
/// segment has no extension, a preliminary HEAD request supplies the
/// Content-Type to pick one.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    staging: &Path,
) -> Result<ResolvedImage> {
    let parsed =
        reqwest::Url::parse(url).map_err(|e| Error::Download(format!("{}: {}", url, e)))?;

    let mut filename = parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty())
        .unwrap_or("download")
        .to_string();

    if Path::new(&filename).extension().is_none() {
        let content_type = probe_content_type(client, url).await?;
        tracing::debug!(
            "No extension on {}, server reports Content-Type {:?}",
            filename,
            content_type
        );
        filename = format!(
            "{}.{}",
            filename,
            mime::extension_for_content_type(&content_type)
        );
    }

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Download(format!("{}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(Error::Download(format!(
            "{}: HTTP status {}",
            url,
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Download(format!("{}: {}", url, e)))?;

    let path = staging.join(&filename);
    std::fs::write(&path, &bytes)?;
    tracing::info!("Downloaded {} ({} bytes)", filename, bytes.len());

    Ok(ResolvedImage {
        mime_type: mime::for_path(&path),
        path,
    })
}

async fn probe_content_type(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .head(url)
        .send()
        .await
        .map_err(|e| Error::Download(format!("{}: {}", url, e)))?;

    Ok(response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string())
}
