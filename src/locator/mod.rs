//! Input reference resolution
//!
//! Turns a caller-supplied reference string (local path, HTTP(S) URL, or
//! `s3://bucket/key` object path) into a readable local file with an
//! inferred MIME type, downloading into a per-invocation staging directory
//! when necessary.

pub mod http;
pub mod mime;
pub mod mock;
pub mod store;

pub use mock::MockImageSource;

use crate::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tempfile::TempDir;

const OBJECT_STORE_PREFIX: &str = "s3://";

/// What kind of reference a string is. Decided by prefix alone, never by
/// filesystem or network state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Filesystem path, possibly starting with `~`.
    Local(String),
    /// Explicit `http://` or `https://` URL.
    Http(String),
    /// Remainder after the `s3://` prefix; bucket/key split happens at
    /// fetch time.
    ObjectStore(String),
}

pub fn classify(reference: &str) -> ReferenceKind {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        ReferenceKind::Http(reference.to_string())
    } else if let Some(rest) = reference.strip_prefix(OBJECT_STORE_PREFIX) {
        ReferenceKind::ObjectStore(rest.to_string())
    } else {
        ReferenceKind::Local(reference.to_string())
    }
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_home(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// A reference resolved to a readable local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub path: PathBuf,
    pub mime_type: &'static str,
}

#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn resolve(&self, reference: &str) -> Result<ResolvedImage>;
}

/// Resolves references against the real filesystem, HTTP, and S3.
///
/// Downloads are staged in a private temp directory owned by the resolver,
/// removed when it is dropped at the end of the invocation.
pub struct Resolver {
    http: reqwest::Client,
    store: store::StoreClient,
    staging: TempDir,
}

impl Resolver {
    pub fn new() -> Result<Self> {
        Self::new_with_client(reqwest::Client::new())
    }

    pub fn new_with_client(client: reqwest::Client) -> Result<Self> {
        Ok(Self {
            http: client,
            store: store::StoreClient::new(),
            staging: tempfile::tempdir()?,
        })
    }

    fn resolve_local(&self, raw: &str) -> Result<ResolvedImage> {
        let path = expand_home(raw);
        if !path.exists() {
            return Err(Error::NotFound(path));
        }
        Ok(ResolvedImage {
            mime_type: mime::for_path(&path),
            path,
        })
    }

    #[cfg(test)]
    pub(crate) fn staging_path(&self) -> &std::path::Path {
        self.staging.path()
    }
}

#[async_trait]
impl ImageSource for Resolver {
    async fn resolve(&self, reference: &str) -> Result<ResolvedImage> {
        match classify(reference) {
            ReferenceKind::Local(raw) => self.resolve_local(&raw),
            ReferenceKind::Http(url) => http::fetch(&self.http, &url, self.staging.path()).await,
            ReferenceKind::ObjectStore(rest) => {
                self.store.fetch(&rest, self.staging.path()).await
            }
        }
    }
}
