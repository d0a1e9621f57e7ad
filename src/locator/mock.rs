use super::{mime, ImageSource, ResolvedImage};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

enum Scripted {
    Image(Vec<u8>),
    NotFound,
    Download(String),
    InvalidReference(String),
}

/// Scripted image source for assembler and app tests.
///
/// Scripted bytes are written to real files in a private temp dir so callers
/// exercising the read path see the same behavior as with [`super::Resolver`].
#[derive(Clone)]
pub struct MockImageSource {
    staging: Arc<TempDir>,
    scripted: Arc<Mutex<HashMap<String, Scripted>>>,
    resolved: Arc<Mutex<Vec<String>>>,
}

impl MockImageSource {
    pub fn new() -> Self {
        Self {
            staging: Arc::new(tempfile::tempdir().expect("create mock staging dir")),
            scripted: Arc::new(Mutex::new(HashMap::new())),
            resolved: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image(self, reference: &str, bytes: Vec<u8>) -> Self {
        self.scripted
            .lock()
            .unwrap()
            .insert(reference.to_string(), Scripted::Image(bytes));
        self
    }

    pub fn with_not_found(self, reference: &str) -> Self {
        self.scripted
            .lock()
            .unwrap()
            .insert(reference.to_string(), Scripted::NotFound);
        self
    }

    pub fn with_download_failure(self, reference: &str, message: &str) -> Self {
        self.scripted
            .lock()
            .unwrap()
            .insert(reference.to_string(), Scripted::Download(message.to_string()));
        self
    }

    pub fn with_invalid_reference(self, reference: &str, message: &str) -> Self {
        self.scripted.lock().unwrap().insert(
            reference.to_string(),
            Scripted::InvalidReference(message.to_string()),
        );
        self
    }

    /// References passed to `resolve`, in call order.
    pub fn resolved_references(&self) -> Vec<String> {
        self.resolved.lock().unwrap().clone()
    }
}

impl Default for MockImageSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageSource for MockImageSource {
    async fn resolve(&self, reference: &str) -> Result<ResolvedImage> {
        self.resolved.lock().unwrap().push(reference.to_string());

        let scripted = self.scripted.lock().unwrap();
        match scripted.get(reference) {
            Some(Scripted::Image(bytes)) => {
                let filename = reference
                    .rsplit('/')
                    .find(|s| !s.is_empty())
                    .unwrap_or("image.png");
                let path = self.staging.path().join(filename);
                std::fs::write(&path, bytes)?;
                Ok(ResolvedImage {
                    mime_type: mime::for_path(&path),
                    path,
                })
            }
            Some(Scripted::NotFound) | None => Err(Error::NotFound(PathBuf::from(reference))),
            Some(Scripted::Download(message)) => Err(Error::Download(message.clone())),
            Some(Scripted::InvalidReference(message)) => {
                Err(Error::InvalidReference(message.clone()))
            }
        }
    }
}
