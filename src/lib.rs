//! aiphoto - command-line client for Gemini image generation on Vertex AI
//!
//! Submits text prompts and optional reference images (local paths, HTTP(S)
//! URLs, or s3:// object paths) to the Gemini image model and writes the
//! returned image to disk.

pub mod api;
pub mod app;
pub mod cli;
pub mod content;
pub mod error;
pub mod locator;
pub mod models;
pub mod output;
pub mod retry;

pub use error::{Error, Result};
