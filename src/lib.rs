//! bujo — turns scanned bullet-journal pages into canonical journal entries.
//!
//! This crate wires the two library crates together so that the binary and
//! integration tests can run a full scan with one call.
//!
//! # Architecture
//!
//! ```text
//! ScanInput ──► bujo_core::Pipeline ──► Vec<Entry>
//!                       ▲
//! ImageHandle ──► bujo_media::ImageMetadataEstimator
//! ```
//!
//! Image metadata is the only I/O; it runs under the configured timeout and
//! degrades to unknown metadata instead of failing the scan.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::io::AsyncReadExt;

pub use bujo_core::{Config, Entry, Pipeline, ScanInput};
pub use bujo_media::{ImageHandle, ImageMetadataEstimator, NoPhotoLibrary, PhotoLibrary};

/// Failures reading a scan before any processing happens.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("provider payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Runs scans end to end: image metadata, then the entry pipeline.
#[derive(Debug, Clone)]
pub struct Scanner {
    pipeline: Pipeline,
    estimator: ImageMetadataEstimator,
}

impl Scanner {
    pub fn new(config: Config, library: Arc<dyn PhotoLibrary>) -> Self {
        let estimator = ImageMetadataEstimator::new(config.estimator.clone(), library);
        Self {
            pipeline: Pipeline::new(config),
            estimator,
        }
    }

    pub async fn scan(&self, input: &ScanInput, image: Option<&ImageHandle>) -> Vec<Entry> {
        self.scan_at(input, image, Local::now()).await
    }

    /// [`Scanner::scan`] against a fixed clock.
    pub async fn scan_at(
        &self,
        input: &ScanInput,
        image: Option<&ImageHandle>,
        now: DateTime<Local>,
    ) -> Vec<Entry> {
        let metadata = match image {
            Some(handle) => Some(self.estimator.estimate_with_timeout(handle, now).await),
            None => None,
        };
        let entries = self.pipeline.process_at(input, metadata.as_ref(), now);
        tracing::debug!(count = entries.len(), "scan complete");
        entries
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(Config::defaults(), Arc::new(NoPhotoLibrary))
    }
}

/// Build a [`ScanInput`] from raw text. With a provider name the text must
/// be a JSON payload, optionally inside a Markdown code fence.
pub fn scan_input_from_str(raw: &str, provider: Option<&str>) -> Result<ScanInput, ScanError> {
    let Some(provider) = provider else {
        return Ok(ScanInput::RawText(raw.to_string()));
    };
    let payload = match serde_json::from_str(raw) {
        Ok(payload) => payload,
        // Fenced payloads are unwrapped by the pipeline.
        Err(_) if raw.trim_start().starts_with("```") => serde_json::Value::String(raw.to_string()),
        Err(err) => return Err(err.into()),
    };
    Ok(ScanInput::Provider {
        provider: provider.to_string(),
        payload,
    })
}

/// Read scan input from `path`, or from stdin when `path` is `None`.
pub async fn read_input(path: Option<&Path>) -> Result<String, ScanError> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ScanError::Read {
                path: path.display().to_string(),
                source,
            }),
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .map_err(|source| ScanError::Read {
                    path: "<stdin>".into(),
                    source,
                })?;
            Ok(raw)
        }
    }
}
