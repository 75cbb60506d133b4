//! ImageMetadataEstimator — best-effort metadata for a journal photo.
//!
//! Signals, strongest first:
//!
//! - capture time: photo library > file name > file created/modified time
//! - format: photo library > magic bytes > file extension
//!
//! Each lookup fails silently into the next. Batches bound concurrent
//! lookups and give each one a deadline; a lookup that misses it yields
//! [`ImageMetadata::unknown`] for that image only.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use bujo_core::config::EstimatorConfig;
use bujo_core::{ImageMetadata, ImageSource};
use chrono::{DateTime, Local};
use tokio::io::AsyncReadExt;
use tokio::sync::Semaphore;

use crate::error::MetadataError;
use crate::filename::date_from_file_name;
use crate::journal_day::estimate_journal_date;
use crate::library::{NoPhotoLibrary, PhotoAsset, PhotoLibrary};
use crate::source::classify;

/// Bytes read from the head of a file for format sniffing.
const SNIFF_LEN: usize = 8192;

/// An image to estimate metadata for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    /// A `file://` URI, a plain path, or a platform URI (`content://`, `ph://`).
    pub uri: String,
    /// What the caller knows about where the image came from.
    pub source_hint: Option<ImageSource>,
}

impl ImageHandle {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            source_hint: None,
        }
    }

    pub fn with_source(mut self, source: ImageSource) -> Self {
        self.source_hint = Some(source);
        self
    }

    /// Local file path, when the URI names one.
    pub fn path(&self) -> Option<PathBuf> {
        if let Some(path) = self.uri.strip_prefix("file://") {
            return Some(PathBuf::from(path.replace("%20", " ")));
        }
        (!self.uri.contains("://")).then(|| PathBuf::from(&self.uri))
    }

    /// Last path segment, used for file-name conventions and library lookups.
    pub fn file_name(&self) -> Option<String> {
        let segment = self
            .uri
            .rsplit(['/', '\\'])
            .next()
            .filter(|s| !s.is_empty())?;
        let segment = segment.split(['?', '#']).next().unwrap_or(segment);
        Some(segment.replace("%20", " "))
    }
}

#[derive(Debug, Default)]
struct FileStat {
    size: u64,
    created: Option<DateTime<Local>>,
    modified: Option<DateTime<Local>>,
}

async fn stat(path: &Path) -> Result<FileStat, MetadataError> {
    let meta = tokio::fs::metadata(path).await.map_err(|source| MetadataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(FileStat {
        size: meta.len(),
        created: meta.created().ok().map(DateTime::<Local>::from),
        modified: meta.modified().ok().map(DateTime::<Local>::from),
    })
}

async fn sniff_format(path: &Path) -> Option<String> {
    let file = tokio::fs::File::open(path).await.ok()?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64)
        .read_to_end(&mut head)
        .await
        .ok()?;
    infer::get(&head).map(|kind| canonical_format(kind.extension()))
}

fn extension_format(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    (!stem.is_empty() && !ext.is_empty()).then(|| canonical_format(ext))
}

fn canonical_format(raw: &str) -> String {
    match raw.to_ascii_lowercase().as_str() {
        "jpg" | "jpe" => "jpeg".to_string(),
        "tif" => "tiff".to_string(),
        "heics" => "heic".to_string(),
        other => other.to_string(),
    }
}

/// Estimates [`ImageMetadata`] for journal photos.
#[derive(Clone)]
pub struct ImageMetadataEstimator {
    config: EstimatorConfig,
    library: Arc<dyn PhotoLibrary>,
}

impl std::fmt::Debug for ImageMetadataEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageMetadataEstimator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for ImageMetadataEstimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default(), Arc::new(NoPhotoLibrary))
    }
}

impl ImageMetadataEstimator {
    pub fn new(config: EstimatorConfig, library: Arc<dyn PhotoLibrary>) -> Self {
        Self { config, library }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub async fn estimate(&self, handle: &ImageHandle) -> ImageMetadata {
        self.estimate_at(handle, Local::now()).await
    }

    /// Estimate against a fixed clock. Never fails; absent signals are
    /// simply left out.
    pub async fn estimate_at(&self, handle: &ImageHandle, now: DateTime<Local>) -> ImageMetadata {
        let path = handle.path();
        let file_name = handle.file_name();

        let stat = match &path {
            Some(path) => stat(path)
                .await
                .map_err(|err| tracing::debug!(uri = %handle.uri, %err, "file stat unavailable"))
                .ok(),
            None => None,
        };

        let source = classify(&handle.uri, handle.source_hint);
        let asset = if source == ImageSource::Gallery {
            self.lookup_asset(handle, file_name.as_deref()).await
        } else {
            None
        };
        let asset = asset.unwrap_or_default();

        let from_name = file_name
            .as_deref()
            .and_then(|name| date_from_file_name(name, now, self.config.filename_window_days));
        let captured = asset
            .created_at
            .or(from_name)
            .or_else(|| stat.as_ref().and_then(|s| s.created.or(s.modified)));

        let format = match asset.format.clone() {
            Some(format) => Some(canonical_format(&format)),
            None => {
                let sniffed = match (&path, &stat) {
                    (Some(path), Some(_)) => sniff_format(path).await,
                    _ => None,
                };
                sniffed.or_else(|| file_name.as_deref().and_then(extension_format))
            }
        };

        let estimated_journal_date =
            captured.map(|at| estimate_journal_date(at, now, &self.config));
        tracing::debug!(
            uri = %handle.uri,
            source = ?source,
            captured = ?captured,
            journal_date = ?estimated_journal_date,
            "image metadata estimated"
        );

        let created_at = captured.unwrap_or(now);
        ImageMetadata {
            uri: handle.uri.clone(),
            created_at,
            modified_at: stat.as_ref().and_then(|s| s.modified).unwrap_or(created_at),
            file_size: stat.as_ref().map_or(0, |s| s.size),
            width: asset.width,
            height: asset.height,
            format,
            source,
            location: asset.location,
            estimated_journal_date,
        }
    }

    async fn lookup_asset(&self, handle: &ImageHandle, file_name: Option<&str>) -> Option<PhotoAsset> {
        match self.library.find_asset(&handle.uri, file_name).await {
            Ok(asset) => asset,
            Err(err) => {
                tracing::debug!(uri = %handle.uri, %err, "photo library lookup failed");
                None
            }
        }
    }

    /// [`ImageMetadataEstimator::estimate_at`] under the configured deadline.
    pub async fn estimate_with_timeout(
        &self,
        handle: &ImageHandle,
        now: DateTime<Local>,
    ) -> ImageMetadata {
        let deadline = Duration::from_millis(self.config.lookup_timeout_ms);
        match tokio::time::timeout(deadline, self.estimate_at(handle, now)).await {
            Ok(meta) => meta,
            Err(_) => {
                let err = MetadataError::Timeout(deadline);
                tracing::debug!(uri = %handle.uri, %err, "falling back to unknown metadata");
                ImageMetadata::unknown_at(handle.uri.clone(), now)
            }
        }
    }

    /// Estimate every handle, at most `max_concurrent_lookups` at a time.
    /// Results are in input order.
    pub async fn estimate_batch(&self, handles: &[ImageHandle]) -> Vec<ImageMetadata> {
        let now = Local::now();
        let permits = Semaphore::new(self.config.max_concurrent_lookups.max(1));
        let lookups = handles.iter().map(|handle| {
            let permits = &permits;
            async move {
                let _permit = permits.acquire().await.ok();
                self.estimate_with_timeout(handle, now).await
            }
        });
        futures::future::join_all(lookups).await
    }
}
