//! FakePhotoLibrary — an in-memory [`PhotoLibrary`] with call counting,
//! injectable failures and an optional delay for timeout tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bujo_media::{MetadataError, PhotoAsset, PhotoLibrary};

#[derive(Default)]
pub struct FakePhotoLibrary {
    assets: HashMap<String, PhotoAsset>,
    failing: Vec<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakePhotoLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset under a URI.
    pub fn with_asset(mut self, uri: impl Into<String>, asset: PhotoAsset) -> Self {
        self.assets.insert(uri.into(), asset);
        self
    }

    /// Make lookups for `uri` fail.
    pub fn failing_for(mut self, uri: impl Into<String>) -> Self {
        self.failing.push(uri.into());
        self
    }

    /// Delay every lookup.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PhotoLibrary for FakePhotoLibrary {
    async fn find_asset(
        &self,
        uri: &str,
        _file_name: Option<&str>,
    ) -> Result<Option<PhotoAsset>, MetadataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.iter().any(|u| u == uri) {
            return Err(MetadataError::Library(format!("no access to {uri}")));
        }
        Ok(self.assets.get(uri).cloned())
    }
}
