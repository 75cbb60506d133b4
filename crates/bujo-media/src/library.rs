//! Photo-library port.
//!
//! A gallery image usually has a library record that remembers the real
//! capture time even after the file was copied or re-saved. Platforms plug
//! their index in behind [`PhotoLibrary`].

use async_trait::async_trait;
use bujo_core::types::GeoLocation;
use chrono::{DateTime, Local};

use crate::error::MetadataError;

/// What a photo library knows about one asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoAsset {
    pub created_at: Option<DateTime<Local>>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Lowercase format name, e.g. `jpeg`, `heic`.
    pub format: Option<String>,
    pub location: Option<GeoLocation>,
}

#[async_trait]
pub trait PhotoLibrary: Send + Sync {
    /// Look up the asset for `uri`. `Ok(None)` means the library has no
    /// matching record.
    async fn find_asset(
        &self,
        uri: &str,
        file_name: Option<&str>,
    ) -> Result<Option<PhotoAsset>, MetadataError>;
}

/// Adapter for hosts without a photo library.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPhotoLibrary;

#[async_trait]
impl PhotoLibrary for NoPhotoLibrary {
    async fn find_asset(
        &self,
        _uri: &str,
        _file_name: Option<&str>,
    ) -> Result<Option<PhotoAsset>, MetadataError> {
        Ok(None)
    }
}
