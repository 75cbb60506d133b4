//! bujo-media — source image metadata for bujo.
//!
//! Estimates when a journal photo was taken and which journal day it most
//! likely shows. Every lookup is best-effort: a missing file, a refusing
//! photo library or an unreadable name just removes that signal, and the
//! worst case is [`bujo_core::ImageMetadata::unknown`].

pub mod error;
pub mod estimator;
pub mod filename;
pub mod journal_day;
pub mod library;
pub mod source;

pub use error::MetadataError;
pub use estimator::{ImageHandle, ImageMetadataEstimator};
pub use library::{NoPhotoLibrary, PhotoAsset, PhotoLibrary};
