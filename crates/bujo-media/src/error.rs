//! Errors raised while gathering image metadata.
//!
//! These never escape the estimator: each one downgrades to "signal absent"
//! and is logged at debug level.

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("cannot stat {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("photo library lookup failed: {0}")]
    Library(String),
    #[error("metadata lookup timed out after {0:?}")]
    Timeout(Duration),
}
