//! Test builders — ergonomic constructors for image metadata and inputs.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use bujo_core::types::{Candidate, ImageMetadata, ImageSource};
use bujo_core::ScanInput;
use chrono::{DateTime, Local, NaiveDate};
use serde_json::Value;

use super::fixtures::now;

// ---------------------------------------------------------------------------
// ImageMetadataBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`ImageMetadata`] fixtures.
///
/// # Example
///
/// ```rust
/// let meta = ImageMetadataBuilder::new()
///     .created_at(local(2026, 10, 12, 21, 0))
///     .estimated(ymd(2026, 10, 13))
///     .build();
/// ```
pub struct ImageMetadataBuilder {
    meta: ImageMetadata,
}

impl ImageMetadataBuilder {
    pub fn new() -> Self {
        let mut meta = ImageMetadata::unknown("file:///sdcard/DCIM/Camera/page.jpg");
        meta.created_at = now();
        meta.modified_at = now();
        Self { meta }
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.meta.uri = uri.into();
        self
    }

    pub fn created_at(mut self, at: DateTime<Local>) -> Self {
        self.meta.created_at = at;
        self.meta.modified_at = at;
        self
    }

    pub fn estimated(mut self, date: NaiveDate) -> Self {
        self.meta.estimated_journal_date = Some(date);
        self
    }

    pub fn source(mut self, source: ImageSource) -> Self {
        self.meta.source = source;
        self
    }

    pub fn build(self) -> ImageMetadata {
        self.meta
    }
}

impl Default for ImageMetadataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

pub fn provider_candidate(payload: Value) -> Candidate {
    Candidate::Provider {
        provider: "vision".into(),
        payload,
    }
}

pub fn provider_input(payload: Value) -> ScanInput {
    ScanInput::Provider {
        provider: "vision".into(),
        payload,
    }
}

pub fn text_input(text: &str) -> ScanInput {
    ScanInput::RawText(text.to_string())
}
