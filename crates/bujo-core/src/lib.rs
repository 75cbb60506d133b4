//! bujo-core — entry model and scan processing for bujo.
//!
//! This crate turns what a recognizer saw on a journal page into canonical
//! [`Entry`] values. It is synchronous and does no I/O apart from loading
//! configuration; image metadata comes from `bujo-media`.
//!
//! # Architecture
//!
//! ```text
//! parser ──► normalizer ──► dates::resolve
//!    └──────── pipeline ────────┘
//! ```

pub mod config;
pub mod dates;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod types;

pub use config::Config;
pub use dates::{DateParser, DateResolver, Resolution};
pub use normalizer::{EntryNormalizer, NormalizedEntry};
pub use parser::{BulletPatternParser, ParsedPage};
pub use pipeline::{Pipeline, ScanInput};
pub use types::{
    Candidate, Collection, DateHints, DateSource, Entry, EntryStatus, EntryType, ImageMetadata,
    ImageSource, Mood, Priority, Provenance,
};
