//! Core types for bujo-core.
//!
//! This module defines the canonical [`Entry`] handed to the persistence
//! collaborator, its closed enums, the [`ImageMetadata`] produced by the
//! estimator, and the transient [`Candidate`] union that feeds the normalizer.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A canonical journal entry.
///
/// Every enum field is a member of its closed set and `collection_date` is
/// always a valid calendar date. Entries are produced by the pipeline and
/// owned by the caller afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Opaque id, unique within the batch that produced it.
    pub id: String,
    /// Serialized as `type` to match the store schema.
    #[serde(rename = "type")]
    pub kind: EntryType,
    pub content: String,
    pub status: EntryStatus,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Local>>,
    /// Lowercase, trimmed, deduplicated.
    pub tags: Vec<String>,
    /// Lowercase, trimmed, deduplicated.
    pub contexts: Vec<String>,
    pub collection: Collection,
    pub collection_date: NaiveDate,
    /// Recognition confidence in `[0, 1]`.
    pub ocr_confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gratitude: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_image: Option<String>,
}

/// Entry category. Unrecognized input maps to [`EntryType::Task`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    #[default]
    Task,
    Event,
    Note,
    Inspiration,
    Research,
    Memory,
    Custom,
}

/// Entry lifecycle. Unrecognized input maps to [`EntryStatus::Incomplete`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Incomplete,
    Complete,
    Migrated,
    Scheduled,
    Cancelled,
}

/// Unrecognized input maps to [`Priority::None`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

/// Journal collection an entry is filed under. Defaults to the daily log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    #[default]
    Daily,
    Monthly,
    Future,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Excellent,
    Good,
    Neutral,
    Poor,
}

macro_rules! display_snake_case {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $name),)+
                }
            }
        }
    };
}

display_snake_case!(EntryType {
    Task => "task",
    Event => "event",
    Note => "note",
    Inspiration => "inspiration",
    Research => "research",
    Memory => "memory",
    Custom => "custom",
});

display_snake_case!(EntryStatus {
    Incomplete => "incomplete",
    Complete => "complete",
    Migrated => "migrated",
    Scheduled => "scheduled",
    Cancelled => "cancelled",
});

display_snake_case!(Priority {
    None => "none",
    Low => "low",
    Medium => "medium",
    High => "high",
});

display_snake_case!(Mood {
    Excellent => "excellent",
    Good => "good",
    Neutral => "neutral",
    Poor => "poor",
});

// ---------------------------------------------------------------------------
// Image metadata
// ---------------------------------------------------------------------------

/// Where a source image came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    Camera,
    Gallery,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

/// Best-effort description of a scanned page image.
///
/// Fields the estimator could not determine stay `None`; timestamps fall
/// back to the lookup time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub uri: String,
    pub created_at: DateTime<Local>,
    pub modified_at: DateTime<Local>,
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub source: ImageSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_journal_date: Option<NaiveDate>,
}

impl ImageMetadata {
    /// Metadata for an image nothing could be learned about.
    ///
    /// Carries no journal-date estimate, so the resolver only consults
    /// `created_at` (which is "now" and therefore lands on today).
    pub fn unknown(uri: impl Into<String>) -> Self {
        Self::unknown_at(uri, Local::now())
    }

    /// [`ImageMetadata::unknown`] stamped with a caller-supplied clock.
    pub fn unknown_at(uri: impl Into<String>, now: DateTime<Local>) -> Self {
        Self {
            uri: uri.into(),
            created_at: now,
            modified_at: now,
            file_size: 0,
            width: None,
            height: None,
            format: None,
            source: ImageSource::Unknown,
            location: None,
            estimated_journal_date: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Candidates (pre-normalization)
// ---------------------------------------------------------------------------

/// Originating pathway of a candidate entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// The on-device bullet grammar.
    PatternParser,
    /// An external recognition service, by name.
    Provider(String),
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::PatternParser => write!(f, "pattern"),
            Provenance::Provider(name) => write!(f, "{name}"),
        }
    }
}

/// A line recognized by the bullet grammar, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub kind: EntryType,
    pub status: EntryStatus,
    pub priority: Priority,
    /// Line remainder with bullet and sigils removed.
    pub content: String,
    pub tags: Vec<String>,
    pub contexts: Vec<String>,
    /// First date literal found in the line, verbatim.
    pub date_literal: Option<String>,
    pub time: Option<NaiveTime>,
    /// The trimmed source line.
    pub raw: String,
}

/// A transient candidate entry, tagged by provenance.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Parsed(ParsedEntry),
    Provider {
        provider: String,
        payload: serde_json::Value,
    },
}

impl Candidate {
    pub fn provenance(&self) -> Provenance {
        match self {
            Candidate::Parsed(_) => Provenance::PatternParser,
            Candidate::Provider { provider, .. } => Provenance::Provider(provider.clone()),
        }
    }
}

/// Literal, unresolved date strings captured from a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateHints {
    pub page_date: Option<String>,
    pub entry_date: Option<String>,
    pub collection_date: Option<String>,
}

impl DateHints {
    pub fn is_empty(&self) -> bool {
        self.page_date.is_none() && self.entry_date.is_none() && self.collection_date.is_none()
    }
}

/// Which cascade source produced an entry's collection date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateSource {
    PageDate,
    EntryDate,
    CandidateCollectionDate,
    EstimatedJournalDate,
    ImageCreatedAt,
    Today,
}

impl std::fmt::Display for DateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateSource::PageDate => write!(f, "page_date"),
            DateSource::EntryDate => write!(f, "entry_date"),
            DateSource::CandidateCollectionDate => write!(f, "candidate_collection_date"),
            DateSource::EstimatedJournalDate => write!(f, "estimated_journal_date"),
            DateSource::ImageCreatedAt => write!(f, "image_created_at"),
            DateSource::Today => write!(f, "today"),
        }
    }
}
