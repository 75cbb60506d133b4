//! Normalizer — canonicalizes a [`Candidate`] into an [`Entry`].
//!
//! Normalization is total: any candidate, including provider payloads of
//! the wrong shape, yields a well-formed entry. Unknown enum values take
//! their documented defaults, malformed numbers fall back to defaults, and
//! date-like fields are captured verbatim as [`DateHints`] for the resolver
//! rather than interpreted here.
//!
//! The entry's `collection_date` is a placeholder (today) until the
//! resolver assigns the real one.

pub mod mappers;
pub mod mood;
pub mod text;

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local, NaiveTime, Utc};
use serde_json::{Map, Value};

use crate::config::NormalizerConfig;
use crate::dates::DateParser;
use crate::parser::find_time_literal;
use crate::types::{Candidate, DateHints, Entry, EntryStatus, ParsedEntry, Provenance};
use mappers::{Mapper, PriorityMapper, COLLECTION, ENTRY_TYPE, STATUS};

// ---------------------------------------------------------------------------
// Provider field aliases
// ---------------------------------------------------------------------------

const ID: &[&str] = &["id", "uuid"];
const KIND: &[&str] = &["type", "kind", "category", "entryType", "entry_type"];
const CONTENT: &[&str] = &["content", "text", "title", "body", "description"];
const STATUS_KEYS: &[&str] = &["status", "state"];
const DONE_FLAGS: &[&str] = &["completed", "done", "isCompleted", "is_completed"];
const PRIORITY_KEYS: &[&str] = &["priority", "importance"];
const TAGS: &[&str] = &["tags", "hashtags", "labels"];
const CONTEXTS: &[&str] = &["contexts", "context", "people"];
const ENTRY_DATE: &[&str] = &["date", "entryDate", "entry_date", "day"];
const PAGE_DATE: &[&str] = &["pageDate", "page_date"];
const COLLECTION_DATE: &[&str] = &["collectionDate", "collection_date"];
const COLLECTION_KEYS: &[&str] = &["collection", "log"];
const DUE_DATE: &[&str] = &["dueDate", "due_date", "due"];
const TIME: &[&str] = &["time", "startTime", "start_time"];
const MOOD: &[&str] = &["mood", "feeling", "emotion"];
const GRATITUDE: &[&str] = &["gratitude", "gratitudes", "grateful"];
const CONFIDENCE: &[&str] = &["confidence", "ocrConfidence", "ocr_confidence", "score"];
const CREATED_AT: &[&str] = &["createdAt", "created_at"];
const SOURCE_IMAGE: &[&str] = &["sourceImage", "source_image", "image", "imageUri"];

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

/// Generates `{provenance}-{millis}-{seq}-{suffix}` ids, unique within the
/// generator's lifetime (one batch).
#[derive(Debug, Default)]
pub struct IdGenerator {
    seq: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, provenance: &Provenance, at: DateTime<Utc>) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let slug: String = provenance
            .to_string()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("{slug}-{}-{seq}-{}", at.timestamp_millis(), &suffix[..8])
    }
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// A normalized entry plus the unresolved date information it came with.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEntry {
    pub entry: Entry,
    pub hints: DateHints,
    /// Time of day mentioned by the candidate, applied to events once the
    /// collection date is known.
    pub time: Option<NaiveTime>,
}

/// Canonicalizes candidates from one batch.
#[derive(Debug)]
pub struct EntryNormalizer {
    config: NormalizerConfig,
    now: DateTime<Local>,
    dates: DateParser,
    ids: IdGenerator,
}

impl EntryNormalizer {
    pub fn new(config: NormalizerConfig, now: DateTime<Local>) -> Self {
        Self {
            config,
            now,
            dates: DateParser::new(now.date_naive()),
            ids: IdGenerator::new(),
        }
    }

    /// Default confidence for candidates that carry none.
    pub fn default_confidence(&self, provenance: &Provenance) -> f64 {
        match provenance {
            Provenance::PatternParser => self.config.parser_confidence,
            Provenance::Provider(_) => self.config.provider_confidence,
        }
    }

    pub fn normalize(&self, candidate: &Candidate) -> NormalizedEntry {
        let default_confidence = self.default_confidence(&candidate.provenance());
        self.normalize_with_confidence(candidate, default_confidence)
    }

    pub fn normalize_with_confidence(
        &self,
        candidate: &Candidate,
        default_confidence: f64,
    ) -> NormalizedEntry {
        let default_confidence = clamp_confidence(default_confidence).unwrap_or(0.0);
        match candidate {
            Candidate::Parsed(parsed) => self.from_parsed(parsed, default_confidence),
            Candidate::Provider { provider, payload } => {
                let provenance = Provenance::Provider(provider.clone());
                match payload {
                    Value::Object(fields) => {
                        self.from_fields(&provenance, fields, default_confidence)
                    }
                    other => {
                        let mut fields = Map::new();
                        if let Some(content) = text::scalar_to_string(other) {
                            fields.insert("content".into(), Value::String(content));
                        }
                        self.from_fields(&provenance, &fields, default_confidence)
                    }
                }
            }
        }
    }

    fn from_parsed(&self, parsed: &ParsedEntry, confidence: f64) -> NormalizedEntry {
        let created_at = self.now.with_timezone(&Utc);
        let content = text::clean_content(&parsed.content);
        let entry = Entry {
            id: self.ids.next(&Provenance::PatternParser, created_at),
            kind: parsed.kind,
            mood: mood::mood_of_content(parsed.kind, &content),
            content,
            status: parsed.status,
            priority: parsed.priority,
            created_at,
            due_date: None,
            tags: text::normalize_labels(parsed.tags.iter().map(String::as_str)),
            contexts: text::normalize_labels(parsed.contexts.iter().map(String::as_str)),
            collection: Default::default(),
            collection_date: self.now.date_naive(),
            ocr_confidence: confidence,
            gratitude: None,
            source_image: None,
        };
        NormalizedEntry {
            entry,
            hints: DateHints {
                entry_date: parsed.date_literal.clone(),
                ..DateHints::default()
            },
            time: parsed.time,
        }
    }

    fn from_fields(
        &self,
        provenance: &Provenance,
        fields: &Map<String, Value>,
        default_confidence: f64,
    ) -> NormalizedEntry {
        let get = |aliases: &[&str]| field(fields, aliases);
        let text_of = |aliases: &[&str]| get(aliases).and_then(text::scalar_to_string);

        let created_at = text_of(CREATED_AT)
            .and_then(|raw| self.dates.parse_date_time(&raw))
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| self.now.with_timezone(&Utc));

        let id = text_of(ID)
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| self.ids.next(provenance, created_at));

        let content = text::clean_content(&text_of(CONTENT).unwrap_or_default());

        let status = match get(STATUS_KEYS) {
            Some(raw) => STATUS.map(Some(raw)),
            None if DONE_FLAGS.iter().any(|k| field(fields, &[*k]) == Some(&Value::Bool(true))) => {
                EntryStatus::Complete
            }
            None => STATUS.default_value(),
        };

        let kind = ENTRY_TYPE.map(get(KIND));
        let mood = mood::mood_from_value(get(MOOD)).or_else(|| mood::mood_of_content(kind, &content));

        let ocr_confidence = get(CONFIDENCE)
            .and_then(confidence_of)
            .unwrap_or(default_confidence);

        let entry = Entry {
            id,
            kind,
            content,
            status,
            priority: PriorityMapper.map(get(PRIORITY_KEYS)),
            created_at,
            due_date: text_of(DUE_DATE).and_then(|raw| self.dates.parse_date_time(&raw)),
            tags: text::labels_from_value(get(TAGS)),
            contexts: text::labels_from_value(get(CONTEXTS)),
            collection: COLLECTION.map(get(COLLECTION_KEYS)),
            collection_date: self.now.date_naive(),
            ocr_confidence,
            mood,
            gratitude: text::gratitude_from_value(get(GRATITUDE)),
            source_image: text_of(SOURCE_IMAGE).filter(|s| !s.trim().is_empty()),
        };

        NormalizedEntry {
            entry,
            hints: DateHints {
                page_date: text_of(PAGE_DATE),
                entry_date: text_of(ENTRY_DATE),
                collection_date: text_of(COLLECTION_DATE),
            },
            time: text_of(TIME).and_then(|raw| find_time_literal(&raw)),
        }
    }
}

/// First present, non-null field among `aliases`. Exact key matches are
/// preferred; otherwise keys are compared case-insensitively.
fn field<'a>(fields: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    let present = |v: &&Value| !v.is_null();
    aliases
        .iter()
        .find_map(|alias| fields.get(*alias).filter(present))
        .or_else(|| {
            aliases.iter().find_map(|alias| {
                fields
                    .iter()
                    .find(|(key, value)| key.eq_ignore_ascii_case(alias) && !value.is_null())
                    .map(|(_, value)| value)
            })
        })
}

/// Confidence from a number or numeric string. Values in `(1, 100]` are
/// read as percentages.
fn confidence_of(value: &Value) -> Option<f64> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok()?,
        _ => return None,
    };
    let scaled = if raw > 1.0 && raw <= 100.0 { raw / 100.0 } else { raw };
    clamp_confidence(scaled)
}

fn clamp_confidence(value: f64) -> Option<f64> {
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}
