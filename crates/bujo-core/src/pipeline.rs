//! Scan pipeline — parse or unwrap, normalize, resolve.
//!
//! ```text
//! RawText ──► BulletPatternParser ──┐
//!                                   ├──► EntryNormalizer ──► DateResolver ──► Vec<Entry>
//! Provider ──► unwrap_payload ──────┘                            ▲
//!                                                   ImageMetadata┘
//! ```
//!
//! Every stage is total. A scan that recognizes nothing yields an empty
//! batch, never an error.

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::config::Config;
use crate::dates::DateResolver;
use crate::normalizer::EntryNormalizer;
use crate::parser::BulletPatternParser;
use crate::types::{Candidate, Entry, EntryType, ImageMetadata};

/// Keys under which providers nest their entry lists.
const LIST_KEYS: &[&str] = &["entries", "items", "results", "data"];
/// Envelope keys carrying a page date for the whole list.
const ENVELOPE_DATE_KEYS: &[&str] = &["pageDate", "page_date", "date"];

/// What one scan produced before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanInput {
    /// Recognized text, parsed with the bullet grammar.
    RawText(String),
    /// Structured output from a named recognition provider.
    Provider { provider: String, payload: Value },
}

/// Provider items after unwrapping the payload envelope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderBatch {
    pub page_date: Option<String>,
    pub items: Vec<Value>,
}

/// Unwrap a provider payload into its items.
///
/// Accepts an array, an object wrapping a list under one of
/// `entries`/`items`/`results`/`data`, a single entry object, or a string
/// holding any of those as JSON (a Markdown code fence is stripped). A
/// string that is not JSON is treated as a single content-only item.
pub fn unwrap_payload(payload: &Value) -> ProviderBatch {
    match payload {
        Value::Array(items) => ProviderBatch {
            page_date: None,
            items: items.iter().filter(|v| is_item(v)).cloned().collect(),
        },
        Value::Object(fields) => {
            let list = LIST_KEYS
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_array));
            match list {
                Some(items) => ProviderBatch {
                    page_date: ENVELOPE_DATE_KEYS
                        .iter()
                        .find_map(|key| fields.get(*key))
                        .and_then(crate::normalizer::text::scalar_to_string),
                    items: items.iter().filter(|v| is_item(v)).cloned().collect(),
                },
                None => ProviderBatch {
                    page_date: None,
                    items: vec![payload.clone()],
                },
            }
        }
        Value::String(raw) => match serde_json::from_str::<Value>(strip_fence(raw)) {
            Ok(inner @ (Value::Array(_) | Value::Object(_))) => unwrap_payload(&inner),
            _ if raw.trim().is_empty() => ProviderBatch::default(),
            _ => ProviderBatch {
                page_date: None,
                items: vec![Value::String(raw.trim().to_string())],
            },
        },
        _ => ProviderBatch::default(),
    }
}

fn is_item(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::String(s) => !s.trim().is_empty(),
        _ => false,
    }
}

fn strip_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`) on the opening fence line.
    let body = body.split_once('\n').map_or("", |(_, rest)| rest);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Runs scans through the normalizer and resolver with one configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    parser: BulletPatternParser,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            parser: BulletPatternParser::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Split a scan into candidates plus the page date that applies to all
    /// of them.
    pub fn candidates(&self, input: &ScanInput) -> (Option<String>, Vec<Candidate>) {
        match input {
            ScanInput::RawText(text) => {
                let page = self.parser.parse_page(text);
                let candidates = page.entries.into_iter().map(Candidate::Parsed).collect();
                (page.page_date, candidates)
            }
            ScanInput::Provider { provider, payload } => {
                let batch = unwrap_payload(payload);
                let candidates = batch
                    .items
                    .into_iter()
                    .map(|payload| Candidate::Provider {
                        provider: provider.clone(),
                        payload,
                    })
                    .collect();
                (batch.page_date, candidates)
            }
        }
    }

    pub fn process(&self, input: &ScanInput, image: Option<&ImageMetadata>) -> Vec<Entry> {
        self.process_at(input, image, Local::now())
    }

    /// [`Pipeline::process`] against a fixed clock.
    pub fn process_at(
        &self,
        input: &ScanInput,
        image: Option<&ImageMetadata>,
        now: DateTime<Local>,
    ) -> Vec<Entry> {
        let normalizer = EntryNormalizer::new(self.config.normalizer.clone(), now);
        let resolver = DateResolver::new(self.config.resolver.clone(), now);
        let (page_date, candidates) = self.candidates(input);

        candidates
            .iter()
            .map(|candidate| {
                let normalized = normalizer.normalize(candidate);
                let mut entry = normalized.entry;
                let mut hints = normalized.hints;
                if hints.page_date.is_none() {
                    hints.page_date = page_date.clone();
                }

                let source = resolver.resolve_entry(&mut entry, &hints, image);
                tracing::debug!(
                    id = %entry.id,
                    collection_date = %entry.collection_date,
                    %source,
                    "collection date resolved"
                );

                if entry.kind == EntryType::Event && entry.due_date.is_none() {
                    entry.due_date = normalized.time.and_then(|time| {
                        entry
                            .collection_date
                            .and_time(time)
                            .and_local_timezone(Local)
                            .earliest()
                    });
                }
                if entry.source_image.is_none() {
                    entry.source_image = image.map(|meta| meta.uri.clone());
                }
                entry
            })
            .collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Config::defaults())
    }
}
