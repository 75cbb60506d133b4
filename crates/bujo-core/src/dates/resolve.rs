//! Collection-date resolution.
//!
//! The cascade is strict: the first source that yields a usable date wins
//! and later sources are never consulted.
//!
//! | # | source | accepted when |
//! |---|--------|---------------|
//! | 1 | page date | parses |
//! | 2 | entry date | parses |
//! | 3 | candidate collection date | parses |
//! | 4 | image `estimatedJournalDate` | within `estimated_window_days` of now |
//! | 5 | image `createdAt` | within `created_window_days` of now |
//! | 6 | today | always |

use chrono::{DateTime, Local, NaiveDate};

use super::parse::DateParser;
use crate::config::ResolverConfig;
use crate::types::{DateHints, DateSource, Entry, ImageMetadata};

/// The outcome of resolving one entry's collection date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub date: NaiveDate,
    pub source: DateSource,
}

/// Assigns collection dates relative to a fixed `now`.
#[derive(Debug, Clone)]
pub struct DateResolver {
    config: ResolverConfig,
    now: DateTime<Local>,
    parser: DateParser,
}

impl DateResolver {
    pub fn new(config: ResolverConfig, now: DateTime<Local>) -> Self {
        Self {
            config,
            now,
            parser: DateParser::new(now.date_naive()),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn parser(&self) -> &DateParser {
        &self.parser
    }

    /// Resolve a date from hints and optional image metadata. Never fails.
    pub fn resolve(&self, hints: &DateHints, image: Option<&ImageMetadata>) -> Resolution {
        let textual = [
            (hints.page_date.as_deref(), DateSource::PageDate),
            (hints.entry_date.as_deref(), DateSource::EntryDate),
            (hints.collection_date.as_deref(), DateSource::CandidateCollectionDate),
        ];
        for (hint, source) in textual {
            let Some(raw) = hint else { continue };
            match self.parser.parse(raw) {
                Some(date) => return Resolution { date, source },
                None => tracing::debug!(%source, hint = raw, "date hint did not parse"),
            }
        }

        if let Some(image) = image {
            if let Some(estimated) = image.estimated_journal_date {
                if self.within_days(estimated, self.config.estimated_window_days) {
                    return Resolution {
                        date: estimated,
                        source: DateSource::EstimatedJournalDate,
                    };
                }
            }
            let created = image.created_at.with_timezone(&Local).date_naive();
            if self.within_days(created, self.config.created_window_days) {
                return Resolution {
                    date: created,
                    source: DateSource::ImageCreatedAt,
                };
            }
        }

        Resolution {
            date: self.today(),
            source: DateSource::Today,
        }
    }

    /// Resolve and write the result into `entry.collection_date`.
    pub fn resolve_entry(
        &self,
        entry: &mut Entry,
        hints: &DateHints,
        image: Option<&ImageMetadata>,
    ) -> DateSource {
        let resolution = self.resolve(hints, image);
        entry.collection_date = resolution.date;
        resolution.source
    }

    fn within_days(&self, date: NaiveDate, window: i64) -> bool {
        (date - self.today()).num_days().abs() <= window
    }
}
