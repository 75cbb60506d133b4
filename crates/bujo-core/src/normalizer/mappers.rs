//! Raw value → canonical enum lookups.
//!
//! Each closed enum has a compile-time synonym table and a documented
//! default. Keys are matched after lowercasing, trimming, and folding `_`
//! and `-` into spaces, so `"To-Do"`, `"to_do"` and `" TODO "` land on the
//! same entry.

use phf::phf_map;
use serde_json::Value;

use crate::types::{Collection, EntryStatus, EntryType, Priority};

/// A pure mapping from a loosely-typed raw value to a canonical value.
pub trait Mapper<T> {
    /// Map `raw`; `None` (absent or JSON null) yields the default.
    fn map(&self, raw: Option<&Value>) -> T;
}

/// Synonym-table lookup with a fallback for anything unrecognized.
pub struct SynonymMapper<T: Copy + 'static> {
    table: &'static phf::Map<&'static str, T>,
    default: T,
}

impl<T: Copy + 'static> SynonymMapper<T> {
    pub const fn new(table: &'static phf::Map<&'static str, T>, default: T) -> Self {
        Self { table, default }
    }

    pub fn default_value(&self) -> T {
        self.default
    }

    /// Look up `raw` without falling back.
    pub fn lookup(&self, raw: &str) -> Option<T> {
        self.table.get(fold_key(raw).as_str()).copied()
    }

    pub fn map_str(&self, raw: &str) -> T {
        self.lookup(raw).unwrap_or(self.default)
    }
}

impl<T: Copy + 'static> Mapper<T> for SynonymMapper<T> {
    fn map(&self, raw: Option<&Value>) -> T {
        match raw {
            Some(Value::String(s)) => self.map_str(s),
            _ => self.default,
        }
    }
}

/// Priority accepts words, numeric levels and booleans.
///
/// Numbers: `0` → none, `1` → low, `2` → medium, `3` and above → high.
/// Booleans: `true` → high, `false` → none.
pub struct PriorityMapper;

impl Mapper<Priority> for PriorityMapper {
    fn map(&self, raw: Option<&Value>) -> Priority {
        match raw {
            Some(Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(n) => priority_from_level(n),
                Err(_) => PRIORITY.map_str(s),
            },
            Some(Value::Number(n)) => n.as_f64().map_or(Priority::None, priority_from_level),
            Some(Value::Bool(true)) => Priority::High,
            _ => Priority::None,
        }
    }
}

fn priority_from_level(level: f64) -> Priority {
    if !level.is_finite() || level < 1.0 {
        Priority::None
    } else if level < 2.0 {
        Priority::Low
    } else if level < 3.0 {
        Priority::Medium
    } else {
        Priority::High
    }
}

fn fold_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

static ENTRY_TYPE_SYNONYMS: phf::Map<&'static str, EntryType> = phf_map! {
    "task" => EntryType::Task,
    "tasks" => EntryType::Task,
    "todo" => EntryType::Task,
    "to do" => EntryType::Task,
    "action" => EntryType::Task,
    "action item" => EntryType::Task,
    "chore" => EntryType::Task,
    "reminder" => EntryType::Task,
    "event" => EntryType::Event,
    "events" => EntryType::Event,
    "appointment" => EntryType::Event,
    "meeting" => EntryType::Event,
    "calendar" => EntryType::Event,
    "birthday" => EntryType::Event,
    "note" => EntryType::Note,
    "notes" => EntryType::Note,
    "thought" => EntryType::Note,
    "observation" => EntryType::Note,
    "info" => EntryType::Note,
    "information" => EntryType::Note,
    "inspiration" => EntryType::Inspiration,
    "idea" => EntryType::Inspiration,
    "ideas" => EntryType::Inspiration,
    "insight" => EntryType::Inspiration,
    "quote" => EntryType::Inspiration,
    "research" => EntryType::Research,
    "explore" => EntryType::Research,
    "investigate" => EntryType::Research,
    "study" => EntryType::Research,
    "learn" => EntryType::Research,
    "question" => EntryType::Research,
    "look up" => EntryType::Research,
    "memory" => EntryType::Memory,
    "memories" => EntryType::Memory,
    "journal" => EntryType::Memory,
    "reflection" => EntryType::Memory,
    "diary" => EntryType::Memory,
    "custom" => EntryType::Custom,
    "other" => EntryType::Custom,
};

static STATUS_SYNONYMS: phf::Map<&'static str, EntryStatus> = phf_map! {
    "incomplete" => EntryStatus::Incomplete,
    "todo" => EntryStatus::Incomplete,
    "to do" => EntryStatus::Incomplete,
    "open" => EntryStatus::Incomplete,
    "pending" => EntryStatus::Incomplete,
    "not started" => EntryStatus::Incomplete,
    "in progress" => EntryStatus::Incomplete,
    "new" => EntryStatus::Incomplete,
    "active" => EntryStatus::Incomplete,
    "complete" => EntryStatus::Complete,
    "completed" => EntryStatus::Complete,
    "done" => EntryStatus::Complete,
    "finished" => EntryStatus::Complete,
    "closed" => EntryStatus::Complete,
    "checked" => EntryStatus::Complete,
    "resolved" => EntryStatus::Complete,
    "x" => EntryStatus::Complete,
    "migrated" => EntryStatus::Migrated,
    "moved" => EntryStatus::Migrated,
    "forwarded" => EntryStatus::Migrated,
    "deferred" => EntryStatus::Migrated,
    "carried over" => EntryStatus::Migrated,
    "scheduled" => EntryStatus::Scheduled,
    "planned" => EntryStatus::Scheduled,
    "future" => EntryStatus::Scheduled,
    "later" => EntryStatus::Scheduled,
    "upcoming" => EntryStatus::Scheduled,
    "cancelled" => EntryStatus::Cancelled,
    "canceled" => EntryStatus::Cancelled,
    "dropped" => EntryStatus::Cancelled,
    "abandoned" => EntryStatus::Cancelled,
    "struck" => EntryStatus::Cancelled,
    "irrelevant" => EntryStatus::Cancelled,
    "skipped" => EntryStatus::Cancelled,
    "void" => EntryStatus::Cancelled,
};

static PRIORITY_SYNONYMS: phf::Map<&'static str, Priority> = phf_map! {
    "none" => Priority::None,
    "no" => Priority::None,
    "unset" => Priority::None,
    "low" => Priority::Low,
    "lowest" => Priority::Low,
    "minor" => Priority::Low,
    "trivial" => Priority::Low,
    "someday" => Priority::Low,
    "p3" => Priority::Low,
    "medium" => Priority::Medium,
    "med" => Priority::Medium,
    "mid" => Priority::Medium,
    "normal" => Priority::Medium,
    "moderate" => Priority::Medium,
    "p2" => Priority::Medium,
    "high" => Priority::High,
    "highest" => Priority::High,
    "urgent" => Priority::High,
    "important" => Priority::High,
    "critical" => Priority::High,
    "asap" => Priority::High,
    "top" => Priority::High,
    "p1" => Priority::High,
    "p0" => Priority::High,
    "!" => Priority::High,
    "!!" => Priority::High,
    "!!!" => Priority::High,
    "*" => Priority::High,
};

static COLLECTION_SYNONYMS: phf::Map<&'static str, Collection> = phf_map! {
    "daily" => Collection::Daily,
    "day" => Collection::Daily,
    "today" => Collection::Daily,
    "daily log" => Collection::Daily,
    "monthly" => Collection::Monthly,
    "month" => Collection::Monthly,
    "monthly log" => Collection::Monthly,
    "future" => Collection::Future,
    "future log" => Collection::Future,
    "futurelog" => Collection::Future,
    "upcoming" => Collection::Future,
    "custom" => Collection::Custom,
    "collection" => Collection::Custom,
    "project" => Collection::Custom,
    "other" => Collection::Custom,
};

/// Unrecognized → [`EntryType::Task`].
pub static ENTRY_TYPE: SynonymMapper<EntryType> =
    SynonymMapper::new(&ENTRY_TYPE_SYNONYMS, EntryType::Task);

/// Unrecognized → [`EntryStatus::Incomplete`].
pub static STATUS: SynonymMapper<EntryStatus> =
    SynonymMapper::new(&STATUS_SYNONYMS, EntryStatus::Incomplete);

/// Word-only priority lookup; unrecognized → [`Priority::None`].
pub static PRIORITY: SynonymMapper<Priority> =
    SynonymMapper::new(&PRIORITY_SYNONYMS, Priority::None);

/// Unrecognized → [`Collection::Daily`].
pub static COLLECTION: SynonymMapper<Collection> =
    SynonymMapper::new(&COLLECTION_SYNONYMS, Collection::Daily);
