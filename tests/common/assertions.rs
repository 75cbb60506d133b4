//! Domain-specific assertion macros for bujo harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! name the entry whose canonical form was violated.

use bujo_core::Entry;

// ---------------------------------------------------------------------------
// Entry shape
// ---------------------------------------------------------------------------

/// Assert an entry's type and status together.
///
/// ```rust
/// assert_entry!(entry, EntryType::Task, EntryStatus::Complete);
/// ```
#[macro_export]
macro_rules! assert_entry {
    ($entry:expr, $kind:expr, $status:expr) => {{
        let entry: &bujo_core::Entry = &$entry;
        if entry.kind != $kind || entry.status != $status {
            panic!(
                "assert_entry! failed:\n  expected: {:?}/{:?}\n  actual:   {:?}/{:?}\n  content: {:?}",
                $kind, $status, entry.kind, entry.status, entry.content
            );
        }
    }};
}

/// Assert the collection date an entry resolved to.
#[macro_export]
macro_rules! assert_collection_date {
    ($entry:expr, $date:expr) => {{
        let entry: &bujo_core::Entry = &$entry;
        let expected: chrono::NaiveDate = $date;
        if entry.collection_date != expected {
            panic!(
                "assert_collection_date! failed:\n  expected: {}\n  actual:   {}\n  content: {:?}",
                expected, entry.collection_date, entry.content
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Canonical form
// ---------------------------------------------------------------------------

/// Panic unless `entry` is in canonical form: normalized labels, confidence
/// in range, trimmed content.
pub fn assert_canonical(entry: &Entry) {
    for label in entry.tags.iter().chain(&entry.contexts) {
        assert!(
            !label.is_empty()
                && label.trim() == label
                && label.to_lowercase() == *label
                && !label.starts_with(['#', '@']),
            "label {label:?} on {:?} is not normalized",
            entry.content
        );
    }
    let mut seen = entry.tags.clone();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), entry.tags.len(), "duplicate tags on {:?}", entry.content);
    assert!(
        (0.0..=1.0).contains(&entry.ocr_confidence),
        "confidence {} out of range",
        entry.ocr_confidence
    );
    assert_eq!(entry.content.trim(), entry.content, "content not trimmed");
    assert!(!entry.id.is_empty(), "empty id");
}
