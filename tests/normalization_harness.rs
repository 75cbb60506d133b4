#![allow(unused)]
//! Normalizer integration harness.
//!
//! # What this covers
//!
//! - **Totality**: arbitrary JSON (strings, numbers, null, nested junk) always
//!   normalizes to an entry whose enums are members of their closed sets.
//! - **Structured fields win**: an explicit provider `status` beats glyph
//!   residue in the content.
//! - **Label idempotence**: normalizing tags/contexts twice changes nothing.
//! - **Parsed entries**: bullet-grammar output is cleaned and labelled the
//!   same way as provider output.
//!
//! # What this does NOT cover
//!
//! - Collection dates (placeholder here; see `date_resolution_harness`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test normalization_harness
//! ```

mod common;
use common::*;

use bujo_core::config::NormalizerConfig;
use bujo_core::normalizer::text::normalize_labels;
use bujo_core::normalizer::EntryNormalizer;
use bujo_core::parser::BulletPatternParser;
use bujo_core::{Candidate, Collection, EntryStatus, EntryType, Mood, Priority};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use serde_json::{json, Value};

fn normalizer() -> EntryNormalizer {
    EntryNormalizer::new(NormalizerConfig::default(), now())
}

// ---------------------------------------------------------------------------
// Provider payloads
// ---------------------------------------------------------------------------

#[test]
fn explicit_status_beats_content_glyph() {
    let n = normalizer().normalize(&provider_candidate(json!({
        "type": "done",
        "content": "x Finish report",
        "status": "todo",
    })));
    assert_entry!(n.entry, EntryType::Task, EntryStatus::Incomplete);
    assert_canonical(&n.entry);
}

#[rstest]
#[case::known(json!({"type": "Meeting", "status": "DONE", "priority": "p1"}), EntryType::Event, EntryStatus::Complete, Priority::High)]
#[case::unknown(json!({"type": "grocery", "status": "maybe", "priority": "whenever"}), EntryType::Task, EntryStatus::Incomplete, Priority::None)]
#[case::wrong_types(json!({"type": 7, "status": ["done"], "priority": {"level": 3}}), EntryType::Task, EntryStatus::Incomplete, Priority::None)]
#[case::numeric_priority(json!({"type": "idea", "status": "migrated", "priority": 2}), EntryType::Inspiration, EntryStatus::Migrated, Priority::Medium)]
fn enum_fields(
    #[case] payload: Value,
    #[case] kind: EntryType,
    #[case] status: EntryStatus,
    #[case] priority: Priority,
) {
    let entry = normalizer().normalize(&provider_candidate(payload)).entry;
    assert_entry!(entry, kind, status);
    assert_eq!(entry.priority, priority);
}

#[test]
fn envelope_items_normalize_fully() {
    let items = provider_envelope()["entries"].as_array().unwrap().clone();
    let norm = normalizer();
    let entries: Vec<_> = items
        .into_iter()
        .map(|item| norm.normalize(&provider_candidate(item)))
        .collect();

    assert_eq!(entries[0].entry.content, "Pay rent");
    assert_eq!(entries[0].entry.tags, vec!["home", "bills"]);
    assert_eq!(entries[0].entry.priority, Priority::High);

    assert_eq!(entries[1].entry.kind, EntryType::Event);
    assert_eq!(entries[1].time.map(|t| t.to_string()).as_deref(), Some("15:30:00"));

    assert_eq!(entries[2].entry.kind, EntryType::Memory);
    assert_eq!(entries[2].entry.mood, Some(Mood::Excellent));
    assert_eq!(entries[2].entry.gratitude, Some(vec!["sun".to_string(), "friends".into()]));

    assert_eq!(entries[3].hints.entry_date.as_deref(), Some("10/12/2026"));
    assert_eq!(entries[3].hints.page_date.as_deref(), Some("2026-10-11"));

    for n in &entries {
        assert_canonical(&n.entry);
        assert_eq!(n.entry.collection, Collection::Daily);
    }
}

#[test]
fn ids_are_unique_within_a_batch() {
    let norm = normalizer();
    let mut ids: Vec<_> = (0..200)
        .map(|_| norm.normalize(&provider_candidate(json!({"content": "same"}))).entry.id)
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

// ---------------------------------------------------------------------------
// Parsed entries
// ---------------------------------------------------------------------------

#[test]
fn parsed_entries_use_parser_confidence() {
    let parsed = BulletPatternParser::new()
        .parse_line("• buy   milk #Errand #errand @Store")
        .unwrap();
    let n = normalizer().normalize(&Candidate::Parsed(parsed));

    assert_eq!(n.entry.content, "Buy milk");
    assert_eq!(n.entry.tags, vec!["errand"]);
    assert_eq!(n.entry.contexts, vec!["store"]);
    assert_eq!(n.entry.ocr_confidence, NormalizerConfig::default().parser_confidence);
    assert!(n.entry.id.starts_with("pattern-"));
}

#[test]
fn explicit_confidence_is_clamped() {
    let parsed = BulletPatternParser::new().parse_line("• a").unwrap();
    let n = normalizer().normalize_with_confidence(&Candidate::Parsed(parsed), 3.5);
    assert_eq!(n.entry.ocr_confidence, 1.0);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        any::<f64>().prop_map(|n| json!(n)),
        "\\PC{0,24}".prop_map(Value::String),
        prop::sample::select(vec!["todo", "done", "event", "idea", "high", "3", "x", "Cancelled"])
            .prop_map(|s| Value::String(s.to_string())),
    ];
    leaf.prop_recursive(3, 24, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::hash_map(
                prop::sample::select(vec![
                    "type", "status", "priority", "content", "tags", "contexts", "date",
                    "pageDate", "mood", "gratitude", "confidence", "dueDate", "time",
                ]),
                inner,
                0..8,
            )
            .prop_map(|fields| {
                Value::Object(fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
            }),
        ]
    })
}

proptest! {
    #[test]
    fn normalization_is_total(payload in arb_json()) {
        let n = normalizer().normalize(&provider_candidate(payload));
        // Closed enums round-trip through their serialized names.
        let json = serde_json::to_value(&n.entry).unwrap();
        let back: bujo_core::Entry = serde_json::from_value(json).unwrap();
        prop_assert_eq!(back.kind, n.entry.kind);
        prop_assert_eq!(back.status, n.entry.status);
        prop_assert_eq!(back.priority, n.entry.priority);
        prop_assert!((0.0..=1.0).contains(&n.entry.ocr_confidence));
    }

    #[test]
    fn labels_are_idempotent(raw in prop::collection::vec("[#@ ]{0,2}\\PC{0,12}", 0..8)) {
        let once = normalize_labels(raw.iter().map(String::as_str));
        let twice = normalize_labels(once.iter().map(String::as_str));
        prop_assert_eq!(once, twice);
    }
}
