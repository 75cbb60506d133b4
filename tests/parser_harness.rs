#![allow(unused)]
//! Bullet grammar integration harness.
//!
//! # What this covers
//!
//! - **Rule table**: every bullet glyph maps to the documented type/status.
//! - **Line accounting**: text made only of bullet lines yields exactly one
//!   entry per non-blank line; unrecognized lines are dropped silently.
//! - **Inline sigils**: `#tag`, `@context` and trailing `*` priority.
//! - **Page dates**: a date alone on a line becomes the page date.
//!
//! # What this does NOT cover
//!
//! - Handwriting recognition itself (input is already text)
//! - Normalization of parsed entries (see `normalization_harness`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test parser_harness
//! ```

mod common;
use common::*;

use bujo_core::parser::BulletPatternParser;
use bujo_core::{EntryStatus, EntryType, Priority};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

// ---------------------------------------------------------------------------
// Line accounting
// ---------------------------------------------------------------------------

#[test]
fn one_entry_per_bullet_line() {
    let text = BULLET_LINES.join("\n\n");
    let entries = BulletPatternParser::new().parse(&text);
    assert_eq!(entries.len(), BULLET_LINES.len());
}

#[test]
fn noise_only_page_yields_nothing() {
    let page = BulletPatternParser::new().parse_page(PAGE_NOISE);
    assert!(page.entries.is_empty());
    assert_eq!(page.page_date, None);
}

proptest! {
    /// Any mix of recognized bullets and blank lines keeps the count.
    #[test]
    fn count_matches_non_blank_lines(
        picks in proptest::collection::vec(0..BULLET_LINES.len(), 0..40),
        blank_every in 1usize..5,
    ) {
        let mut lines = Vec::new();
        for (i, pick) in picks.iter().enumerate() {
            if i % blank_every == 0 {
                lines.push("   ");
            }
            lines.push(BULLET_LINES[*pick]);
        }
        let entries = BulletPatternParser::new().parse(&lines.join("\n"));
        prop_assert_eq!(entries.len(), picks.len());
    }

    /// The parser never panics, and each entry comes from a distinct line.
    #[test]
    fn arbitrary_text_is_total(text in "\\PC{0,200}") {
        let lines = text.lines().filter(|l| !l.trim().is_empty()).count();
        let entries = BulletPatternParser::new().parse(&text);
        prop_assert!(entries.len() <= lines);
    }
}

// ---------------------------------------------------------------------------
// A full daily page
// ---------------------------------------------------------------------------

#[test]
fn daily_page() {
    let page = BulletPatternParser::new().parse_page(PAGE_DAILY);
    assert_eq!(page.page_date.as_deref(), Some("October 14, 2026"));

    let shapes: Vec<_> = page
        .entries
        .iter()
        .map(|e| (e.kind, e.status, e.content.as_str()))
        .collect();
    assert_eq!(
        shapes,
        vec![
            (EntryType::Task, EntryStatus::Incomplete, "Buy milk"),
            (EntryType::Task, EntryStatus::Complete, "Finish quarterly report"),
            (EntryType::Task, EntryStatus::Migrated, "Email landlord about the lease"),
            (EntryType::Task, EntryStatus::Scheduled, "Book dentist for next month"),
            (EntryType::Event, EntryStatus::Incomplete, "Lunch with Sam 1pm"),
            (EntryType::Task, EntryStatus::Incomplete, "Call mom"),
            (EntryType::Note, EntryStatus::Incomplete, "Felt calm after the run"),
        ]
    );
    assert_eq!(page.entries[0].tags, vec!["errand"]);
    assert_eq!(page.entries[0].contexts, vec!["store"]);
    assert_eq!(page.entries[1].priority, Priority::High);
}

#[rstest]
#[case::weekday("Tuesday", "tuesday")]
#[case::relative("Call mom tomorrow", "tomorrow")]
#[case::numeric("Pay rent 11/01/2026", "11/01/2026")]
#[case::month_day("Party on Oct 31", "Oct 31")]
fn date_literals_are_kept_verbatim(#[case] body: &str, #[case] literal: &str) {
    let entry = BulletPatternParser::new()
        .parse_line(&format!("• {body}"))
        .unwrap();
    assert_eq!(
        entry.date_literal.map(|d| d.to_lowercase()),
        Some(literal.to_lowercase())
    );
    assert_eq!(entry.content, body);
}
