//! Text cleanup for content, labels and gratitude lists.
//!
//! Every function here is idempotent: cleaning already-clean text returns
//! it unchanged.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static LEADING_GLYPHS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[•●·○◦—–✓✔→←>*]\s*|-\s+)+").expect("valid regex"));

static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*•·●◦–—]+|\d{1,2}[.)])\s*").expect("valid regex"));

const LIST_DELIMITERS: [char; 4] = [',', ';', '|', '\n'];

/// Clean recognized content.
///
/// Strips residual bullet glyphs, straightens curly quotes and ellipses,
/// collapses whitespace runs, and capitalizes a lowercase first letter.
pub fn clean_content(raw: &str) -> String {
    let straightened: String = raw
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => "'".to_string(),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => "\"".to_string(),
            '\u{2026}' => "...".to_string(),
            '\u{00A0}' => " ".to_string(),
            other => other.to_string(),
        })
        .collect();

    let unbulleted = LEADING_GLYPHS.replace(straightened.trim_start(), "");
    let collapsed = unbulleted.split_whitespace().collect::<Vec<_>>().join(" ");
    capitalize_first(&collapsed)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => text.to_string(),
    }
}

/// Normalize tag or context labels: strip leading `#`/`@`, trim, lowercase,
/// drop empties, de-duplicate keeping the first occurrence.
pub fn normalize_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        let cleaned = label
            .to_lowercase()
            .trim_start_matches(|c: char| c == '#' || c == '@' || c.is_whitespace())
            .trim_end()
            .to_string();
        if !cleaned.is_empty() && !out.contains(&cleaned) {
            out.push(cleaned);
        }
    }
    out
}

/// Labels from a provider value: an array, or a string delimited by
/// commas, semicolons, pipes, newlines or whitespace.
pub fn labels_from_value(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => {
            let raw: Vec<String> = items.iter().filter_map(scalar_to_string).collect();
            normalize_labels(raw.iter().map(String::as_str))
        }
        Some(Value::String(s)) => normalize_labels(
            s.split(|c: char| LIST_DELIMITERS.contains(&c) || c.is_whitespace()),
        ),
        _ => Vec::new(),
    }
}

/// Gratitude items from a list or a delimited string, with leading list
/// markers (`-`, `*`, `1.`, `2)`) removed. `None` when nothing remains.
pub fn gratitude_from_value(value: Option<&Value>) -> Option<Vec<String>> {
    let raw: Vec<String> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(Value::String(s)) => s.split(LIST_DELIMITERS).map(str::to_string).collect(),
        _ => return None,
    };
    let items: Vec<String> = raw
        .iter()
        .map(|item| {
            let stripped = LIST_MARKER.replace(item, "");
            stripped.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|item| !item.is_empty())
        .collect();
    (!items.is_empty()).then_some(items)
}

/// Strings pass through; numbers and booleans are stringified; anything
/// else is skipped.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::bullet_residue("• buy milk", "Buy milk")]
    #[case::stacked_glyphs("→ • call mom", "Call mom")]
    #[case::whitespace_runs("  Lunch   with\tSam  ", "Lunch with Sam")]
    #[case::curly_quotes("\u{201C}Carpe diem\u{201D} \u{2018}n\u{2019} stuff\u{2026}", "\"Carpe diem\" 'n' stuff...")]
    #[case::already_capital("Buy milk", "Buy milk")]
    #[case::leading_digit("3 eggs", "3 eggs")]
    #[case::hyphen_word_kept("-ish", "-ish")]
    #[case::empty("", "")]
    fn content_cleanup(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(clean_content(raw), expected);
    }

    #[test]
    fn content_cleanup_is_idempotent() {
        let once = clean_content("  ◦  \u{201C}meet\u{201D}   Sam\u{2026} ");
        assert_eq!(clean_content(&once), once);
    }

    proptest::proptest! {
        #[test]
        fn cleanup_is_idempotent_for_any_text(raw in "[•○◦—–>*x -]{0,3}\\PC{0,40}") {
            let once = clean_content(&raw);
            proptest::prop_assert_eq!(clean_content(&once), once);
        }
    }

    #[test]
    fn labels_strip_sigils_and_dedupe() {
        let labels = normalize_labels(["#Errand", " errand ", "@Home", "", "#", "home"]);
        assert_eq!(labels, vec!["errand", "home"]);
    }

    #[test]
    fn labels_from_delimited_string() {
        let labels = labels_from_value(Some(&json!("#work, #Home; urgent|work")));
        assert_eq!(labels, vec!["work", "home", "urgent"]);
    }

    #[test]
    fn gratitude_from_string_strips_markers() {
        let items = gratitude_from_value(Some(&json!("1. Coffee\n2) Sunshine; - my cat | ")));
        assert_eq!(items, Some(vec!["Coffee".to_string(), "Sunshine".into(), "my cat".into()]));
    }

    #[test]
    fn gratitude_from_list() {
        let items = gratitude_from_value(Some(&json!(["• family", "", null, "friends"])));
        assert_eq!(items, Some(vec!["family".to_string(), "friends".into()]));
    }

    #[test]
    fn empty_gratitude_is_none() {
        assert_eq!(gratitude_from_value(Some(&json!(" ; , "))), None);
        assert_eq!(gratitude_from_value(Some(&json!(7))), None);
    }
}
