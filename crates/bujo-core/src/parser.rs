//! Bullet grammar — turns recognized page text into [`ParsedEntry`] values.
//!
//! Lines are trimmed and tested against an ordered rule table; the first
//! rule that matches decides type and status, and no line is ever matched
//! twice. Completion, migration and scheduling markers come before the
//! generic task bullet they could be confused with.
//!
//! | rule | leading glyph(s) | type | status |
//! |------|------------------|------|--------|
//! | complete | `x ` `X ` `✓` `✔` (+ optional bullet), or `x` glued to a bullet | task | complete |
//! | migrated | `>` `→` `->` (+ optional bullet) | task | migrated |
//! | scheduled | `<` `←` `<-` (+ optional bullet) | task | scheduled |
//! | task | `•` `●` `·` `*`, or `-` followed by whitespace | task | incomplete |
//! | event | `○` `◦`, or `o ` / `O ` | event | incomplete |
//! | note | `—` `–`, or `-` glued to its text | note | incomplete |
//!
//! Lines matching no rule are dropped: they are usually headings, doodles or
//! handwriting the recognizer could not settle on. The one exception is a
//! line that is nothing but a date, which becomes the page date.

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{EntryStatus, EntryType, ParsedEntry, Priority};

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

struct BulletRule {
    name: &'static str,
    pattern: Regex,
    kind: EntryType,
    status: EntryStatus,
}

impl BulletRule {
    fn new(name: &'static str, pattern: &str, kind: EntryType, status: EntryStatus) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("valid bullet rule"),
            kind,
            status,
        }
    }

    /// The line remainder after the bullet, if this rule claims the line.
    fn remainder<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.name("rest"))
            .map(|m| m.as_str())
    }
}

const REST: &str = r"(?P<rest>\S.*)$";

static RULES: Lazy<Vec<BulletRule>> = Lazy::new(|| {
    use EntryStatus::*;
    use EntryType::*;
    vec![
        BulletRule::new("complete", &format!(r"^(?:[xX](?:\s+|[•●·*]\s*)|[✓✔]\s*)(?:[•●·*-]\s*)?{REST}"), Task, Complete),
        BulletRule::new("migrated", &format!(r"^(?:->|[>→])(?:\s*[•●·*-])?\s*{REST}"), Task, Migrated),
        BulletRule::new("scheduled", &format!(r"^(?:<-|[<←])(?:\s*[•●·*-])?\s*{REST}"), Task, Scheduled),
        BulletRule::new("task", r"^(?:[•●·*]\s*|-\s+)(?P<rest>[^\s*].*)$", Task, Incomplete),
        BulletRule::new("event", &format!(r"^(?:[○◦]\s*|[oO]\s+){REST}"), Event, Incomplete),
        BulletRule::new("note", &format!(r"^[—–-]\s*{REST}"), Note, Incomplete),
    ]
});

// ---------------------------------------------------------------------------
// Inline literals
// ---------------------------------------------------------------------------

const MONTHS: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";
const WEEKDAYS: &str = r"(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)";
const WEEKDAYS_SHORT: &str = r"(?:mon|tues?|wed|thu(?:rs?)?|fri|sat|sun)";

/// Date literal alternatives. Inside entry text a dotted date needs a
/// four-digit year, so version numbers like `1.2.34` are not dates.
fn date_alternatives(short_dotted_year: bool) -> String {
    let numeric = if short_dotted_year {
        r"\d{1,2}[/.-]\d{1,2}[/.-](?:\d{4}|\d{2})"
    } else {
        r"\d{1,2}[/-]\d{1,2}[/-](?:\d{4}|\d{2})|\d{1,2}\.\d{1,2}\.\d{4}"
    };
    [
        r"\d{4}-\d{2}-\d{2}".to_string(),
        numeric.to_string(),
        r"\d{4}/\d{1,2}/\d{1,2}".to_string(),
        format!(r"{MONTHS}\.?\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s+\d{{4}})?"),
        format!(r"\d{{1,2}}(?:st|nd|rd|th)?\s+(?:of\s+)?{MONTHS}\.?(?:,?\s+\d{{4}})?"),
        WEEKDAYS.to_string(),
        r"today|tomorrow|yesterday|tonight".to_string(),
    ]
    .join("|")
}

static DATE_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", date_alternatives(false))).expect("valid regex")
});

/// A line that is only a date, optionally led by a weekday name.
static PAGE_DATE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:(?:{WEEKDAYS}|{WEEKDAYS_SHORT})\.?,?\s+)?(?P<date>{})[\s.,:]*$",
        date_alternatives(true)
    ))
    .expect("valid regex")
});

static TIME_12H: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?P<h>1[0-2]|0?[1-9])(?::(?P<m>[0-5]\d))?\s*(?P<meridiem>[ap])\.?m\b\.?")
        .expect("valid regex")
});

static TIME_24H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?P<h>[01]?\d|2[0-3]):(?P<m>[0-5]\d)\b").expect("valid regex"));

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)#(?P<word>[\p{L}\p{N}_][\p{L}\p{N}_-]*)").expect("valid regex"));

static CONTEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)@(?P<word>[\p{L}\p{N}_][\p{L}\p{N}_-]*)").expect("valid regex"));

static SIGIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)[#@][\p{L}\p{N}_][\p{L}\p{N}_-]*").expect("valid regex"));

/// First date literal in `text`, verbatim.
pub fn find_date_literal(text: &str) -> Option<String> {
    DATE_LITERAL.find(text).map(|m| m.as_str().to_string())
}

/// First time-of-day literal in `text` (`1pm`, `9:30 a.m.`, `14:05`).
pub fn find_time_literal(text: &str) -> Option<NaiveTime> {
    if let Some(caps) = TIME_12H.captures(text) {
        let hour: u32 = caps["h"].parse().ok()?;
        let minute: u32 = caps.name("m").map_or(Some(0), |m| m.as_str().parse().ok())?;
        let pm = caps["meridiem"].eq_ignore_ascii_case("p");
        let hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }
    let caps = TIME_24H.captures(text)?;
    NaiveTime::from_hms_opt(caps["h"].parse().ok()?, caps["m"].parse().ok()?, 0)
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Output of parsing one page of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// The first line that consisted solely of a date, verbatim.
    pub page_date: Option<String>,
    pub entries: Vec<ParsedEntry>,
}

/// Scanner for the bullet-journal rapid-logging notation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulletPatternParser;

impl BulletPatternParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse every recognized bullet line in `text`.
    pub fn parse(&self, text: &str) -> Vec<ParsedEntry> {
        self.parse_page(text).entries
    }

    /// Parse `text`, also capturing a handwritten page date if one appears
    /// on a line of its own.
    pub fn parse_page(&self, text: &str) -> ParsedPage {
        let mut page = ParsedPage::default();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(entry) = self.parse_line(line) {
                page.entries.push(entry);
                continue;
            }
            match PAGE_DATE_LINE.captures(line) {
                Some(caps) if page.page_date.is_none() => {
                    let date = caps["date"].to_string();
                    tracing::debug!(page_date = %date, "page date line");
                    page.page_date = Some(date);
                }
                _ => tracing::debug!(line, "no bullet rule matched; line dropped"),
            }
        }
        page
    }

    /// Apply the rule table to a single trimmed line.
    pub fn parse_line(&self, line: &str) -> Option<ParsedEntry> {
        let line = line.trim();
        let (rule, rest) = RULES
            .iter()
            .find_map(|rule| rule.remainder(line).map(|rest| (rule, rest)))?;
        tracing::trace!(rule = rule.name, line, "bullet rule matched");

        let (body, priority) = split_priority(rest);
        let tags = capture_words(&TAG, body);
        let contexts = capture_words(&CONTEXT, body);
        let content = collapse_whitespace(&SIGIL.replace_all(body, " "));

        Some(ParsedEntry {
            kind: rule.kind,
            status: rule.status,
            priority,
            content,
            tags,
            contexts,
            date_literal: find_date_literal(body),
            time: find_time_literal(body),
            raw: line.to_string(),
        })
    }
}

/// Strip trailing `*` markers; any present means high priority.
fn split_priority(rest: &str) -> (&str, Priority) {
    let trimmed = rest.trim_end();
    if trimmed.ends_with('*') {
        (trimmed.trim_end_matches('*').trim_end(), Priority::High)
    } else {
        (trimmed, Priority::None)
    }
}

fn capture_words(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.name("word"))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
