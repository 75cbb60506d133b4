//! Fixed clock, sample pages and provider payloads used across harnesses.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde_json::{json, Value};

/// Wednesday 2026-10-14, noon local time.
pub fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap()
}

pub fn today() -> NaiveDate {
    now().date_naive()
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// A daily-log page using every bullet the grammar knows.
pub const PAGE_DAILY: &str = "\
Wednesday, October 14, 2026
• Buy milk #errand @store
x Finish quarterly report *
> Email landlord about the lease
< Book dentist for next month
o Lunch with Sam 1pm
- Call mom
–Felt calm after the run
";

/// Text where nothing is a bullet line.
pub const PAGE_NOISE: &str = "\
TODO
~~~~~~~
random scribble
12
";

/// Lines each of which is a recognized bullet.
pub const BULLET_LINES: &[&str] = &[
    "• Buy milk",
    "● Water plants",
    "· Pay rent",
    "- Call mom",
    "* Renew passport",
    "*Sort the mail",
    "x Finish report",
    "x•Return library books",
    "X • Ship the release",
    "✓ Walk the dog",
    "> Email landlord",
    "→ Move standup",
    "< Book dentist",
    "← Plan trip",
    "o Lunch with Sam 1pm",
    "○ Team offsite",
    "◦ Yoga 7:30",
    "— Idea: garden planner",
    "–Rainy day",
    "-ish thoughts",
];

/// A provider payload wrapped in an envelope with a shared page date.
pub fn provider_envelope() -> Value {
    json!({
        "pageDate": "2026-10-10",
        "entries": [
            {"type": "todo", "content": "pay rent", "priority": "high", "tags": "#home, bills"},
            {"type": "appointment", "content": "Dentist", "time": "3:30 pm"},
            {"category": "memory", "text": "Beach day", "mood": 5, "gratitude": ["sun", "friends"]},
            {"type": "note", "content": "Ran 5k", "date": "10/12/2026", "pageDate": "2026-10-11"},
        ],
    })
}
