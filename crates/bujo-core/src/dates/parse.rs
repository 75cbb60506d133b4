//! Multi-format date parsing.
//!
//! Families are attempted in a fixed order and the first one producing a
//! structurally valid date wins; later families are never consulted:
//!
//! ISO → delimited numeric → concatenated numeric → relative terms →
//! weekday names → month-name phrases → free-form.
//!
//! Numeric layouts are data ([`NumericFormat`]) rather than branches. Each
//! candidate is validated by rendering the constructed date back through
//! the same layout and comparing it with the input, so `02/30/2024` or a
//! year outside `[1900, 2100]` is a miss rather than a silently shifted day.
//! Genuinely ambiguous inputs such as `03/04/2024` resolve by table order
//! (month-first wins).

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

// ---------------------------------------------------------------------------
// Format table
// ---------------------------------------------------------------------------

/// Order of the day, month and year fields within a numeric layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearDigits {
    Two,
    Four,
}

impl YearDigits {
    fn width(self) -> usize {
        match self {
            YearDigits::Two => 2,
            YearDigits::Four => 4,
        }
    }
}

/// A numeric date layout: separator (or none for concatenated digits),
/// field order and year width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericFormat {
    pub name: &'static str,
    pub separator: Option<char>,
    pub order: FieldOrder,
    pub year: YearDigits,
}

const fn fmt(
    name: &'static str,
    separator: Option<char>,
    order: FieldOrder,
    year: YearDigits,
) -> NumericFormat {
    NumericFormat { name, separator, order, year }
}

use FieldOrder::{DayMonthYear as Dmy, MonthDayYear as Mdy, YearMonthDay as Ymd};
use YearDigits::{Four, Two};

/// Delimited layouts, month-first before day-first.
pub const DELIMITED_FORMATS: &[NumericFormat] = &[
    fmt("MM/DD/YYYY", Some('/'), Mdy, Four),
    fmt("DD/MM/YYYY", Some('/'), Dmy, Four),
    fmt("YYYY/MM/DD", Some('/'), Ymd, Four),
    fmt("MM-DD-YYYY", Some('-'), Mdy, Four),
    fmt("DD-MM-YYYY", Some('-'), Dmy, Four),
    fmt("DD.MM.YYYY", Some('.'), Dmy, Four),
    fmt("MM/DD/YY", Some('/'), Mdy, Two),
    fmt("DD/MM/YY", Some('/'), Dmy, Two),
    fmt("MM-DD-YY", Some('-'), Mdy, Two),
    fmt("DD-MM-YY", Some('-'), Dmy, Two),
    fmt("DD.MM.YY", Some('.'), Dmy, Two),
    fmt("YYYY.MM.DD", Some('.'), Ymd, Four),
];

/// Digit-only layouts.
pub const CONCATENATED_FORMATS: &[NumericFormat] = &[
    fmt("YYYYMMDD", None, Ymd, Four),
    fmt("MMDDYYYY", None, Mdy, Four),
    fmt("DDMMYYYY", None, Dmy, Four),
    fmt("MMDDYY", None, Mdy, Two),
    fmt("DDMMYY", None, Dmy, Two),
];

impl NumericFormat {
    /// Parse `input` with this layout, returning a date only if it renders
    /// back to the same text and its year is in range.
    pub fn parse(&self, input: &str) -> Option<NaiveDate> {
        let fields = self.split(input)?;
        let (y, m, d) = self.assign(&fields)?;
        let year = self.expand_year(y);
        let date = NaiveDate::from_ymd_opt(year, m, d)?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            return None;
        }
        if self.render(date) != self.canonical(&fields) {
            return None;
        }
        Some(date)
    }

    /// Render `date` in this layout with zero-padded fields.
    pub fn render(&self, date: NaiveDate) -> String {
        let year = match self.year {
            YearDigits::Four => format!("{:04}", date.year()),
            YearDigits::Two => format!("{:02}", date.year().rem_euclid(100)),
        };
        let month = format!("{:02}", date.month());
        let day = format!("{:02}", date.day());
        let parts = match self.order {
            FieldOrder::MonthDayYear => [month, day, year],
            FieldOrder::DayMonthYear => [day, month, year],
            FieldOrder::YearMonthDay => [year, month, day],
        };
        match self.separator {
            Some(sep) => parts.join(&sep.to_string()),
            None => parts.concat(),
        }
    }

    fn year_position(&self) -> usize {
        match self.order {
            FieldOrder::YearMonthDay => 0,
            _ => 2,
        }
    }

    fn split<'a>(&self, input: &'a str) -> Option<Vec<&'a str>> {
        if !input.chars().all(|c| c.is_ascii_digit() || Some(c) == self.separator) {
            return None;
        }
        let fields: Vec<&str> = match self.separator {
            Some(sep) => input.split(sep).collect(),
            None => {
                let width = self.year.width();
                if input.len() != width + 4 {
                    return None;
                }
                let widths = match self.order {
                    FieldOrder::YearMonthDay => [width, 2, 2],
                    _ => [2, 2, width],
                };
                let mut out = Vec::with_capacity(3);
                let mut at = 0;
                for w in widths {
                    out.push(&input[at..at + w]);
                    at += w;
                }
                out
            }
        };
        if fields.len() != 3 {
            return None;
        }
        let year_pos = self.year_position();
        for (i, field) in fields.iter().enumerate() {
            let ok = if i == year_pos {
                field.len() == self.year.width()
            } else {
                (1..=2).contains(&field.len())
            };
            if !ok {
                return None;
            }
        }
        Some(fields)
    }

    fn assign(&self, fields: &[&str]) -> Option<(i32, u32, u32)> {
        let n = |s: &str| s.parse::<u32>().ok();
        let (y, m, d) = match self.order {
            FieldOrder::MonthDayYear => (fields[2], fields[0], fields[1]),
            FieldOrder::DayMonthYear => (fields[2], fields[1], fields[0]),
            FieldOrder::YearMonthDay => (fields[0], fields[1], fields[2]),
        };
        Some((y.parse::<i32>().ok()?, n(m)?, n(d)?))
    }

    fn expand_year(&self, y: i32) -> i32 {
        match self.year {
            YearDigits::Four => y,
            YearDigits::Two if y < 70 => 2000 + y,
            YearDigits::Two => 1900 + y,
        }
    }

    /// The input with month and day zero-padded, for the round-trip check.
    fn canonical(&self, fields: &[&str]) -> String {
        let year_pos = self.year_position();
        let parts: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, f)| if i == year_pos { f.to_string() } else { format!("{f:0>2}") })
            .collect();
        match self.separator {
            Some(sep) => parts.join(&sep.to_string()),
            None => parts.concat(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// The format family that produced a parsed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFamily {
    Iso,
    Delimited,
    Concatenated,
    Relative,
    Weekday,
    MonthDay,
    FreeForm,
}

const FAMILY_ORDER: [FormatFamily; 7] = [
    FormatFamily::Iso,
    FormatFamily::Delimited,
    FormatFamily::Concatenated,
    FormatFamily::Relative,
    FormatFamily::Weekday,
    FormatFamily::MonthDay,
    FormatFamily::FreeForm,
];

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

static MONTH_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<month>[a-z]{3,9})\.?\s+(?P<day>\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(?P<year>\d{4}))?$")
        .expect("valid regex")
});

static DAY_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<day>\d{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?(?P<month>[a-z]{3,9})\.?(?:,?\s+(?P<year>\d{4}))?$")
        .expect("valid regex")
});

static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d)(?:st|nd|rd|th)\b").expect("valid regex"));

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const FREE_FORM_DATE_FORMATS: &[&str] = &[
    "%A, %B %d, %Y",
    "%A %B %d %Y",
    "%a, %b %d, %Y",
    "%a %b %d %Y",
    "%A, %d %B %Y",
    "%a, %d %b %Y",
    "%B %d %Y",
    "%d %B, %Y",
    "%Y %B %d",
];

const FREE_FORM_DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%B %d, %Y %H:%M",
];

/// Parses free text into calendar dates relative to a fixed `today`.
///
/// Total: every method returns `None` rather than failing.
#[derive(Debug, Clone, Copy)]
pub struct DateParser {
    today: NaiveDate,
}

impl DateParser {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn parse(&self, input: &str) -> Option<NaiveDate> {
        self.parse_with_family(input).map(|(date, _)| date)
    }

    /// Parse and report which family matched.
    pub fn parse_with_family(&self, input: &str) -> Option<(NaiveDate, FormatFamily)> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lowered = trimmed.to_lowercase();

        FAMILY_ORDER.iter().find_map(|&family| {
            self.attempt(family, trimmed, &lowered)
                .filter(|d| (MIN_YEAR..=MAX_YEAR).contains(&d.year()))
                .map(|d| (d, family))
        })
    }

    fn attempt(&self, family: FormatFamily, trimmed: &str, lowered: &str) -> Option<NaiveDate> {
        match family {
            FormatFamily::Iso => parse_iso(trimmed),
            FormatFamily::Delimited => first_numeric(DELIMITED_FORMATS, trimmed),
            FormatFamily::Concatenated => first_numeric(CONCATENATED_FORMATS, trimmed),
            FormatFamily::Relative => self.parse_relative(lowered),
            FormatFamily::Weekday => self.parse_weekday(lowered),
            FormatFamily::MonthDay => self.parse_month_day(lowered),
            FormatFamily::FreeForm => parse_free_form(trimmed),
        }
    }

    /// Parse a date that may carry a time of day. Date-only inputs land at
    /// midnight local time.
    pub fn parse_date_time(&self, input: &str) -> Option<DateTime<Local>> {
        let trimmed = input.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(dt.with_timezone(&Local));
        }
        let naive = ISO_DATETIME_FORMATS
            .iter()
            .chain(FREE_FORM_DATETIME_FORMATS)
            .find_map(|f| NaiveDateTime::parse_from_str(trimmed, f).ok())
            .or_else(|| self.parse(trimmed).and_then(|d| d.and_hms_opt(0, 0, 0)))?;
        naive.and_local_timezone(Local).earliest()
    }

    fn parse_relative(&self, lowered: &str) -> Option<NaiveDate> {
        match lowered.trim_end_matches(['.', '!']) {
            "today" | "tonight" => Some(self.today),
            "yesterday" => self.today.checked_sub_days(Days::new(1)),
            "tomorrow" => self.today.checked_add_days(Days::new(1)),
            _ => None,
        }
    }

    /// Next occurrence of the named weekday on or after today.
    fn parse_weekday(&self, lowered: &str) -> Option<NaiveDate> {
        let target = weekday_from_name(lowered.trim_end_matches(['.', ',']))?;
        let ahead = (7 + target.num_days_from_monday() - self.today.weekday().num_days_from_monday()) % 7;
        self.today.checked_add_days(Days::new(u64::from(ahead)))
    }

    /// `Oct 14`, `October 14th`, `14 October`, with an optional year. Without
    /// a year the date lands in the current year, or next year once past.
    fn parse_month_day(&self, lowered: &str) -> Option<NaiveDate> {
        let caps = MONTH_FIRST
            .captures(lowered)
            .or_else(|| DAY_FIRST.captures(lowered))?;
        let month = month_from_name(caps.name("month")?.as_str())?;
        let day: u32 = caps.name("day")?.as_str().parse().ok()?;

        if let Some(year) = caps.name("year") {
            return NaiveDate::from_ymd_opt(year.as_str().parse().ok()?, month, day);
        }

        let this_year = self.today.year();
        match NaiveDate::from_ymd_opt(this_year, month, day) {
            Some(date) if date >= self.today => Some(date),
            _ => NaiveDate::from_ymd_opt(this_year + 1, month, day),
        }
    }
}

fn first_numeric(table: &[NumericFormat], input: &str) -> Option<NaiveDate> {
    table.iter().find_map(|format| format.parse(input))
}

fn parse_iso(input: &str) -> Option<NaiveDate> {
    if ISO_DATE.is_match(input) {
        return NaiveDate::parse_from_str(input, "%Y-%m-%d").ok();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    ISO_DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(input, f).ok())
        .map(|dt| dt.date())
}

fn parse_free_form(input: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.date_naive());
    }
    let cleaned = ORDINAL_SUFFIX.replace_all(input, "$1");
    let cleaned = cleaned.trim();
    FREE_FORM_DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(cleaned, f).ok())
        .or_else(|| {
            FREE_FORM_DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(cleaned, f).ok())
                .map(|dt| dt.date())
        })
}

pub(crate) fn weekday_from_name(name: &str) -> Option<Weekday> {
    let day = match name {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Month number for a full name or an abbreviation of at least three
/// letters (`sept` included).
pub(crate) fn month_from_name(name: &str) -> Option<u32> {
    if name.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|full| full.starts_with(name))
        .map(|i| i as u32 + 1)
}
