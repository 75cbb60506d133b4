//! Mood detection.
//!
//! Keywords are checked before emoji, and buckets are checked from
//! `Excellent` down to `Poor`; the first hit wins.

use serde_json::Value;

use crate::types::{EntryType, Mood};

struct MoodBucket {
    mood: Mood,
    keywords: &'static [&'static str],
    emoji: &'static [&'static str],
}

const BUCKETS: &[MoodBucket] = &[
    MoodBucket {
        mood: Mood::Excellent,
        keywords: &[
            "excellent", "amazing", "fantastic", "wonderful", "awesome", "ecstatic", "thrilled",
            "incredible", "perfect",
        ],
        emoji: &["🤩", "😍", "🥳", "🤗", "😁"],
    },
    MoodBucket {
        mood: Mood::Good,
        keywords: &[
            "good", "great", "happy", "glad", "nice", "pleased", "grateful", "calm",
            "productive",
        ],
        emoji: &["😊", "🙂", "😀", "😄", "😌", "👍"],
    },
    MoodBucket {
        mood: Mood::Neutral,
        keywords: &["okay", "ok", "fine", "meh", "neutral", "average", "alright", "so-so"],
        emoji: &["😐", "😶", "🤷", "😑"],
    },
    MoodBucket {
        mood: Mood::Poor,
        keywords: &[
            "bad", "sad", "awful", "terrible", "tired", "stressed", "anxious", "angry", "upset",
            "exhausted", "miserable", "sick",
        ],
        emoji: &["😢", "😞", "😡", "😫", "😭", "😔", "👎"],
    },
];

/// Detect a mood in free text; `None` when there is no signal.
pub fn detect_mood(text: &str) -> Option<Mood> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|w| !w.is_empty())
        .collect();

    BUCKETS
        .iter()
        .find(|bucket| bucket.keywords.iter().any(|k| words.contains(k)))
        .or_else(|| {
            BUCKETS
                .iter()
                .find(|bucket| bucket.emoji.iter().any(|e| text.contains(e)))
        })
        .map(|bucket| bucket.mood)
}

/// Mood read from an entry's own text. Tasks and events describe things to
/// do, so their wording is not scanned.
pub fn mood_of_content(kind: EntryType, content: &str) -> Option<Mood> {
    match kind {
        EntryType::Task | EntryType::Event => None,
        _ => detect_mood(content),
    }
}

/// Mood from a provider field: text is scanned, a 1–5 rating is bucketed
/// (5 excellent, 4 good, 3 neutral, 1–2 poor).
pub fn mood_from_value(value: Option<&Value>) -> Option<Mood> {
    match value? {
        Value::String(s) => detect_mood(s),
        Value::Number(n) => {
            let rating = n.as_f64()?;
            if !(1.0..=5.0).contains(&rating) {
                return None;
            }
            Some(match rating.round() as u8 {
                5 => Mood::Excellent,
                4 => Mood::Good,
                3 => Mood::Neutral,
                _ => Mood::Poor,
            })
        }
        _ => None,
    }
}
