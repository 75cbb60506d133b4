//! Which journal page a photo most likely shows.
//!
//! People photograph yesterday's page first thing in the morning and
//! tonight's page late in the evening, so the capture day alone is not
//! enough.

use bujo_core::config::EstimatorConfig;
use chrono::{DateTime, Local, NaiveDate, Timelike};

/// Estimate the journal day for a photo captured at `captured`.
///
/// Checked in order:
/// 1. captured today before the morning cutoff → yesterday
/// 2. captured today → today
/// 3. captured yesterday at or after the evening cutoff → today
/// 4. otherwise → the capture day
pub fn estimate_journal_date(
    captured: DateTime<Local>,
    now: DateTime<Local>,
    config: &EstimatorConfig,
) -> NaiveDate {
    let today = now.date_naive();
    let day = captured.date_naive();
    let yesterday = today.pred_opt().unwrap_or(today);

    if day == today && captured.hour() < config.morning_cutoff_hour {
        yesterday
    } else if day == today {
        today
    } else if day == yesterday && captured.hour() >= config.evening_cutoff_hour {
        today
    } else {
        day
    }
}
