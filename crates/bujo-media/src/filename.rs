//! Capture times encoded in camera and messenger file names.
//!
//! | convention | example |
//! |------------|---------|
//! | Android camera | `IMG_20261012_083000.jpg`, `VID_…` |
//! | Pixel | `PXL_20261012_083000123.jpg` |
//! | bare timestamp | `20261012_083000.jpg` |
//! | Android screenshot | `Screenshot_2026-10-12-08-30-00.png` |
//! | macOS screenshot | `Screenshot 2026-10-12 at 8.30.00 PM.png` |
//! | WhatsApp | `WhatsApp Image 2026-10-12 at 08.30.00.jpeg` |
//! | WhatsApp (legacy) | `IMG-20261012-WA0007.jpg` (date only, taken as noon) |
//! | Telegram | `photo_2026-10-12_08-30-00.jpg` |
//! | Signal | `signal-2026-10-12-083000.jpg` |

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

const YMD: &str = r"(?P<y>\d{4})(?P<mo>\d{2})(?P<d>\d{2})";
const Y_M_D: &str = r"(?P<y>\d{4})-(?P<mo>\d{2})-(?P<d>\d{2})";
const HMS: &str = r"(?P<h>\d{2})(?P<mi>\d{2})(?P<s>\d{2})";
const DOTTED_HMS: &str = r"(?P<h>\d{1,2})\.(?P<mi>\d{2})\.(?P<s>\d{2})(?:\s?(?P<ampm>[AP]M))?";

struct Convention {
    name: &'static str,
    pattern: Regex,
}

static CONVENTIONS: Lazy<Vec<Convention>> = Lazy::new(|| {
    let conventions = [
        ("android_camera", format!(r"(?:IMG|VID)_{YMD}_{HMS}")),
        ("pixel", format!(r"PXL_{YMD}_{HMS}\d{{3}}")),
        ("bare_timestamp", format!(r"^{YMD}_{HMS}")),
        ("android_screenshot", format!(r"Screenshot_{Y_M_D}-(?P<h>\d{{2}})-(?P<mi>\d{{2}})-(?P<s>\d{{2}})")),
        ("macos_screenshot", format!(r"Screenshot {Y_M_D} at {DOTTED_HMS}")),
        ("whatsapp", format!(r"WhatsApp Image {Y_M_D} at {DOTTED_HMS}")),
        ("whatsapp_legacy", format!(r"IMG-{YMD}-WA\d+")),
        ("telegram", format!(r"photo_{Y_M_D}_(?P<h>\d{{2}})-(?P<mi>\d{{2}})-(?P<s>\d{{2}})")),
        ("signal", format!(r"signal-{Y_M_D}-{HMS}")),
    ];
    conventions
        .into_iter()
        .map(|(name, pattern)| Convention {
            name,
            pattern: Regex::new(&format!("(?i){pattern}")).expect("valid file name pattern"),
        })
        .collect()
});

/// Parse a capture time out of a bare file name. Date-only conventions
/// yield noon.
pub fn parse_file_name(name: &str) -> Option<NaiveDateTime> {
    CONVENTIONS.iter().find_map(|convention| {
        let caps = convention.pattern.captures(name)?;
        let num = |key: &str| caps.name(key).and_then(|m| m.as_str().parse::<u32>().ok());

        let date = NaiveDate::from_ymd_opt(caps["y"].parse().ok()?, num("mo")?, num("d")?)?;
        let time = match num("h") {
            Some(mut hour) => {
                if let Some(ampm) = caps.name("ampm") {
                    let pm = ampm.as_str().eq_ignore_ascii_case("pm");
                    hour = match (hour, pm) {
                        (12, false) => 0,
                        (12, true) => 12,
                        (h, true) => h + 12,
                        (h, false) => h,
                    };
                }
                NaiveTime::from_hms_opt(hour, num("mi")?, num("s")?)?
            }
            None => NaiveTime::from_hms_opt(12, 0, 0)?,
        };
        tracing::trace!(convention = convention.name, name, "file name date");
        Some(date.and_time(time))
    })
}

/// Capture time from `name`, accepted only within `window_days` of `now`.
pub fn date_from_file_name(
    name: &str,
    now: DateTime<Local>,
    window_days: i64,
) -> Option<DateTime<Local>> {
    let parsed = parse_file_name(name)?.and_local_timezone(Local).earliest()?;
    let distance = (parsed.date_naive() - now.date_naive()).num_days().abs();
    if distance > window_days {
        tracing::debug!(name, distance, "file name date outside window; ignored");
        return None;
    }
    Some(parsed)
}
