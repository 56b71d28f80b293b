//! Relative time formatting ("3 hours ago", "2 days from now").

use chrono::NaiveDateTime;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Describes `then` relative to `now` using the largest whole unit.
///
/// Anything under a second reads as "1 second ago". Months are 30 days and years
/// 365 days.
#[must_use]
pub fn diff_for_humans(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let seconds = (now - then).num_seconds();
    let (elapsed, direction) = if seconds >= 0 {
        (seconds, "ago")
    } else {
        (-seconds, "from now")
    };

    let (count, unit) = match elapsed {
        s if s < MINUTE => (s.max(1), "second"),
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < WEEK => (s / DAY, "day"),
        s if s < MONTH => (s / WEEK, "week"),
        s if s < YEAR => (s / MONTH, "month"),
        s => (s / YEAR, "year"),
    };

    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} {direction}")
}
