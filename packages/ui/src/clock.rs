//! Local wall-clock helpers for the schedule step.

use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};

/// `HH:MM` in the device's local time zone.
pub fn local_hhmm(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M").to_string()
}

/// Keep the local date of `ts`, replace its time of day with `hhmm`.
///
/// Accepts `HH:MM` and `HH:MM:SS`, which is what time inputs emit.
pub fn with_local_time(ts: &DateTime<Utc>, hhmm: &str) -> Option<DateTime<Utc>> {
    let value = hhmm.trim();
    let time = NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()?;
    let date = ts.with_timezone(&Local).date_naive();
    Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}
