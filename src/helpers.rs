//! Display helpers for dates and shop-hours style times.

use crate::{DATE_FORMAT, DATE_TIME_FORMAT, HOURS_PER_DAY, PanelDate, TIME_SEPARATOR};

/// `YYYY/MM/DD`, or an empty string for an absent or invalid date
pub fn format_date(input: impl Into<PanelDate>) -> String {
    format_or_empty(input.into(), DATE_FORMAT)
}

/// `YYYY/MM/DD HH:mm`, or an empty string for an absent or invalid date
pub fn format_date_time(input: impl Into<PanelDate>) -> String {
    format_or_empty(input.into(), DATE_TIME_FORMAT)
}

fn format_or_empty(date: PanelDate, pattern: &str) -> String {
    if date.is_valid() {
        date.format(pattern)
    } else {
        String::new()
    }
}

/// Whether an `HH:mm` time belongs to the next day.
///
/// Closing times past midnight are written with hours of 24 and up, so
/// 04:30 the next morning arrives as `28:30`. A non-numeric hour is never
/// cross-day.
pub fn check_cross_day(time: &str) -> bool {
    cross_day_hour(time).is_some()
}

/// Normalizes a possibly cross-day `HH:mm` into a wall-clock time:
/// `28:30` becomes `04:30`. The hour is padded to two digits, the minute
/// is kept as written and any seconds are dropped.
pub fn adapter_validated_time(time: &str) -> String {
    let mut fields = time.split(TIME_SEPARATOR);
    let hour = fields.next().unwrap_or_default();
    let minute = fields.next().unwrap_or_default();
    let hour = cross_day_hour(time).map_or_else(
        || hour.to_owned(),
        |hour| (hour - HOURS_PER_DAY).to_string(),
    );
    format!("{hour:0>2}{TIME_SEPARATOR}{minute}")
}

/// The numeric hour, if it is 24 or more
fn cross_day_hour(time: &str) -> Option<i64> {
    let hour = time.split(TIME_SEPARATOR).next()?.trim();
    hour.parse::<i64>()
        .ok()
        .filter(|hour| *hour >= HOURS_PER_DAY)
}
