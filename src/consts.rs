use std::time::Duration;

/// Display format used by `format_date` (`2024/03/15`)
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Display format used by `format_date_time` (`2024/03/15 09:30`)
pub const DATE_TIME_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Serialized form of a valid `PanelDate`
pub const ISO_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// What an invalid date formats to
pub const INVALID_DATE: &str = "Invalid Date";

/// Suffix placed after the year in a panel label
pub const YEAR_SUFFIX: &str = "年";
/// Suffix placed after the month in a panel label
pub const MONTH_SUFFIX: &str = "月";

/// First day of month, used when anchoring the right-hand panel
pub const FIRST_DAY: u32 = 1;

/// Months moved by a single `prev_month` / `next_month`
pub const MONTH_STEP: i32 = 1;

/// How often a `TodayTracker` re-reads its clock
pub const TODAY_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Hours in a day; a cross-day hour is at least this
pub const HOURS_PER_DAY: i64 = 24;

/// Separator between hour and minute in `HH:mm`
pub const TIME_SEPARATOR: char = ':';

/// Widest viewport, in CSS pixels, still considered mobile
pub const MOBILE_MAX_WIDTH: u32 = 480;

/// Keyword joining media query conditions
pub(crate) const MEDIA_AND: &str = " and ";
/// Length unit accepted in width features
pub(crate) const PIXEL_UNIT: &str = "px";
