mod consts;
mod helpers;
mod media;
mod options;
mod prelude;
mod range;
mod signal;
mod single;
mod today;
mod types;

pub use consts::*;
pub use helpers::{adapter_validated_time, check_cross_day, format_date, format_date_time};
pub use media::{MediaFeature, MediaQuery, MediaQueryFlag, is_mobile};
pub use options::{ConfigError, PanelConfig, PanelOptions};
pub use range::DoubleDatePanel;
pub use signal::{Bound, Signal};
pub use single::SingleDatePanel;
pub use today::{Clock, ManualClock, SystemClock, TodayTracker};
pub use types::{DateBounds, Granularity, PanelView, Side, SidedPanelView};

use crate::prelude::*;
use chrono::{DateTime, Local, Months, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt::{self, Write as _};
use std::str::FromStr;

/// A point in time shown or compared by a panel, or the invalid date.
///
/// Values are timezone-naive local date-times. Anything that cannot be
/// understood as a date collapses to the invalid value instead of failing,
/// so derived views stay renderable no matter what the caller passes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelDate(Option<NaiveDateTime>);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date: {_0}")]
    InvalidDate(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Invalid media query: {_0}")]
    InvalidMediaQuery(String),
    #[display(fmt = "Unsupported media feature: {_0}")]
    UnsupportedMediaFeature(String),
    #[display(fmt = "Invalid length {_0} (expected e.g. 480px)")]
    InvalidLength(String),
}

impl std::error::Error for ParseError {}

/// Date-time layouts accepted by `FromStr`, tried in order.
const DATE_TIME_PATTERNS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Date-only layouts accepted by `FromStr`; these resolve to midnight.
const DATE_PATTERNS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

impl PanelDate {
    /// Wraps a concrete date-time
    pub const fn new(value: NaiveDateTime) -> Self {
        Self(Some(value))
    }

    /// The invalid date
    pub const fn invalid() -> Self {
        Self(None)
    }

    /// Current local time according to `clock`
    pub fn now(clock: &dyn Clock) -> Self {
        Self::new(clock.now())
    }

    /// Lenient parse: anything `FromStr` rejects becomes the invalid date.
    pub fn parse(input: &str) -> Self {
        input.parse().unwrap_or_else(|err| {
            log::trace!("treating {input:?} as invalid date: {err}");
            Self::invalid()
        })
    }

    pub const fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Returns the underlying date-time if valid
    pub const fn value(&self) -> Option<NaiveDateTime> {
        self.0
    }

    /// Returns the calendar date if valid
    pub fn date(&self) -> Option<NaiveDate> {
        self.0.map(|value| value.date())
    }

    /// Proleptic Gregorian year
    pub fn year(&self) -> Option<i32> {
        self.0.map(|value| value.year())
    }

    /// Month, 1-indexed (January = 1)
    pub fn month(&self) -> Option<u32> {
        self.0.map(|value| value.month())
    }

    /// Month, 0-indexed (January = 0)
    pub fn month0(&self) -> Option<u32> {
        self.0.map(|value| value.month0())
    }

    /// Day of month, 1-indexed
    pub fn day(&self) -> Option<u32> {
        self.0.map(|value| value.day())
    }

    /// Day of week counted from Sunday (Sunday = 0)
    pub fn weekday(&self) -> Option<u32> {
        self.0.map(|value| value.weekday().num_days_from_sunday())
    }

    /// Shifts by whole calendar months. A day that does not exist in the
    /// target month is clamped to that month's last day, so Jan 31 + 1 is
    /// Feb 28 (or 29). Overflowing the representable range yields invalid.
    pub fn add_months(self, months: i32) -> Self {
        let Some(value) = self.0 else {
            return self;
        };
        let delta = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            value.checked_add_months(delta)
        } else {
            value.checked_sub_months(delta)
        };
        Self(shifted)
    }

    /// Midnight on the first day of the same month
    pub fn start_of_month(self) -> Self {
        Self(self.0.and_then(|value| {
            value
                .date()
                .with_day(FIRST_DAY)
                .and_then(|first| first.and_hms_opt(0, 0, 0))
        }))
    }

    /// Strictly earlier at the given granularity. Always false when either
    /// side is invalid.
    pub fn is_before(&self, other: &Self, granularity: Granularity) -> bool {
        match (self.0, other.0) {
            (Some(a), Some(b)) => granularity.key(a) < granularity.key(b),
            _ => false,
        }
    }

    /// Strictly later at the given granularity. Always false when either
    /// side is invalid.
    pub fn is_after(&self, other: &Self, granularity: Granularity) -> bool {
        match (self.0, other.0) {
            (Some(a), Some(b)) => granularity.key(a) > granularity.key(b),
            _ => false,
        }
    }

    /// Same day or same month. False when either side is invalid.
    pub fn is_same(&self, other: &Self, granularity: Granularity) -> bool {
        match (self.0, other.0) {
            (Some(a), Some(b)) => granularity.key(a) == granularity.key(b),
            _ => false,
        }
    }

    /// Formats with a strftime pattern. The invalid date formats to
    /// `INVALID_DATE`; a pattern chrono cannot render yields an empty string.
    pub fn format(&self, pattern: &str) -> String {
        let Some(value) = self.0 else {
            return INVALID_DATE.to_owned();
        };
        let mut out = String::new();
        if write!(out, "{}", value.format(pattern)).is_err() {
            log::debug!("cannot format date with pattern {pattern:?}");
            return String::new();
        }
        out
    }
}

impl fmt::Display for PanelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value.format(ISO_DATE_TIME_FORMAT)),
            None => f.write_str(INVALID_DATE),
        }
    }
}

impl FromStr for PanelDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // Offsets are converted to local wall-clock time
        if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::from(value));
        }

        if let Some(value) = DATE_TIME_PATTERNS
            .iter()
            .find_map(|pattern| NaiveDateTime::parse_from_str(trimmed, pattern).ok())
        {
            return Ok(Self::new(value));
        }

        let date = DATE_PATTERNS
            .iter()
            .find_map(|pattern| NaiveDate::parse_from_str(trimmed, pattern).ok())
            .or_else(|| Self::parse_year_month(trimmed));

        date.and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self::new)
            .ok_or_else(|| ParseError::InvalidDate(trimmed.to_owned()))
    }
}

impl PanelDate {
    /// `YYYY-MM`, resolved to the first of the month
    fn parse_year_month(s: &str) -> Option<NaiveDate> {
        let (year, month) = s.split_once('-')?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return None;
        }
        NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, FIRST_DAY)
    }
}

impl From<NaiveDateTime> for PanelDate {
    fn from(value: NaiveDateTime) -> Self {
        Self::new(value)
    }
}

impl From<NaiveDate> for PanelDate {
    fn from(value: NaiveDate) -> Self {
        Self(value.and_hms_opt(0, 0, 0))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for PanelDate {
    fn from(value: DateTime<Tz>) -> Self {
        Self::new(value.with_timezone(&Local).naive_local())
    }
}

impl From<&str> for PanelDate {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for PanelDate {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl<T: Into<PanelDate>> From<Option<T>> for PanelDate {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::invalid, Into::into)
    }
}

impl serde::Serialize for PanelDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.0 {
            Some(_) => serializer.serialize_str(&self.to_string()),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> serde::Deserialize<'de> for PanelDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            Some(s) => s.parse().map_err(serde::de::Error::custom),
            None => Ok(Self::invalid()),
        }
    }
}
