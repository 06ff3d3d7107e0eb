use crate::{
    Bound, Clock, DateBounds, PanelDate, ParseError, SystemClock, TODAY_REFRESH_INTERVAL,
    TodayTracker,
};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Everything a panel needs at construction time.
///
/// Bounds are shared cells: keep a clone of `min_date` / `max_date` to move
/// the limits later and every panel built from these options will follow.
#[derive(Clone)]
pub struct PanelOptions {
    /// Initially shown date; `None` means the clock's current time
    pub default_date: Option<PanelDate>,
    pub bounds: DateBounds,
    pub clock: Arc<dyn Clock>,
    pub refresh_interval: Duration,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            default_date: None,
            bounds: DateBounds::unbounded(),
            clock: Arc::new(SystemClock),
            refresh_interval: TODAY_REFRESH_INTERVAL,
        }
    }
}

impl fmt::Debug for PanelOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelOptions")
            .field("default_date", &self.default_date)
            .field("bounds", &self.bounds)
            .field("refresh_interval", &self.refresh_interval)
            .finish_non_exhaustive()
    }
}

impl PanelOptions {
    /// Unbounded options on the system clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initially shown date
    pub fn default_date(mut self, date: impl Into<PanelDate>) -> Self {
        self.default_date = Some(date.into());
        self
    }

    /// Sets the lower bound cell
    pub fn min_date(mut self, min: Bound) -> Self {
        self.bounds.min = min;
        self
    }

    /// Sets the upper bound cell
    pub fn max_date(mut self, max: Bound) -> Self {
        self.bounds.max = max;
        self
    }

    /// Sets the time source
    pub fn clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Sets how often today is re-read
    pub const fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Shown date to start from
    pub(crate) fn initial_date(&self) -> PanelDate {
        self.default_date
            .unwrap_or_else(|| PanelDate::now(self.clock.as_ref()))
    }

    pub(crate) fn today_tracker(&self) -> TodayTracker {
        TodayTracker::new(
            self.bounds.clone(),
            Arc::clone(&self.clock),
            self.refresh_interval,
        )
    }
}

/// Error type for loading panel configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A date field could not be parsed.
    #[error("Invalid {field}: {source}")]
    InvalidDate {
        field: &'static str,
        #[source]
        source: ParseError,
    },

    /// The today refresh interval must be positive.
    #[error("today_refresh_secs must be greater than zero")]
    ZeroRefreshInterval,
}

/// Serializable panel configuration, e.g. loaded from JSON.
///
/// Unlike `PanelDate::parse`, dates here are validated: a typo in a config
/// file is reported rather than silently shown as an invalid panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    pub default_date: Option<String>,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub today_refresh_secs: Option<u64>,
}

impl PanelConfig {
    /// Builds options using the system clock
    ///
    /// # Errors
    /// Returns `ConfigError` if a date does not parse or the refresh
    /// interval is zero.
    pub fn into_options(self) -> Result<PanelOptions, ConfigError> {
        let refresh_interval = match self.today_refresh_secs {
            Some(0) => return Err(ConfigError::ZeroRefreshInterval),
            Some(secs) => Duration::from_secs(secs),
            None => TODAY_REFRESH_INTERVAL,
        };

        Ok(PanelOptions {
            default_date: parse_field("default_date", self.default_date)?,
            bounds: DateBounds::new(
                Bound::new(parse_field("min_date", self.min_date)?),
                Bound::new(parse_field("max_date", self.max_date)?),
            ),
            refresh_interval,
            ..PanelOptions::default()
        })
    }
}

fn parse_field(field: &'static str, value: Option<String>) -> Result<Option<PanelDate>, ConfigError> {
    value
        .map(|s| s.parse::<PanelDate>().map_err(|source| ConfigError::InvalidDate { field, source }))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let min = Bound::at("2024-01-01");
        let options = PanelOptions::new()
            .default_date("2024-03-15")
            .min_date(min.clone())
            .refresh_interval(Duration::from_secs(60));

        assert_eq!(options.initial_date(), PanelDate::parse("2024-03-15"));
        assert_eq!(options.refresh_interval, Duration::from_secs(60));
        assert_eq!(options.bounds.max.get(), None);

        min.set(None);
        assert_eq!(options.bounds.min.get(), None);
    }

    #[test]
    fn test_default_date_comes_from_clock() {
        let now = PanelDate::parse("2030-06-01 10:00").value().unwrap();
        let options = PanelOptions::new().clock(crate::ManualClock::new(now));
        assert_eq!(options.initial_date(), PanelDate::new(now));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "default_date": "2024-03-15",
            "min_date": "2024-01-01",
            "max_date": "2024-12-31",
            "today_refresh_secs": 600
        }"#;
        let config: PanelConfig = serde_json::from_str(json).unwrap();
        let options = config.into_options().unwrap();

        assert_eq!(options.default_date, Some(PanelDate::parse("2024-03-15")));
        assert_eq!(options.bounds.min.limit(), Some(PanelDate::parse("2024-01-01")));
        assert_eq!(options.bounds.max.limit(), Some(PanelDate::parse("2024-12-31")));
        assert_eq!(options.refresh_interval, Duration::from_secs(600));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: PanelConfig = serde_json::from_str("{}").unwrap();
        let options = config.into_options().unwrap();
        assert_eq!(options.default_date, None);
        assert_eq!(options.bounds.min.get(), None);
        assert_eq!(options.refresh_interval, TODAY_REFRESH_INTERVAL);
    }

    #[test]
    fn test_config_rejects_bad_date() {
        let config = PanelConfig {
            max_date: Some("2024-02-30".to_owned()),
            ..PanelConfig::default()
        };
        let err = config.into_options().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDate {
                field: "max_date",
                ..
            }
        ));
        assert!(err.to_string().starts_with("Invalid max_date"));
    }

    #[test]
    fn test_config_rejects_zero_interval() {
        let config = PanelConfig {
            today_refresh_secs: Some(0),
            ..PanelConfig::default()
        };
        assert_eq!(
            config.into_options().unwrap_err(),
            ConfigError::ZeroRefreshInterval
        );
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let result: Result<PanelConfig, _> = serde_json::from_str(r#"{"minDate": "2024-01-01"}"#);
        assert!(result.is_err());
    }
}
