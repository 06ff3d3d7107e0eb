use crate::{DateBounds, Granularity, PanelDate, Signal};
use chrono::{Local, NaiveDateTime, TimeDelta};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Source of the current local time
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Signal<NaiveDateTime>,
}

impl ManualClock {
    /// Clock stopped at `now`
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Signal::new(now),
        }
    }

    /// Jumps to `now`
    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    /// Moves forward by `by`
    pub fn advance(&self, by: TimeDelta) {
        self.now.update(|now| *now += by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

/// Tracks "now" and whether today falls outside the bounds.
///
/// The current moment is refreshed on a fixed interval by a task on the
/// ambient tokio runtime, so reads may be up to one interval stale. Clones
/// share the same moment and the same task; the task is aborted once the
/// last clone is dropped. Built outside a runtime, the tracker never
/// refreshes on its own and `refresh` must be called instead.
#[derive(Clone)]
pub struct TodayTracker {
    inner: Arc<Inner>,
}

struct Inner {
    today: Signal<NaiveDateTime>,
    clock: Arc<dyn Clock>,
    bounds: DateBounds,
    ticker: Option<JoinHandle<()>>,
}

impl TodayTracker {
    /// Tracker reading `clock` every `refresh_interval`
    pub fn new(bounds: DateBounds, clock: Arc<dyn Clock>, refresh_interval: Duration) -> Self {
        let today = Signal::new(clock.now());
        let ticker = spawn_ticker(today.clone(), Arc::clone(&clock), refresh_interval);
        Self {
            inner: Arc::new(Inner {
                today,
                clock,
                bounds,
                ticker,
            }),
        }
    }

    /// Latest refreshed moment
    pub fn today(&self) -> PanelDate {
        PanelDate::new(self.inner.today.get())
    }

    /// Re-reads the clock now instead of waiting for the next tick
    pub fn refresh(&self) {
        self.inner.today.set(self.inner.clock.now());
    }

    /// Whether the refresh task is running
    pub fn is_ticking(&self) -> bool {
        self.inner
            .ticker
            .as_ref()
            .is_some_and(|ticker| !ticker.is_finished())
    }

    /// True when today is before the min bound's day or after the max
    /// bound's day. Absent bounds never disable today.
    pub fn is_today_disabled(&self) -> bool {
        let today = self.today();
        let before_min = self
            .inner
            .bounds
            .min
            .limit()
            .is_some_and(|min| today.is_before(&min, Granularity::Day));
        let after_max = self
            .inner
            .bounds
            .max
            .limit()
            .is_some_and(|max| today.is_after(&max, Granularity::Day));
        before_min || after_max
    }

    /// Limits today is checked against
    pub fn bounds(&self) -> &DateBounds {
        &self.inner.bounds
    }
}

fn spawn_ticker(
    today: Signal<NaiveDateTime>,
    clock: Arc<dyn Clock>,
    period: Duration,
) -> Option<JoinHandle<()>> {
    if period.is_zero() {
        log::debug!("zero refresh interval; today will only change on refresh()");
        return None;
    }
    let Ok(handle) = Handle::try_current() else {
        log::debug!("no tokio runtime; today will only change on refresh()");
        return None;
    };

    Some(handle.spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let now = clock.now();
            log::trace!("today refreshed to {now}");
            today.set(now);
        }
    }))
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl fmt::Debug for TodayTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodayTracker")
            .field("today", &self.today())
            .field("bounds", &self.inner.bounds)
            .field("ticking", &self.is_ticking())
            .finish_non_exhaustive()
    }
}
