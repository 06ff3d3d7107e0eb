use crate::{DateBounds, Granularity, MONTH_STEP, PanelDate, PanelOptions, PanelView, TodayTracker};

/// One calendar month of date-picker state.
///
/// Every derived value is computed from the shown date and the current
/// bounds at the moment it is read.
#[derive(Debug, Clone)]
pub struct SingleDatePanel {
    shown: PanelDate,
    today: TodayTracker,
}

impl SingleDatePanel {
    /// Panel showing the options' default date
    pub fn new(options: &PanelOptions) -> Self {
        Self::with_tracker(options.initial_date(), options.today_tracker())
    }

    /// Panel sharing an existing tracker (and therefore its bounds)
    pub(crate) fn with_tracker(shown: PanelDate, today: TodayTracker) -> Self {
        Self { shown, today }
    }

    /// Date the panel is showing
    pub const fn shown_date(&self) -> PanelDate {
        self.shown
    }

    /// Snapshot of the shown month
    pub fn date_panel(&self) -> PanelView {
        PanelView::of(self.shown)
    }

    /// Min/max limits this panel navigates within
    pub fn bounds(&self) -> &DateBounds {
        self.today.bounds()
    }

    /// One month back would land before the min bound's month
    pub fn is_prev_disabled(&self) -> bool {
        self.bounds().min.limit().is_some_and(|min| {
            self.shown
                .add_months(-MONTH_STEP)
                .is_before(&min, Granularity::Month)
        })
    }

    /// One month forward would land after the max bound's month
    pub fn is_next_disabled(&self) -> bool {
        self.bounds().max.limit().is_some_and(|max| {
            self.shown
                .add_months(MONTH_STEP)
                .is_after(&max, Granularity::Month)
        })
    }

    /// Whether today lies outside the bounds
    pub fn is_today_disabled(&self) -> bool {
        self.today.is_today_disabled()
    }

    /// Latest refreshed moment from the tracker
    pub fn today(&self) -> PanelDate {
        self.today.today()
    }

    /// Tracker shared with any sibling panel
    pub const fn today_tracker(&self) -> &TodayTracker {
        &self.today
    }

    /// Shows the previous month. Returns false, leaving the panel as it
    /// was, when that would cross the min bound.
    pub fn prev_month(&mut self) -> bool {
        if self.is_prev_disabled() {
            log::debug!("prev month blocked at {}", self.shown);
            return false;
        }
        self.shift_months(-MONTH_STEP);
        true
    }

    /// Shows the next month. Returns false, leaving the panel as it was,
    /// when that would cross the max bound.
    pub fn next_month(&mut self) -> bool {
        if self.is_next_disabled() {
            log::debug!("next month blocked at {}", self.shown);
            return false;
        }
        self.shift_months(MONTH_STEP);
        true
    }

    /// Unchecked move
    pub(crate) fn shift_months(&mut self, months: i32) {
        let shifted = self.shown.add_months(months);
        log::trace!("panel moved from {} to {shifted}", self.shown);
        self.shown = shifted;
    }

    pub(crate) fn set_shown(&mut self, date: PanelDate) {
        self.shown = date;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bound, INVALID_DATE, ManualClock};
    use chrono::NaiveDate;

    fn date(s: &str) -> PanelDate {
        PanelDate::parse(s)
    }

    fn clock() -> ManualClock {
        ManualClock::new(
            NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    fn panel(shown: &str, min: Bound, max: Bound) -> SingleDatePanel {
        SingleDatePanel::new(
            &PanelOptions::new()
                .default_date(shown)
                .min_date(min)
                .max_date(max)
                .clock(clock()),
        )
    }

    #[test]
    fn test_date_panel_scenario() {
        let panel = panel("2024-03-15", Bound::unbounded(), Bound::unbounded());
        let view = panel.date_panel();
        assert_eq!(view.year, Some(2024));
        assert_eq!(view.month, Some(3));
        assert_eq!(view.day, Some(5));
        assert_eq!(view.date_of_month, Some(15));
        assert_eq!(view.label, "2024 年 3 月");
        assert_eq!(view.date, date("2024-03-15"));
    }

    #[test]
    fn test_defaults_to_today() {
        let panel = SingleDatePanel::new(&PanelOptions::new().clock(clock()));
        assert_eq!(panel.shown_date(), panel.today());
        assert_eq!(panel.date_panel().label, "2024 年 3 月");
    }

    #[test]
    fn test_unbounded_never_disabled() {
        let panel = panel("2024-03-15", Bound::unbounded(), Bound::unbounded());
        assert!(!panel.is_prev_disabled());
        assert!(!panel.is_next_disabled());
        assert!(!panel.is_today_disabled());
    }

    #[test]
    fn test_next_disabled_at_max_month() {
        // Any day in the max month still allows reaching it
        let before_max = panel("2024-02-29", Bound::unbounded(), Bound::at("2024-03-01"));
        assert!(!before_max.is_next_disabled());

        let at_max = panel("2024-03-15", Bound::unbounded(), Bound::at("2024-03-31"));
        assert!(at_max.is_next_disabled());
    }

    #[test]
    fn test_prev_disabled_at_min_month() {
        let after_min = panel("2024-04-01", Bound::at("2024-03-31"), Bound::unbounded());
        assert!(!after_min.is_prev_disabled());

        let at_min = panel("2024-03-31", Bound::at("2024-03-01"), Bound::unbounded());
        assert!(at_min.is_prev_disabled());
    }

    #[test]
    fn test_next_disabled_matches_add_months() {
        let max = date("2024-06-15");
        for shown in ["2024-01-31", "2024-04-30", "2024-05-01", "2024-06-30", "2024-07-01"] {
            let panel = panel(shown, Bound::unbounded(), Bound::new(Some(max)));
            let expected = date(shown).add_months(1).is_after(&max, Granularity::Month);
            assert_eq!(panel.is_next_disabled(), expected, "shown {shown}");
        }
    }

    #[test]
    fn test_navigation_moves_one_month() {
        let mut panel = panel("2024-03-15", Bound::unbounded(), Bound::unbounded());
        assert!(panel.next_month());
        assert_eq!(panel.shown_date(), date("2024-04-15"));
        assert!(panel.prev_month());
        assert!(panel.prev_month());
        assert_eq!(panel.shown_date(), date("2024-02-15"));
        assert_eq!(panel.date_panel().label, "2024 年 2 月");
    }

    #[test]
    fn test_next_then_prev_restores_month() {
        let mut panel = panel("2024-06-15", Bound::unbounded(), Bound::unbounded());
        let before = panel.shown_date();
        panel.next_month();
        panel.prev_month();
        assert_eq!(panel.shown_date(), before);
    }

    #[test]
    fn test_navigation_across_year() {
        let mut panel = panel("2024-12-10", Bound::unbounded(), Bound::unbounded());
        panel.next_month();
        let view = panel.date_panel();
        assert_eq!((view.year, view.month), (Some(2025), Some(1)));
        assert_eq!(view.label, "2025 年 1 月");
    }

    #[test]
    fn test_month_end_clamps() {
        let mut panel = panel("2024-01-31", Bound::unbounded(), Bound::unbounded());
        panel.next_month();
        assert_eq!(panel.shown_date(), date("2024-02-29"));
    }

    #[test]
    fn test_blocked_navigation_is_noop() {
        let mut panel = panel("2024-03-15", Bound::at("2024-03-01"), Bound::at("2024-03-31"));
        assert!(!panel.next_month());
        assert!(!panel.prev_month());
        assert_eq!(panel.shown_date(), date("2024-03-15"));
    }

    #[test]
    fn test_never_crosses_bounds() {
        let mut panel = panel("2024-03-15", Bound::at("2024-01-20"), Bound::at("2024-05-02"));
        while panel.next_month() {}
        assert_eq!(panel.date_panel().month, Some(5));
        while panel.prev_month() {}
        assert_eq!(panel.date_panel().month, Some(1));
    }

    #[test]
    fn test_follows_bound_changes() {
        let max = Bound::unbounded();
        let mut panel = panel("2024-03-15", Bound::unbounded(), max.clone());
        assert!(panel.next_month());

        max.set(Some(date("2024-04-30")));
        assert!(panel.is_next_disabled());
        assert!(!panel.next_month());

        max.set(None);
        assert!(panel.next_month());
        assert_eq!(panel.date_panel().month, Some(5));
    }

    #[test]
    fn test_today_disabled_delegates() {
        // Clock reads 2024-03-15
        let min_next_month = panel("2024-05-01", Bound::at("2024-04-01"), Bound::unbounded());
        assert!(min_next_month.is_today_disabled());
        let min_today = panel("2024-05-01", Bound::at("2024-03-15"), Bound::unbounded());
        assert!(!min_today.is_today_disabled());
    }

    #[test]
    fn test_invalid_start_degrades() {
        let mut panel = panel("not a date", Bound::at("2024-01-01"), Bound::at("2024-12-31"));
        let view = panel.date_panel();
        assert_eq!(view.year, None);
        assert_eq!(view.month, None);
        assert_eq!(view.label, INVALID_DATE);
        assert!(!panel.is_prev_disabled());
        assert!(!panel.is_next_disabled());

        panel.next_month();
        assert!(!panel.shown_date().is_valid());
    }
}
