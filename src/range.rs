use crate::{
    DateBounds, MONTH_STEP, PanelDate, PanelOptions, Side, SidedPanelView, SingleDatePanel,
};

/// Two consecutive months side by side, as shown by a date range picker.
///
/// The left panel leads: the right panel always shows the first day of the
/// month after the left one and is never moved on its own. Going back is
/// checked against the left panel's min bound, going forward against the
/// right panel's max bound.
#[derive(Debug, Clone)]
pub struct DoubleDatePanel {
    left:  SingleDatePanel,
    right: SingleDatePanel,
}

impl DoubleDatePanel {
    /// Both halves share one today tracker, so one timer serves the pair.
    pub fn new(options: &PanelOptions) -> Self {
        let today = options.today_tracker();
        let left = SingleDatePanel::with_tracker(options.initial_date(), today.clone());
        let right = SingleDatePanel::with_tracker(follower_of(left.shown_date()), today);
        Self { left, right }
    }

    /// Leading panel
    pub const fn left(&self) -> &SingleDatePanel {
        &self.left
    }

    /// Read-only: the right panel only moves with the left one
    pub const fn right(&self) -> &SingleDatePanel {
        &self.right
    }

    /// Date shown by the left panel
    pub const fn left_date(&self) -> PanelDate {
        self.left.shown_date()
    }

    /// Date shown by the right panel, always the first of a month
    pub const fn right_date(&self) -> PanelDate {
        self.right.shown_date()
    }

    /// `[left, right]`
    pub fn date_panels(&self) -> [SidedPanelView; 2] {
        [
            SidedPanelView::new(self.left.date_panel(), Side::Left),
            SidedPanelView::new(self.right.date_panel(), Side::Right),
        ]
    }

    /// Limits shared by both halves
    pub fn bounds(&self) -> &DateBounds {
        self.left.bounds()
    }

    /// Whether the left panel is at its min month
    pub fn is_prev_disabled(&self) -> bool {
        self.left.is_prev_disabled()
    }

    /// Whether the right panel is at its max month
    pub fn is_next_disabled(&self) -> bool {
        self.right.is_next_disabled()
    }

    /// Whether today lies outside the bounds
    pub fn is_today_disabled(&self) -> bool {
        self.left.is_today_disabled()
    }

    /// Moves both panels back a month unless the left one is at its min.
    pub fn prev_month(&mut self) -> bool {
        let moved = self.left.prev_month();
        self.sync_right();
        moved
    }

    /// Moves both panels forward a month unless the right one is at its max.
    pub fn next_month(&mut self) -> bool {
        if self.right.is_next_disabled() {
            log::debug!("next month blocked at {}", self.right.shown_date());
            return false;
        }
        self.left.shift_months(MONTH_STEP);
        self.sync_right();
        true
    }

    fn sync_right(&mut self) {
        self.right.set_shown(follower_of(self.left.shown_date()));
    }
}

/// First day of the month after `left`
fn follower_of(left: PanelDate) -> PanelDate {
    left.add_months(MONTH_STEP).start_of_month()
}
