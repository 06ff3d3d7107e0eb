use crate::consts::{INVALID_DATE, MONTH_SUFFIX, YEAR_SUFFIX};
use crate::prelude::*;
use crate::{Bound, PanelDate};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Unit at which two dates are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Granularity {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
}

impl Granularity {
    /// Comparable key with everything finer than `self` dropped
    pub(crate) fn key(self, value: NaiveDateTime) -> (i32, u32, u32) {
        match self {
            Self::Day => (value.year(), value.month(), value.day()),
            Self::Month => (value.year(), value.month(), 0),
        }
    }
}

/// Which half of a double panel a view belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Side {
    #[display(fmt = "left")]
    Left,
    #[display(fmt = "right")]
    Right,
}

/// Optional min/max limits shared by every panel and tracker built from
/// the same options. Cloning shares the underlying cells.
#[derive(Debug, Clone, Default)]
pub struct DateBounds {
    pub min: Bound,
    pub max: Bound,
}

impl DateBounds {
    /// Bounds backed by the given cells
    pub fn new(min: Bound, max: Bound) -> Self {
        Self { min, max }
    }

    /// Neither side limited
    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// Snapshot of what a single panel displays.
///
/// `year` and `month` come from the proleptic Gregorian calendar and are
/// safe to hand to other systems; `label` is for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub date: PanelDate,
    pub year: Option<i32>,
    /// 1-indexed
    pub month: Option<u32>,
    /// Day of the week, Sunday = 0
    pub day: Option<u32>,
    pub date_of_month: Option<u32>,
    pub label: String,
}

impl PanelView {
    /// Derives every field from `date`
    pub fn of(date: PanelDate) -> Self {
        let year = date.year();
        let month = date.month();
        let label = match (year, month) {
            (Some(year), Some(month)) => format!("{year} {YEAR_SUFFIX} {month} {MONTH_SUFFIX}"),
            _ => INVALID_DATE.to_owned(),
        };
        Self {
            date,
            year,
            month,
            day: date.weekday(),
            date_of_month: date.day(),
            label,
        }
    }
}

/// A `PanelView` tagged with its position in a double panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidedPanelView {
    #[serde(flatten)]
    pub view: PanelView,
    pub is_left: bool,
    pub is_right: bool,
}

impl SidedPanelView {
    /// Tags `view` with `side`
    pub fn new(view: PanelView, side: Side) -> Self {
        Self {
            view,
            is_left: side == Side::Left,
            is_right: side == Side::Right,
        }
    }

    /// Which half this view belongs to
    pub const fn side(&self) -> Side {
        if self.is_left { Side::Left } else { Side::Right }
    }
}
