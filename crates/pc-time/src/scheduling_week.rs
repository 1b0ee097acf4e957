//! Scheduling weeks.
//!
//! A *scheduling month* starts on the first Monday on or after the 1st of
//! the calendar month and runs until the first Monday of the next month. It
//! is cut into 7-day windows labeled `W1`, `W2`, … (four or five of them).
//! Days of a calendar month that come before its first Monday ("pre-W1")
//! belong to no scheduling week of that month.

use crate::date::{serial_from_ymd, Date};
use crate::month::Month;
use pc_core::ensure;
use pc_core::errors::{Error, Result};

/// A closed 7-day date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekWindow {
    /// First day (always a Monday).
    pub start: Date,
    /// Last day (always a Sunday), `start + 6`.
    pub end: Date,
}

impl WeekWindow {
    /// Return `true` if `date` lies in the window.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// One scheduling week of a given month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchedulingWeek {
    /// Calendar year of the scheduling month.
    pub year: u16,
    /// Calendar month the week is counted in.
    pub month: Month,
    /// 0-based week index; displayed as `W{index + 1}`.
    pub index: u8,
    /// The dates the week covers.
    pub window: WeekWindow,
}

impl SchedulingWeek {
    /// 1-based week number (1–5).
    pub fn number(&self) -> u8 {
        self.index + 1
    }

    /// Display label, `"W1"` … `"W5"`.
    pub fn label(&self) -> String {
        format!("W{}", self.number())
    }
}

impl std::fmt::Display for SchedulingWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} W{} [{}, {}]",
            self.month.long_name(),
            self.year,
            self.number(),
            self.window.start,
            self.window.end
        )
    }
}

/// Return the first Monday on or after the 1st of `month`.
pub fn first_monday_on_or_after(year: u16, month: Month) -> Result<Date> {
    Date::first_of_month(year, month)?;
    Ok(Date::from_serial_unchecked(first_monday_serial(year, month)))
}

/// Number of scheduling weeks in `month`: the whole 7-day windows between
/// its first Monday and the next month's first Monday.
pub fn scheduling_week_count(year: u16, month: Month) -> Result<u8> {
    Date::first_of_month(year, month)?;
    Ok(week_count(year, month))
}

/// Return the window of the scheduling week with 0-based `week_index`.
///
/// # Errors
/// Fails if the year is out of range or `week_index` is not below
/// [`scheduling_week_count`].
pub fn scheduling_week_window(year: u16, month: Month, week_index: u8) -> Result<WeekWindow> {
    let count = scheduling_week_count(year, month)?;
    ensure!(
        week_index < count,
        "{} {year} has {count} scheduling weeks, no W{}",
        month.long_name(),
        week_index as u16 + 1
    );
    Ok(window_at(first_monday_serial(year, month), week_index))
}

/// Return the scheduling week of its own calendar month that contains `date`,
/// or `None` if `date` comes before that month's first Monday.
pub fn scheduling_week_of(date: Date) -> Option<SchedulingWeek> {
    let (year, month) = (date.year(), date.month());
    let first_monday = first_monday_serial(year, month);
    let offset = date.serial() - first_monday;
    if offset < 0 {
        return None;
    }
    let index = (offset / 7) as u8;
    Some(SchedulingWeek {
        year,
        month,
        index,
        window: window_at(first_monday, index),
    })
}

/// Enumerate every scheduling week of `year`, January `W1` first.
pub fn enumerate_scheduling_weeks(year: u16) -> Result<SchedulingWeeks> {
    Date::first_of_month(year, Month::January)
        .map_err(|e| Error::Date(format!("cannot enumerate scheduling weeks: {e}")))?;
    Ok(SchedulingWeeks {
        year,
        month: 0,
        index: 0,
    })
}

/// Iterator over the scheduling weeks of one year.
///
/// Returned by [`enumerate_scheduling_weeks`]; clone it to restart.
#[derive(Debug, Clone)]
pub struct SchedulingWeeks {
    year: u16,
    /// 0-based index into [`Month::ALL`]; 12 once exhausted.
    month: usize,
    index: u8,
}

impl Iterator for SchedulingWeeks {
    type Item = SchedulingWeek;

    fn next(&mut self) -> Option<SchedulingWeek> {
        let month = *Month::ALL.get(self.month)?;
        let week = SchedulingWeek {
            year: self.year,
            month,
            index: self.index,
            window: window_at(first_monday_serial(self.year, month), self.index),
        };
        self.index += 1;
        if self.index >= week_count(self.year, month) {
            self.index = 0;
            self.month += 1;
        }
        Some(week)
    }
}

impl std::iter::FusedIterator for SchedulingWeeks {}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Serial of the first Monday on or after the 1st. Valid for any year from
/// 1900 on, so December can peek at January of the following year.
fn first_monday_serial(year: u16, month: Month) -> i32 {
    let first = serial_from_ymd(year, month.number(), 1);
    let weekday = (first - 1).rem_euclid(7); // Monday = 0
    first + (7 - weekday) % 7
}

fn week_count(year: u16, month: Month) -> u8 {
    let next = match month.succ() {
        (m, false) => first_monday_serial(year, m),
        (m, true) => first_monday_serial(year + 1, m),
    };
    ((next - first_monday_serial(year, month)) / 7) as u8
}

fn window_at(first_monday: i32, index: u8) -> WeekWindow {
    let start = Date::from_serial_unchecked(first_monday + 7 * index as i32);
    WeekWindow {
        start,
        end: start.add_days_unchecked(6),
    }
}
