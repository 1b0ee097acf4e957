//! Month preview: the dates a rule is active on in one calendar month,
//! each tagged with its scheduling week.

use pc_core::errors::Result;
use pc_time::{scheduling_week_of, Date, Month, SchedulingWeek};

use crate::evaluator::enumerate_matches;
use crate::rule::Rule;

/// One active date of a month preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewEntry {
    /// The matching date.
    pub date: Date,
    /// Its scheduling week, `None` for days before the month's first Monday.
    pub week: Option<SchedulingWeek>,
}

impl PreviewEntry {
    /// `"W2"` … or `"Pre-W1"`.
    pub fn week_label(&self) -> String {
        self.week
            .map(|w| w.label())
            .unwrap_or_else(|| "Pre-W1".to_string())
    }
}

impl std::fmt::Display for PreviewEntry {
    /// `[W2] Jan 12 (Mon)`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} {} ({})",
            self.week_label(),
            self.date.month().short_name(),
            self.date.day_of_month(),
            self.date.weekday().short_name()
        )
    }
}

/// List the dates of `month` on which `rule` is active.
pub fn month_preview(rule: &Rule, year: u16, month: Month) -> Result<Vec<PreviewEntry>> {
    let first = Date::first_of_month(year, month)?;
    Ok(enumerate_matches(rule, first, first.end_of_month())
        .map(|date| PreviewEntry {
            date,
            week: scheduling_week_of(date),
        })
        .collect())
}
