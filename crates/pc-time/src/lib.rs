//! # pc-time
//!
//! Pure calendar arithmetic behind pipe codes: dates, weekdays, scheduling
//! weeks, calendar occurrences, and ISO week parity. Every function here is
//! a total function of its inputs with no stored state.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Date` type.
pub mod date;

/// ISO-8601 week numbers and `Parity`.
pub mod iso_week;

/// Months of the year.
pub mod month;

/// Ordinal position of a weekday within its month.
pub mod occurrence;

/// Scheduling weeks (`W1`..`W5`) anchored on a month's first Monday.
pub mod scheduling_week;

/// Days of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use date::Date;
pub use iso_week::{iso_week, iso_week_parity, IsoWeek, Parity};
pub use month::Month;
pub use occurrence::{occurrence_in_month, Occurrence};
pub use scheduling_week::{
    enumerate_scheduling_weeks, first_monday_on_or_after, scheduling_week_count,
    scheduling_week_of, scheduling_week_window, SchedulingWeek, SchedulingWeeks, WeekWindow,
};
pub use weekday::Weekday;
