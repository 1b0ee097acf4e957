//! Calendar occurrence: the ordinal position of a date's weekday within its
//! month ("the 3rd Wednesday", "the last Friday").

use crate::date::Date;

/// Position of a date among the same weekdays of its month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occurrence {
    /// 1-based rank: 1 for days 1–7, 2 for days 8–14, … up to 5.
    pub rank: u8,
    /// `true` if no later date in the month falls on the same weekday.
    pub is_last: bool,
}

/// Compute the calendar occurrence of `date`.
///
/// `rank = (day - 1) / 7 + 1`, and `is_last` holds iff `date + 7` lands in
/// the following month.
pub fn occurrence_in_month(date: Date) -> Occurrence {
    let day = date.day_of_month();
    let days_left = date.end_of_month().day_of_month() - day;
    Occurrence {
        rank: (day - 1) / 7 + 1,
        is_last: days_left < 7,
    }
}
