//! Date matching.
//!
//! Evaluation is a pure function of `(rule, date)`: the weekday must be
//! selected, and the rule's timing method (if any) must admit the date.

use pc_time::Date;
use tracing::trace;

use crate::rule::Rule;

/// Return `true` if `rule` is active on `date`.
///
/// * No timing method: every selected weekday matches.
/// * Scheduling week: the date's week within its own calendar month must be
///   selected; dates before that month's first Monday never match.
/// * Calendar occurrence: the date's rank (or "last") must be selected.
/// * Alternating parity: the ISO week number must have the chosen parity.
pub fn matches(rule: &Rule, date: Date) -> bool {
    if !rule.weekdays().contains(&date.weekday()) {
        return false;
    }
    match rule.timing() {
        None => true,
        Some(method) => method.admits(date),
    }
}

/// Lazily list the dates in `[start, end]` on which `rule` is active, in
/// ascending order. An empty range (`start > end`) yields nothing.
pub fn enumerate_matches(rule: &Rule, start: Date, end: Date) -> MatchingDates<'_> {
    trace!(%start, %end, code = %rule, "enumerating matches");
    MatchingDates {
        rule,
        next: (start <= end).then_some(start),
        end,
    }
}

/// Iterator returned by [`enumerate_matches`]; clone it to restart.
#[derive(Debug, Clone)]
pub struct MatchingDates<'a> {
    rule: &'a Rule,
    next: Option<Date>,
    end: Date,
}

impl Iterator for MatchingDates<'_> {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        while let Some(date) = self.next {
            self.next = date.add_days(1).ok().filter(|d| *d <= self.end);
            if matches(self.rule, date) {
                return Some(date);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.next.map_or(0, |d| (self.end - d + 1) as usize);
        (0, Some(remaining))
    }
}

impl std::iter::FusedIterator for MatchingDates<'_> {}
