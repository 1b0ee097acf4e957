//! Timing methods: how a rule narrows "every selected weekday" down to
//! particular weeks of the month.
//!
//! Exactly one method is active on a rule. Each carries its own parameter
//! type: scheduling-week labels, calendar ordinals, or an ISO week parity.

use std::collections::BTreeSet;

use pc_core::errors::{Error, Result, ValidationError};
use pc_time::{occurrence_in_month, Date, Occurrence, Parity};
use serde::{Deserialize, Serialize};

// ── Scheduling-week labels ────────────────────────────────────────────────────

/// A scheduling-week selection: one of `W1`..`W5`, or `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeekLabel {
    /// First scheduling week.
    W1,
    /// Second scheduling week.
    W2,
    /// Third scheduling week.
    W3,
    /// Fourth scheduling week.
    W4,
    /// Fifth scheduling week (only some months have one).
    W5,
    /// Every scheduling week; overrides the specific labels.
    Any,
}

impl WeekLabel {
    /// The specific week labels, `W1` first.
    pub const WEEKS: [WeekLabel; 5] = [
        WeekLabel::W1,
        WeekLabel::W2,
        WeekLabel::W3,
        WeekLabel::W4,
        WeekLabel::W5,
    ];

    /// Return `true` if a date in the 0-based scheduling week `index` is
    /// selected by this label.
    pub fn covers(&self, index: u8) -> bool {
        match self {
            WeekLabel::Any => true,
            w => *w as u8 == index,
        }
    }

    /// Text used in pipe codes.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekLabel::W1 => "W1",
            WeekLabel::W2 => "W2",
            WeekLabel::W3 => "W3",
            WeekLabel::W4 => "W4",
            WeekLabel::W5 => "W5",
            WeekLabel::Any => "Any",
        }
    }
}

impl std::fmt::Display for WeekLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WeekLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        Self::WEEKS
            .iter()
            .chain(std::iter::once(&WeekLabel::Any))
            .copied()
            .find(|w| w.as_str().eq_ignore_ascii_case(t))
            .ok_or_else(|| ValidationError::InvalidWeekLabel(t.to_string()).into())
    }
}

// ── Calendar ordinals ─────────────────────────────────────────────────────────

/// Ordinal occurrence of a weekday within its calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ordinal {
    /// Days 1–7.
    #[serde(rename = "1st")]
    First,
    /// Days 8–14.
    #[serde(rename = "2nd")]
    Second,
    /// Days 15–21.
    #[serde(rename = "3rd")]
    Third,
    /// Days 22–28.
    #[serde(rename = "4th")]
    Fourth,
    /// Days 29–31.
    #[serde(rename = "5th")]
    Fifth,
    /// The last such weekday of the month (4th or 5th).
    Last,
}

impl Ordinal {
    /// All ordinals in display order.
    pub const ALL: [Ordinal; 6] = [
        Ordinal::First,
        Ordinal::Second,
        Ordinal::Third,
        Ordinal::Fourth,
        Ordinal::Fifth,
        Ordinal::Last,
    ];

    /// Return `true` if `occurrence` is selected by this ordinal.
    pub fn covers(&self, occurrence: Occurrence) -> bool {
        match self {
            Ordinal::Last => occurrence.is_last,
            o => *o as u8 + 1 == occurrence.rank,
        }
    }

    /// Display label (`"1st"` … `"5th"`, `"Last"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Ordinal::First => "1st",
            Ordinal::Second => "2nd",
            Ordinal::Third => "3rd",
            Ordinal::Fourth => "4th",
            Ordinal::Fifth => "5th",
            Ordinal::Last => "Last",
        }
    }

    /// Prefix of a fused day token: the digit for ranks, `Last` otherwise.
    pub fn token_prefix(&self) -> &'static str {
        match self {
            Ordinal::Last => "Last",
            o => &o.as_str()[..1],
        }
    }
}

impl std::fmt::Display for Ordinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Ordinal {
    type Err = Error;

    /// Accepts the label (`"3rd"`, `"Last"`) or the bare digit (`"3"`).
    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|o| {
                o.as_str().eq_ignore_ascii_case(t) || (*o != Ordinal::Last && o.token_prefix() == t)
            })
            .ok_or_else(|| ValidationError::InvalidOrdinal(t.to_string()).into())
    }
}

// ── Method tag ────────────────────────────────────────────────────────────────

/// Names a timing method without its parameters.
///
/// Callers pass the tag explicitly; the method is never inferred from which
/// parameter lists happen to be non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimingTag {
    /// Weeks counted from the month's first Monday.
    SchedulingWeek,
    /// Ordinal occurrence of the weekday in the calendar month.
    CalendarOccurrence,
    /// Odd or even ISO weeks.
    AlternatingParity,
}

impl TimingTag {
    /// Name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimingTag::SchedulingWeek => "SchedulingWeek",
            TimingTag::CalendarOccurrence => "CalendarOccurrence",
            TimingTag::AlternatingParity => "AlternatingParity",
        }
    }
}

impl std::fmt::Display for TimingTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimingTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "schedulingweek" | "scheduling" | "week" | "weeks" => Ok(TimingTag::SchedulingWeek),
            "calendaroccurrence" | "calendar" | "occurrence" | "nth" => {
                Ok(TimingTag::CalendarOccurrence)
            }
            "alternatingparity" | "alternating" | "parity" | "alt" => {
                Ok(TimingTag::AlternatingParity)
            }
            _ => Err(ValidationError::UnknownTimingTag(s.trim().to_string()).into()),
        }
    }
}

// ── Timing method ─────────────────────────────────────────────────────────────

/// The active timing method of a rule together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingMethod {
    /// Match dates whose scheduling week is one of `weeks`.
    SchedulingWeek {
        /// Selected labels; `{Any}` once normalized if `Any` was chosen.
        weeks: BTreeSet<WeekLabel>,
    },
    /// Match dates whose calendar occurrence is one of `ordinals`.
    CalendarOccurrence {
        /// Selected ordinals.
        ordinals: BTreeSet<Ordinal>,
    },
    /// Match dates whose ISO week number has the given parity.
    AlternatingParity {
        /// Odd or even weeks.
        parity: Parity,
    },
}

impl TimingMethod {
    /// The method's tag.
    pub fn tag(&self) -> TimingTag {
        match self {
            TimingMethod::SchedulingWeek { .. } => TimingTag::SchedulingWeek,
            TimingMethod::CalendarOccurrence { .. } => TimingTag::CalendarOccurrence,
            TimingMethod::AlternatingParity { .. } => TimingTag::AlternatingParity,
        }
    }

    /// Return `true` if the method has no parameters selected.
    pub fn is_empty(&self) -> bool {
        match self {
            TimingMethod::SchedulingWeek { weeks } => weeks.is_empty(),
            TimingMethod::CalendarOccurrence { ordinals } => ordinals.is_empty(),
            TimingMethod::AlternatingParity { .. } => false,
        }
    }

    /// Return `true` if `date` falls in a week this method selects.
    ///
    /// The weekday is not checked here.
    pub fn admits(&self, date: Date) -> bool {
        match self {
            TimingMethod::SchedulingWeek { weeks } => match pc_time::scheduling_week_of(date) {
                Some(week) => weeks.iter().any(|w| w.covers(week.index)),
                None => false,
            },
            TimingMethod::CalendarOccurrence { ordinals } => {
                let occurrence = occurrence_in_month(date);
                ordinals.iter().any(|o| o.covers(occurrence))
            }
            TimingMethod::AlternatingParity { parity } => pc_time::iso_week_parity(date) == *parity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_labels() {
        assert_eq!("w3".parse::<WeekLabel>().unwrap(), WeekLabel::W3);
        assert_eq!("Any".parse::<WeekLabel>().unwrap(), WeekLabel::Any);
        assert!(matches!(
            "W6".parse::<WeekLabel>(),
            Err(Error::Validation(ValidationError::InvalidWeekLabel(l))) if l == "W6"
        ));
        assert!(WeekLabel::W2.covers(1));
        assert!(!WeekLabel::W2.covers(2));
        assert!(WeekLabel::Any.covers(4));
    }

    #[test]
    fn ordinals() {
        assert_eq!("3rd".parse::<Ordinal>().unwrap(), Ordinal::Third);
        assert_eq!("2".parse::<Ordinal>().unwrap(), Ordinal::Second);
        assert_eq!("last".parse::<Ordinal>().unwrap(), Ordinal::Last);
        assert!("6th".parse::<Ordinal>().is_err());
        assert_eq!(Ordinal::Fifth.token_prefix(), "5");
        assert_eq!(Ordinal::Last.token_prefix(), "Last");

        let fourth_and_last = Occurrence { rank: 4, is_last: true };
        assert!(Ordinal::Fourth.covers(fourth_and_last));
        assert!(Ordinal::Last.covers(fourth_and_last));
        assert!(!Ordinal::Fifth.covers(fourth_and_last));
    }

    #[test]
    fn tags() {
        assert_eq!(
            "Scheduling-Week".parse::<TimingTag>().unwrap(),
            TimingTag::SchedulingWeek
        );
        assert_eq!(
            "calendar".parse::<TimingTag>().unwrap(),
            TimingTag::CalendarOccurrence
        );
        assert_eq!(
            "alternating_parity".parse::<TimingTag>().unwrap(),
            TimingTag::AlternatingParity
        );
        assert!("fortnightly".parse::<TimingTag>().is_err());
    }

    #[test]
    fn emptiness() {
        let m = TimingMethod::SchedulingWeek {
            weeks: BTreeSet::new(),
        };
        assert!(m.is_empty());
        let p = TimingMethod::AlternatingParity {
            parity: Parity::Odd,
        };
        assert!(!p.is_empty());
        assert_eq!(p.tag(), TimingTag::AlternatingParity);
    }
}
