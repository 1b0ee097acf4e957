//! Day-of-week enum.

use pc_core::errors::{Error, Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Day of the week.
///
/// Variants are numbered 0–6 (Monday = 0, Sunday = 6), the ISO weekday
/// counted from Monday. Ordering follows the same numbering, which is also
/// the display order of a pipe code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Weekday {
    /// Monday (0).
    #[serde(rename = "Mon")]
    Monday = 0,
    /// Tuesday (1).
    #[serde(rename = "Tue")]
    Tuesday = 1,
    /// Wednesday (2).
    #[serde(rename = "Wed")]
    Wednesday = 2,
    /// Thursday (3).
    #[serde(rename = "Thu")]
    Thursday = 3,
    /// Friday (4).
    #[serde(rename = "Fri")]
    Friday = 4,
    /// Saturday (5).
    #[serde(rename = "Sat")]
    Saturday = 5,
    /// Sunday (6).
    #[serde(rename = "Sun")]
    Sunday = 6,
}

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Return the index (0 = Monday … 6 = Sunday).
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Three-letter abbreviation used in pipe codes (`"Mon"`, `"Tue"`, …).
    pub fn short_name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }

    /// Full English name (`"Monday"`, …).
    pub fn long_name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_name())
    }
}

impl std::str::FromStr for Weekday {
    type Err = Error;

    /// Accepts the abbreviation or the full name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|w| {
                w.short_name().eq_ignore_ascii_case(t) || w.long_name().eq_ignore_ascii_case(t)
            })
            .ok_or_else(|| ValidationError::UnknownWeekday(t.to_string()).into())
    }
}
