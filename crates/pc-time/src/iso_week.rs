//! ISO-8601 week numbers and their parity.

use crate::date::{serial_from_ymd, Date};
use pc_core::errors::{Error, Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Parity of an ISO week number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Parity {
    /// Weeks 1, 3, 5, …
    Odd,
    /// Weeks 2, 4, 6, …
    Even,
}

impl Parity {
    /// Parity of `n`.
    pub fn of(n: u8) -> Self {
        if n % 2 == 1 {
            Parity::Odd
        } else {
            Parity::Even
        }
    }

    /// The pipe-code week token: `Alt1` for odd weeks, `Alt2` for even weeks.
    pub fn alt_label(&self) -> &'static str {
        match self {
            Parity::Odd => "Alt1",
            Parity::Even => "Alt2",
        }
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Parity::Odd => write!(f, "Odd"),
            Parity::Even => write!(f, "Even"),
        }
    }
}

impl std::str::FromStr for Parity {
    type Err = Error;

    /// Accepts `Odd`/`Even` (any case) and the week tokens `Alt1`/`Alt2`.
    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("odd") || t == "Alt1" {
            Ok(Parity::Odd)
        } else if t.eq_ignore_ascii_case("even") || t == "Alt2" {
            Ok(Parity::Even)
        } else {
            Err(ValidationError::InvalidParity(t.to_string()).into())
        }
    }
}

/// An ISO-8601 week: the week-numbering year and the week within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoWeek {
    /// Week-numbering year (differs from the calendar year around New Year).
    pub year: u16,
    /// Week number, 1–53.
    pub week: u8,
}

/// Compute the ISO week containing `date`.
///
/// The week belongs to the year of its Thursday; its number counts the
/// Thursdays of that year up to and including it.
pub fn iso_week(date: Date) -> IsoWeek {
    // Serial 1 is a Monday, so every week's Thursday has a positive serial.
    // Near Date::MAX it may fall a few days past the valid range.
    let thursday = Date::from_serial_unchecked(date.serial() - date.weekday().index() as i32 + 3);
    let year = thursday.year();
    IsoWeek {
        year,
        week: ((thursday.serial() - serial_from_ymd(year, 1, 1)) / 7 + 1) as u8,
    }
}

/// Parity of the ISO week number of `date`.
pub fn iso_week_parity(date: Date) -> Parity {
    Parity::of(iso_week(date).week)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn new_year_boundaries() {
        // 2026-01-01 (Thu) is in week 1 of 2026.
        assert_eq!(iso_week(date(2026, 1, 1)), IsoWeek { year: 2026, week: 1 });
        // 2025-12-29 (Mon) is in week 1 of 2026.
        assert_eq!(iso_week(date(2025, 12, 29)), IsoWeek { year: 2026, week: 1 });
        // 2021-01-03 (Sun) is in week 53 of 2020.
        assert_eq!(iso_week(date(2021, 1, 3)), IsoWeek { year: 2020, week: 53 });
    }

    #[test]
    fn first_day_of_range() {
        // 1900-01-01 is a Monday, so its Thursday is 1900-01-04: week 1.
        assert_eq!(iso_week(Date::MIN), IsoWeek { year: 1900, week: 1 });
    }

    #[test]
    fn parity_flips_each_week() {
        let a = iso_week_parity(date(2026, 1, 9));
        let b = iso_week_parity(date(2026, 1, 16));
        assert_eq!(a, Parity::Even); // week 2
        assert_eq!(b, Parity::Odd); // week 3
    }

    #[test]
    fn parse_parity() {
        assert_eq!("Alt2".parse::<Parity>().unwrap(), Parity::Even);
        assert_eq!("odd".parse::<Parity>().unwrap(), Parity::Odd);
        assert!("Alt3".parse::<Parity>().is_err());
    }
}
