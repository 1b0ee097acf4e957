//! `Date` type.
//!
//! Dates are stored as a serial number of days.
//!
//! # Serial number convention
//! * Serial 1 = January 1, 1900 (a Monday).
//! * The valid date range is 1900-01-01 to 2199-12-31.
//!
//! Scheduling-week windows at the very end of 2199 may end a few days past
//! [`Date::MAX`]; those dates exist only as window bounds and are never
//! produced by a constructor.

use crate::month::Month;
use crate::weekday::Weekday;
use pc_core::errors::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A calendar date represented as a serial number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

impl Date {
    /// Minimum valid date: January 1, 1900.
    pub const MIN: Date = Date(1);

    /// Maximum valid date: December 31, 2199.
    pub const MAX: Date = Date(109_573);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        check_year(year)?;
        let month = Month::from_number(month)?;
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {days_in}] for {year}-{:02}",
                month.number()
            )));
        }
        Ok(Date(serial_from_ymd(year, month.number(), day)))
    }

    /// Return the first day of `month` in `year`.
    pub fn first_of_month(year: u16, month: Month) -> Result<Self> {
        check_year(year)?;
        Ok(Date(serial_from_ymd(year, month.number(), 1)))
    }

    /// Create a date from a serial number that is already known to be in
    /// range, or at most a week past [`Date::MAX`].
    pub(crate) fn from_serial_unchecked(serial: i32) -> Self {
        debug_assert!(
            serial > 0 && serial <= Self::MAX.0 + 7,
            "invalid date serial {serial}"
        );
        Date(serial)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return the year.
    pub fn year(&self) -> u16 {
        ymd_from_serial(self.0).0
    }

    /// Return the month.
    pub fn month(&self) -> Month {
        Month::ALL[ymd_from_serial(self.0).1 as usize - 1]
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        ymd_from_serial(self.0).2
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // Serial 1 is a Monday (index 0).
        let w = (self.0 - 1).rem_euclid(7) as u8;
        Weekday::ALL[w as usize]
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let serial = self.0 + n;
        if serial < Self::MIN.0 || serial > Self::MAX.0 {
            return Err(Error::Date(format!(
                "date arithmetic: {self:?} + {n} days is out of range"
            )));
        }
        Ok(Date(serial))
    }

    /// Advance by `n` days without the range check (window bounds only).
    pub(crate) fn add_days_unchecked(self, n: i32) -> Self {
        Self::from_serial_unchecked(self.0 + n)
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let (y, m, _) = ymd_from_serial(self.0);
        let last = days_in_month(y, Month::ALL[m as usize - 1]);
        Date(serial_from_ymd(y, m, last))
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

// ── Display / parsing ─────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({self})")
    }
}

impl std::str::FromStr for Date {
    type Err = Error;

    /// Parse an ISO `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::Date(format!("expected YYYY-MM-DD, got {s:?}"));
        let mut parts = s.trim().splitn(3, '-');
        let mut next = || parts.next().ok_or_else(bad);
        let y = next()?.parse::<u16>().map_err(|_| bad())?;
        let m = next()?.parse::<u8>().map_err(|_| bad())?;
        let d = next()?.parse::<u8>().map_err(|_| bad())?;
        Date::from_ymd(y, m, d)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn check_year(year: u16) -> Result<()> {
    if !(1900..=2199).contains(&year) {
        return Err(Error::Date(format!("year {year} out of range [1900, 2199]")));
    }
    Ok(())
}

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: u16, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

/// Convert (year, month, day) to a serial number.
///
/// Defined for any year from 1900 on, including years past [`Date::MAX`];
/// callers that need a first-of-next-month peek rely on that.
pub(crate) fn serial_from_ymd(year: u16, month: u8, day: u8) -> i32 {
    let y = year as i32;
    // Days in years 1900..year, plus leap days in [1901, year).
    // 1900 itself is not a leap year.
    let mut serial = (y - 1900) * 365;
    serial += (y - 1901) / 4 - (y - 1901) / 100 + (y - 1601) / 400;
    serial += MONTH_OFFSET[month as usize - 1] as i32;
    if month > 2 && is_leap_year(year) {
        serial += 1;
    }
    serial + day as i32
}

/// Decompose a serial number into (year, month, day).
fn ymd_from_serial(serial: i32) -> (u16, u8, u8) {
    let mut y = (serial / 365 + 1900) as u16;
    loop {
        if serial < serial_from_ymd(y, 1, 1) {
            y -= 1;
        } else if serial >= serial_from_ymd(y + 1, 1, 1) {
            y += 1;
        } else {
            break;
        }
    }
    let mut remaining = serial - serial_from_ymd(y, 1, 1) + 1;
    for month in Month::ALL {
        let days = days_in_month(y, month) as i32;
        if remaining <= days {
            return (y, month.number(), remaining as u8);
        }
        remaining -= days;
    }
    unreachable!("day of year exceeds the length of {y}")
}

/// Cumulative day-of-year offset at the start of each month (non-leap).
const MONTH_OFFSET: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

// ── Tests ─────────────────────────────────────────────────────────────────────
