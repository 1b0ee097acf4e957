//! Month-of-year enum.

use pc_core::errors::{Error, Result};

/// Month of the year.
///
/// Variants are numbered 1–12 (January = 1, December = 12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Month {
    /// January (1).
    January = 1,
    /// February (2).
    February = 2,
    /// March (3).
    March = 3,
    /// April (4).
    April = 4,
    /// May (5).
    May = 5,
    /// June (6).
    June = 6,
    /// July (7).
    July = 7,
    /// August (8).
    August = 8,
    /// September (9).
    September = 9,
    /// October (10).
    October = 10,
    /// November (11).
    November = 11,
    /// December (12).
    December = 12,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Construct from a number (1 = January … 12 = December).
    ///
    /// An out-of-range number is a caller bug and fails immediately with
    /// [`Error::Date`].
    pub fn from_number(n: u8) -> Result<Self> {
        if !(1..=12).contains(&n) {
            return Err(Error::Date(format!("month {n} out of range [1, 12]")));
        }
        Ok(Self::ALL[n as usize - 1])
    }

    /// Return the 1-based month number.
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Return the following month and whether the year rolls over.
    pub fn succ(&self) -> (Month, bool) {
        match self {
            Month::December => (Month::January, true),
            m => (Self::ALL[m.number() as usize], false),
        }
    }

    /// Return the three-letter abbreviation (`"Jan"`, `"Feb"`, …).
    pub fn short_name(&self) -> &'static str {
        &self.long_name()[..3]
    }

    /// Return the full name (`"January"`, `"February"`, …).
    pub fn long_name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.long_name())
    }
}
