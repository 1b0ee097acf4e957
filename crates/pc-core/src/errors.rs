//! Error types for pipecode.
//!
//! A single `thiserror`-derived [`Error`] is used across the workspace.
//! Caller-correctable problems with a selection or a code string are grouped
//! under [`ValidationError`] so that a presentation layer can match on them
//! and report them next to the offending field.

use thiserror::Error;

/// The top-level error type used throughout pipecode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Precondition violated (raised by [`ensure!`](crate::ensure)).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Date out of the supported range, or an impossible calendar value.
    #[error("date error: {0}")]
    Date(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Vocabulary settings that cannot be used.
    #[error("invalid settings: {0}")]
    Config(String),

    /// A selection or code string the caller has to correct.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Caller-correctable problems found while normalizing a selection or
/// parsing a pipe code.
///
/// These are reported, never fatal: the caller fixes the input and tries
/// again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No timing tag was given, but more than one timing method carries
    /// parameters.
    #[error("more than one timing method is populated: {}", .0.join(", "))]
    MultipleTimingMethods(Vec<String>),

    /// No timing tag was given, but one method carries parameters.
    #[error("timing parameters for {0} were given without selecting the method")]
    MissingTimingTag(String),

    /// Location and shift vocabularies disagree after normalization.
    #[error("location {location} cannot be combined with shift {shift}")]
    ShiftVocabularyMismatch {
        /// The location the shift conflicts with.
        location: String,
        /// The first offending shift code.
        shift: String,
    },

    /// A scheduling-week label other than `W1`..`W5` or `Any`.
    #[error("invalid scheduling week label: {0:?} (expected W1..W5 or Any)")]
    InvalidWeekLabel(String),

    /// An ordinal label other than `1st`..`5th` or `Last`.
    #[error("invalid ordinal: {0:?} (expected 1st..5th or Last)")]
    InvalidOrdinal(String),

    /// A parity label other than `Odd`/`Even` (or `Alt1`/`Alt2`).
    #[error("invalid parity: {0:?} (expected Odd, Even, Alt1 or Alt2)")]
    InvalidParity(String),

    /// A location outside the configured vocabulary.
    #[error("unknown location: {0:?}")]
    UnknownLocation(String),

    /// A shift code outside both shift vocabularies.
    #[error("unknown shift code: {0:?}")]
    UnknownShift(String),

    /// A weekday abbreviation other than `Mon`..`Sun`.
    #[error("unknown weekday: {0:?}")]
    UnknownWeekday(String),

    /// A timing-method tag that does not name a method.
    #[error("unknown timing method: {0:?}")]
    UnknownTimingTag(String),

    /// A code string that does not have the labeled four-field shape.
    #[error("malformed pipe code: {0}")]
    MalformedCode(String),

    /// Fused day tokens (`1Wed`, `LastFri`) that are not the full product of
    /// a set of ordinals and a set of weekdays.
    #[error("day tokens do not form an ordinal x weekday grid: {0}")]
    IrregularOccurrence(String),
}

/// Shorthand `Result` type used throughout pipecode.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use pc_core::{ensure, errors::Error};
/// fn week_index(i: usize) -> pc_core::errors::Result<usize> {
///     ensure!(i < 5, "week index must be below 5, got {i}");
///     Ok(i)
/// }
/// assert!(week_index(0).is_ok());
/// assert!(week_index(5).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}
