//! # pc-rules
//!
//! Recurrence rules for volunteer availability.
//!
//! Data flows one way: raw selections are normalized into a [`Rule`], which
//! is then either rendered as a pipe code or evaluated against dates.
//!
//! ```
//! use pc_core::{CodeFormat, Settings};
//! use pc_rules::{matches, Ordinal, Selection};
//! use pc_time::{Date, Weekday};
//!
//! let rule = Selection::new()
//!     .with_location("JVJ")
//!     .with_weekdays([Weekday::Wednesday])
//!     .with_calendar_occurrence([Ordinal::First, Ordinal::Third])
//!     .with_shifts(["M"])
//!     .normalize(&Settings::default())?
//!     .rule;
//!
//! assert_eq!(
//!     rule.to_code(CodeFormat::Labeled),
//!     "Location: JVJ | Day: 1Wed, 3Wed | Week: Any | Shift: M"
//! );
//! assert!(matches(&rule, Date::from_ymd(2026, 1, 21)?));
//! # Ok::<(), pc_core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Pipe-code serialization and parsing.
pub mod code;

/// `matches` and `enumerate_matches`.
pub mod evaluator;

/// Month preview with scheduling-week labels.
pub mod preview;

/// The normalized recurrence descriptor.
pub mod rule;

/// Raw and typed selections, normalization, auto-corrections.
pub mod selection;

/// Timing methods and their parameter types.
pub mod timing;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use code::{parse, serialize, PLACEHOLDER};
pub use evaluator::{enumerate_matches, matches, MatchingDates};
pub use preview::{month_preview, PreviewEntry};
pub use rule::Rule;
pub use selection::{
    normalize_selection, AutoCorrection, Normalized, RawSelection, RawTimingParams, Selection,
};
pub use timing::{Ordinal, TimingMethod, TimingTag, WeekLabel};
