//! # pipecode
//!
//! Volunteer availability as recurrence rules, rendered as pipe codes and
//! evaluated against calendar dates.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `pc-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! pipecode = "0.1"
//! ```
//!
//! ```rust
//! use pipecode::core::{CodeFormat, Settings};
//! use pipecode::rules::{enumerate_matches, normalize_selection, RawSelection};
//! use pipecode::time::Date;
//!
//! let raw = RawSelection {
//!     locations: vec!["JVJ".into()],
//!     weekdays: vec!["Tue".into()],
//!     shifts: vec!["Sig1".into()],
//!     ..RawSelection::default()
//! };
//! let normalized = normalize_selection(&Settings::default(), &raw)?;
//! assert!(normalized.is_corrected());
//! assert_eq!(
//!     normalized.rule.to_code(CodeFormat::Compact),
//!     "Sig | Tue | Sig1"
//! );
//!
//! let start = Date::from_ymd(2026, 1, 1)?;
//! let end = Date::from_ymd(2026, 1, 31)?;
//! assert_eq!(enumerate_matches(&normalized.rule, start, end).count(), 4);
//! # Ok::<(), pipecode::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error types, `ensure!`, and vocabulary settings.
pub use pc_core as core;

/// Dates, weekdays, months, scheduling weeks, ISO week parity.
pub use pc_time as time;

/// Rules, normalization, pipe codes, and date matching.
pub use pc_rules as rules;

/// Tracing subscriber setup for applications.
pub mod logging;
