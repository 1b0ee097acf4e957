//! # pc-core
//!
//! Core types and error definitions for pipecode.
//!
//! This crate provides the pieces shared by every other crate in the
//! workspace: the error hierarchy with its `ensure!` macro, and
//! the vocabulary [`Settings`] that selections are validated against.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` macro.
pub mod errors;

/// Location and shift vocabularies, serializer defaults.
pub mod settings;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result, ValidationError};
pub use settings::{CodeFormat, Settings, ShiftKind};
