//! Pipe codes: the canonical string form of a [`Rule`].
//!
//! Labeled form, always four fields:
//!
//! ```text
//! Location: JVJ | Day: 1Wed, 3Wed | Week: Any | Shift: M
//! ```
//!
//! Compact form, only the fields that are set and no labels:
//!
//! ```text
//! JVJ | 1Wed, 3Wed | M
//! ```
//!
//! Under calendar occurrence the ordinal is fused into the day token (`1Wed`,
//! `LastFri`) and the week field stays `Any`. Under scheduling week or
//! alternating parity the day field lists plain weekdays and the week field
//! carries `W1`.. labels or `Alt1`/`Alt2`.

use std::collections::BTreeSet;

use pc_core::errors::{Result, ValidationError};
use pc_core::settings::{CodeFormat, Settings};
use pc_time::{Parity, Weekday};
use tracing::debug;

use crate::rule::Rule;
use crate::selection::{Normalized, Selection};
use crate::timing::{Ordinal, TimingMethod, TimingTag, WeekLabel};

/// Returned instead of a code when nothing is selected.
pub const PLACEHOLDER: &str = "Select options to generate code...";

/// Value of an unset field in the labeled form.
const ANY: &str = "Any";

const FIELD_SEP: &str = " | ";
const ITEM_SEP: &str = ", ";
const LABELS: [&str; 4] = ["Location", "Day", "Week", "Shift"];

/// Render `rule` as a pipe code.
pub fn serialize(rule: &Rule, format: CodeFormat) -> String {
    if rule.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let fields = [
        location_field(rule),
        day_field(rule),
        week_field(rule),
        shift_field(rule),
    ];
    match format {
        CodeFormat::Labeled => LABELS
            .iter()
            .zip(fields)
            .map(|(label, value)| format!("{label}: {}", value.as_deref().unwrap_or(ANY)))
            .collect::<Vec<_>>()
            .join(FIELD_SEP),
        CodeFormat::Compact => {
            let parts: Vec<String> = fields.into_iter().flatten().collect();
            if parts.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                parts.join(FIELD_SEP)
            }
        }
    }
}

fn location_field(rule: &Rule) -> Option<String> {
    non_empty(rule.locations().join(ITEM_SEP))
}

fn day_field(rule: &Rule) -> Option<String> {
    let days = rule.weekdays();
    match rule.timing() {
        Some(TimingMethod::CalendarOccurrence { ordinals }) => {
            let tokens: Vec<String> = ordinals
                .iter()
                .flat_map(|o| days.iter().map(move |d| fused_token(*o, *d)))
                .collect();
            non_empty(tokens.join(ITEM_SEP))
        }
        _ => non_empty(join(days.iter())),
    }
}

fn week_field(rule: &Rule) -> Option<String> {
    match rule.timing()? {
        TimingMethod::SchedulingWeek { weeks } if weeks.contains(&WeekLabel::Any) => {
            Some(ANY.to_string())
        }
        TimingMethod::SchedulingWeek { weeks } => non_empty(join(weeks.iter())),
        TimingMethod::CalendarOccurrence { .. } => None,
        TimingMethod::AlternatingParity { parity } => Some(parity.alt_label().to_string()),
    }
}

fn shift_field(rule: &Rule) -> Option<String> {
    non_empty(rule.shifts().join(ITEM_SEP))
}

/// `1Wed`, `LastFri`, …
fn fused_token(ordinal: Ordinal, day: Weekday) -> String {
    format!("{}{}", ordinal.token_prefix(), day.short_name())
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|i| i.to_string()).collect::<Vec<_>>().join(ITEM_SEP)
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse a labeled pipe code back into a rule.
///
/// The result goes through the same normalization as a selection, so the
/// vocabulary is checked against `settings`. `Location: Any` and
/// `Shift: Any` mean nothing selected. `Week: Any` with plain weekdays
/// reads as "no timing method".
///
/// Compact codes carry no field labels and cannot be parsed.
pub fn parse(code: &str, settings: &Settings) -> Result<Normalized> {
    let fields = split_fields(code)?;
    let [location, day, week, shift] = fields;

    let mut selection = Selection::new();
    selection.locations = items(location).map(str::to_string).collect();
    selection.shifts = items(shift).map(str::to_string).collect();

    let days = parse_days(day)?;
    let weeks = parse_week(week)?;
    match (days, weeks) {
        (DayField::Plain(days), week) => {
            selection.weekdays = days;
            selection = match week {
                WeekField::Any => selection,
                WeekField::Weeks(weeks) => selection.with_scheduling_weeks(weeks),
                WeekField::Parity(parity) => selection.with_parity(parity),
            };
        }
        (DayField::Fused { ordinals, days }, WeekField::Any) => {
            selection.weekdays = days;
            selection = selection.with_calendar_occurrence(ordinals);
        }
        (DayField::Fused { .. }, other) => {
            let second = match other {
                WeekField::Parity(_) => TimingTag::AlternatingParity,
                _ => TimingTag::SchedulingWeek,
            };
            return Err(ValidationError::MultipleTimingMethods(vec![
                TimingTag::CalendarOccurrence.to_string(),
                second.to_string(),
            ])
            .into());
        }
    }

    debug!(code, "pipe code parsed");
    selection.normalize(settings)
}

fn split_fields(code: &str) -> Result<[&str; 4]> {
    let parts: Vec<&str> = code.split('|').map(str::trim).collect();
    if parts.len() != LABELS.len() {
        return Err(ValidationError::MalformedCode(format!(
            "expected {} fields separated by '|', found {}",
            LABELS.len(),
            parts.len()
        ))
        .into());
    }
    let mut values = [""; 4];
    for (i, (part, label)) in parts.iter().zip(LABELS).enumerate() {
        let value = part
            .split_once(':')
            .filter(|(key, _)| key.trim().eq_ignore_ascii_case(label))
            .map(|(_, value)| value.trim())
            .ok_or_else(|| {
                ValidationError::MalformedCode(format!("field {} should be '{label}: …'", i + 1))
            })?;
        values[i] = value;
    }
    Ok(values)
}

/// Comma-separated items of a field; `Any` or nothing yields no items.
fn items(field: &str) -> impl Iterator<Item = &str> {
    let field = if field.eq_ignore_ascii_case(ANY) { "" } else { field };
    field.split(',').map(str::trim).filter(|s| !s.is_empty())
}

enum DayField {
    Plain(BTreeSet<Weekday>),
    Fused {
        ordinals: BTreeSet<Ordinal>,
        days: BTreeSet<Weekday>,
    },
}

fn parse_days(field: &str) -> Result<DayField> {
    let mut plain = BTreeSet::new();
    let mut pairs = BTreeSet::new();
    for token in items(field) {
        match split_fused(token)? {
            Some(pair) => {
                pairs.insert(pair);
            }
            None => {
                plain.insert(token.parse::<Weekday>()?);
            }
        }
    }
    if pairs.is_empty() {
        return Ok(DayField::Plain(plain));
    }
    if !plain.is_empty() {
        return Err(ValidationError::IrregularOccurrence(format!(
            "{field:?} mixes plain weekdays with ordinal tokens"
        ))
        .into());
    }
    let ordinals: BTreeSet<Ordinal> = pairs.iter().map(|(o, _)| *o).collect();
    let days: BTreeSet<Weekday> = pairs.iter().map(|(_, d)| *d).collect();
    if pairs.len() != ordinals.len() * days.len() {
        return Err(ValidationError::IrregularOccurrence(field.to_string()).into());
    }
    Ok(DayField::Fused { ordinals, days })
}

/// Split `3Wed` / `LastFri` into its ordinal and weekday; `None` for a plain
/// weekday token.
fn split_fused(token: &str) -> Result<Option<(Ordinal, Weekday)>> {
    let (ordinal, rest) = if let Some(rest) = token.strip_prefix("Last") {
        (Ordinal::Last, rest)
    } else if token.starts_with(|c: char| c.is_ascii_digit()) {
        let (digit, rest) = token.split_at(1);
        (digit.parse::<Ordinal>()?, rest)
    } else {
        return Ok(None);
    };
    Ok(Some((ordinal, rest.parse::<Weekday>()?)))
}

enum WeekField {
    Any,
    Weeks(BTreeSet<WeekLabel>),
    Parity(Parity),
}

fn parse_week(field: &str) -> Result<WeekField> {
    if field.is_empty() || field.eq_ignore_ascii_case(ANY) {
        return Ok(WeekField::Any);
    }
    if field.starts_with("Alt") {
        return Ok(WeekField::Parity(field.parse()?));
    }
    let weeks = field
        .split(',')
        .map(|w| w.parse::<WeekLabel>())
        .collect::<Result<BTreeSet<_>>>()?;
    Ok(WeekField::Weeks(weeks))
}
