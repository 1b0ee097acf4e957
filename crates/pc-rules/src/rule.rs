//! A volunteer's normalized recurring availability.

use std::collections::BTreeSet;

use pc_core::errors::{Error, Result};
use pc_core::settings::{CodeFormat, Settings};
use pc_time::{Date, Weekday};
use serde::{Deserialize, Serialize};

use crate::selection::Selection;
use crate::timing::{TimingMethod, WeekLabel};

/// A normalized recurrence rule.
///
/// Rules built by normalization ([`Selection::normalize`] or
/// [`normalize_selection`]) or by [`parse`] satisfy the cross-field
/// invariants:
///
/// * shifts come entirely from the Sig vocabulary iff the location is Sig;
/// * a scheduling-week selection containing `Any` is exactly `{Any}`;
/// * at most one timing method is set, and it has parameters.
///
/// "Clear all" is `Rule::default()`.
///
/// Deserializing checks only the invariants that do not depend on the
/// vocabulary. A deserialized rule may name a location the caller's
/// [`Settings`] has never heard of; [`Rule::validate`] checks it against them.
///
/// [`Selection::normalize`]: crate::selection::Selection::normalize
/// [`normalize_selection`]: crate::selection::normalize_selection
/// [`parse`]: crate::code::parse
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RuleFields")]
pub struct Rule {
    pub(crate) locations: Vec<String>,
    pub(crate) weekdays: BTreeSet<Weekday>,
    pub(crate) timing: Option<TimingMethod>,
    pub(crate) shifts: Vec<String>,
}

impl Rule {
    /// Selected locations, in vocabulary order.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Selected weekdays, Monday first.
    pub fn weekdays(&self) -> &BTreeSet<Weekday> {
        &self.weekdays
    }

    /// The active timing method; `None` means every selected weekday of
    /// every week.
    pub fn timing(&self) -> Option<&TimingMethod> {
        self.timing.as_ref()
    }

    /// Selected shift codes, in vocabulary order.
    pub fn shifts(&self) -> &[String] {
        &self.shifts
    }

    /// Return `true` if nothing at all is selected.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.weekdays.is_empty()
            && self.timing.is_none()
            && self.shifts.is_empty()
    }

    /// Return `true` if the rule is active on `date`.
    pub fn matches(&self, date: Date) -> bool {
        crate::evaluator::matches(self, date)
    }

    /// Render the rule as a pipe code.
    pub fn to_code(&self, format: CodeFormat) -> String {
        crate::code::serialize(self, format)
    }

    /// Check that the rule is exactly what normalization against `settings`
    /// produces: known vocabulary, vocabulary order, and the Sig pairing.
    pub fn validate(&self, settings: &Settings) -> Result<()> {
        let normalized = Selection::from(self).normalize(settings)?;
        if let Some(correction) = normalized.corrections.first() {
            return Err(Error::InvalidArgument(format!(
                "rule is not normalized: {correction}"
            )));
        }
        if normalized.rule != *self {
            return Err(Error::InvalidArgument(
                "rule is not normalized: names are out of vocabulary order".into(),
            ));
        }
        Ok(())
    }

    fn check_structure(&self) -> Result<()> {
        check_names("location", &self.locations)?;
        check_names("shift", &self.shifts)?;
        match &self.timing {
            Some(method) if method.is_empty() => Err(Error::InvalidArgument(format!(
                "{} timing has no parameters",
                method.tag()
            ))),
            Some(TimingMethod::SchedulingWeek { weeks })
                if weeks.contains(&WeekLabel::Any) && weeks.len() > 1 =>
            {
                Err(Error::InvalidArgument(
                    "scheduling week Any must be the only week".into(),
                ))
            }
            _ => Ok(()),
        }
    }
}

fn check_names(kind: &str, names: &[String]) -> Result<()> {
    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(Error::InvalidArgument(format!("blank {kind} name")));
        }
        if names[..i].contains(name) {
            return Err(Error::InvalidArgument(format!("{kind} {name:?} listed twice")));
        }
    }
    Ok(())
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_code(CodeFormat::Labeled))
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFields {
    #[serde(default)]
    locations: Vec<String>,
    #[serde(default)]
    weekdays: BTreeSet<Weekday>,
    #[serde(default)]
    timing: Option<TimingMethod>,
    #[serde(default)]
    shifts: Vec<String>,
}

impl TryFrom<RuleFields> for Rule {
    type Error = Error;

    fn try_from(fields: RuleFields) -> Result<Self> {
        let rule = Rule {
            locations: fields.locations,
            weekdays: fields.weekdays,
            timing: fields.timing,
            shifts: fields.shifts,
        };
        rule.check_structure()?;
        Ok(rule)
    }
}
