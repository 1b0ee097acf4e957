//! Selections and their normalization into a [`Rule`].
//!
//! A [`RawSelection`] is untrusted UI state: plain strings for every field.
//! It is parsed into a typed [`Selection`], which is then normalized:
//!
//! 1. Any Sig-vocabulary shift forces the location to Sig (recorded as an
//!    [`AutoCorrection`], never an error).
//! 2. Sig location together with normal shifts is rejected.
//! 3. `Any` among the scheduling weeks replaces the specific weeks.
//! 4. Only the tagged timing method keeps its parameters. Without a tag,
//!    populated parameters are an error rather than a guess.

use std::collections::BTreeSet;

use pc_core::errors::{Error, Result, ValidationError};
use pc_core::settings::{Settings, ShiftKind};
use pc_time::{Parity, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::rule::Rule;
use crate::timing::{Ordinal, TimingMethod, TimingTag, WeekLabel};

// ── Raw input ─────────────────────────────────────────────────────────────────

/// Selection state exactly as a presentation layer holds it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSelection {
    /// Ticked locations.
    pub locations: Vec<String>,
    /// Ticked weekdays (`"Mon"`, `"Tuesday"`, …).
    pub weekdays: Vec<String>,
    /// The chosen timing method, if any (`"SchedulingWeek"`, `"calendar"`, …).
    pub timing_tag: Option<String>,
    /// Parameters of every timing method, possibly stale.
    pub timing: RawTimingParams,
    /// Ticked shift codes.
    pub shifts: Vec<String>,
}

/// Timing parameters as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTimingParams {
    /// Scheduling-week labels (`"W1"` … `"W5"`, `"Any"`).
    pub weeks: Vec<String>,
    /// Calendar ordinals (`"1st"` … `"5th"`, `"Last"`).
    pub ordinals: Vec<String>,
    /// `"Odd"` / `"Even"` (or `"Alt1"` / `"Alt2"`).
    pub parity: Option<String>,
}

impl RawSelection {
    /// Parse every field into its typed form.
    ///
    /// Only the vocabulary is checked here; cross-field rules are applied by
    /// [`Selection::normalize`].
    pub fn parse(&self, settings: &Settings) -> Result<Selection> {
        let locations = tokens(&self.locations).map(str::to_string).collect();
        let shifts = tokens(&self.shifts).map(str::to_string).collect();
        let weekdays = tokens(&self.weekdays)
            .map(str::parse::<Weekday>)
            .collect::<Result<_>>()?;
        let timing_tag = self
            .timing_tag
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(str::parse::<TimingTag>)
            .transpose()?;
        let weeks = tokens(&self.timing.weeks)
            .map(str::parse::<WeekLabel>)
            .collect::<Result<_>>()?;
        let ordinals = tokens(&self.timing.ordinals)
            .map(str::parse::<Ordinal>)
            .collect::<Result<_>>()?;
        let parity = self
            .timing
            .parity
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(str::parse::<Parity>)
            .transpose()?;

        let selection = Selection {
            locations,
            weekdays,
            timing_tag,
            weeks,
            ordinals,
            parity,
            shifts,
        };
        selection.check_vocabulary(settings)?;
        Ok(selection)
    }
}

/// Trimmed entries of a ticked list; blank entries are ignored.
fn tokens(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl From<&Rule> for RawSelection {
    fn from(rule: &Rule) -> Self {
        let selection = Selection::from(rule);
        RawSelection {
            locations: selection.locations,
            weekdays: selection.weekdays.iter().map(|w| w.to_string()).collect(),
            timing_tag: selection.timing_tag.map(|t| t.to_string()),
            timing: RawTimingParams {
                weeks: selection.weeks.iter().map(|w| w.to_string()).collect(),
                ordinals: selection.ordinals.iter().map(|o| o.to_string()).collect(),
                parity: selection.parity.map(|p| p.to_string()),
            },
            shifts: selection.shifts,
        }
    }
}

// ── Typed input ───────────────────────────────────────────────────────────────

/// Typed, not yet normalized selection.
///
/// The `with_*` timing methods set the tag and that method's parameters but
/// leave the other methods' parameters alone, the way switching a radio
/// button leaves the other checkboxes ticked. Normalization clears them.
///
/// # Example
/// ```
/// use pc_core::Settings;
/// use pc_rules::{Ordinal, Selection};
/// use pc_time::Weekday;
///
/// let normalized = Selection::new()
///     .with_location("JVJ")
///     .with_weekdays([Weekday::Wednesday])
///     .with_calendar_occurrence([Ordinal::First, Ordinal::Third])
///     .with_shifts(["M"])
///     .normalize(&Settings::default())
///     .unwrap();
/// assert!(normalized.corrections.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected locations.
    pub locations: Vec<String>,
    /// Selected weekdays.
    pub weekdays: BTreeSet<Weekday>,
    /// The chosen timing method.
    pub timing_tag: Option<TimingTag>,
    /// Scheduling-week parameters.
    pub weeks: BTreeSet<WeekLabel>,
    /// Calendar-occurrence parameters.
    pub ordinals: BTreeSet<Ordinal>,
    /// Alternating-parity parameter.
    pub parity: Option<Parity>,
    /// Selected shift codes.
    pub shifts: Vec<String>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.locations.push(location.into());
        self
    }

    /// Add weekdays.
    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays.extend(weekdays);
        self
    }

    /// Choose the scheduling-week method and tick `weeks`.
    pub fn with_scheduling_weeks(mut self, weeks: impl IntoIterator<Item = WeekLabel>) -> Self {
        self.timing_tag = Some(TimingTag::SchedulingWeek);
        self.weeks.extend(weeks);
        self
    }

    /// Choose the calendar-occurrence method and tick `ordinals`.
    pub fn with_calendar_occurrence(mut self, ordinals: impl IntoIterator<Item = Ordinal>) -> Self {
        self.timing_tag = Some(TimingTag::CalendarOccurrence);
        self.ordinals.extend(ordinals);
        self
    }

    /// Choose the alternating-parity method.
    pub fn with_parity(mut self, parity: Parity) -> Self {
        self.timing_tag = Some(TimingTag::AlternatingParity);
        self.parity = Some(parity);
        self
    }

    /// Set (or clear) the timing tag without touching any parameters.
    pub fn with_timing_tag(mut self, tag: Option<TimingTag>) -> Self {
        self.timing_tag = tag;
        self
    }

    /// Add shift codes.
    pub fn with_shifts<S: Into<String>>(mut self, shifts: impl IntoIterator<Item = S>) -> Self {
        self.shifts.extend(shifts.into_iter().map(Into::into));
        self
    }

    /// Apply the normalization rules and build a [`Rule`].
    pub fn normalize(self, settings: &Settings) -> Result<Normalized> {
        self.check_vocabulary(settings)?;
        let mut corrections = Vec::new();

        let mut locations = ordered(self.locations, |l| settings.location_rank(l));
        let shifts = ordered(self.shifts, |s| settings.shift_rank(s));
        let sig = settings.sig_location.clone();

        // 1. A Sig shift pins the location to Sig.
        let has_sig_shift = shifts
            .iter()
            .any(|s| settings.shift_kind(s) == Some(ShiftKind::Sig));
        if has_sig_shift && locations != [sig.as_str()] {
            let replaced: Vec<String> = locations.into_iter().filter(|l| *l != sig).collect();
            warn!(?replaced, location = %sig, "Sig shift selected, location forced to Sig");
            corrections.push(AutoCorrection::LocationForcedToSig { replaced });
            locations = vec![sig.clone()];
        }

        // 2. Sig location takes Sig shifts only.
        if locations.iter().any(|l| settings.is_sig_location(l)) {
            if let Some(normal) = shifts
                .iter()
                .find(|s| settings.shift_kind(s) == Some(ShiftKind::Normal))
            {
                return Err(ValidationError::ShiftVocabularyMismatch {
                    location: sig,
                    shift: normal.clone(),
                }
                .into());
            }
        }

        // 3. `Any` overrides the specific weeks.
        let mut weeks = self.weeks;
        if self.timing_tag == Some(TimingTag::SchedulingWeek)
            && weeks.contains(&WeekLabel::Any)
            && weeks.len() > 1
        {
            let dropped: Vec<WeekLabel> =
                weeks.iter().copied().filter(|w| *w != WeekLabel::Any).collect();
            warn!(?dropped, "Any week selected, specific weeks dropped");
            corrections.push(AutoCorrection::WeeksCollapsedToAny { dropped });
            weeks = BTreeSet::from([WeekLabel::Any]);
        }

        // 4. One timing method, named explicitly.
        let populated: Vec<TimingTag> = [
            (!weeks.is_empty()).then_some(TimingTag::SchedulingWeek),
            (!self.ordinals.is_empty()).then_some(TimingTag::CalendarOccurrence),
            self.parity.map(|_| TimingTag::AlternatingParity),
        ]
        .into_iter()
        .flatten()
        .collect();

        let timing = match self.timing_tag {
            None => match populated.as_slice() {
                [] => None,
                [only] => return Err(ValidationError::MissingTimingTag(only.to_string()).into()),
                many => {
                    return Err(ValidationError::MultipleTimingMethods(
                        many.iter().map(|t| t.to_string()).collect(),
                    )
                    .into())
                }
            },
            Some(tag) => {
                let cleared: Vec<TimingTag> =
                    populated.iter().copied().filter(|t| *t != tag).collect();
                if !cleared.is_empty() {
                    warn!(?cleared, chosen = %tag, "stale timing parameters cleared");
                    corrections.push(AutoCorrection::StaleTimingCleared { cleared });
                }
                let method = match tag {
                    TimingTag::SchedulingWeek => Some(TimingMethod::SchedulingWeek { weeks }),
                    TimingTag::CalendarOccurrence => Some(TimingMethod::CalendarOccurrence {
                        ordinals: self.ordinals,
                    }),
                    TimingTag::AlternatingParity => self
                        .parity
                        .map(|parity| TimingMethod::AlternatingParity { parity }),
                };
                match method {
                    Some(m) if !m.is_empty() => Some(m),
                    _ => {
                        debug!(%tag, "timing method chosen without parameters, dropped");
                        corrections.push(AutoCorrection::EmptyTimingDropped { tag });
                        None
                    }
                }
            }
        };

        let rule = Rule {
            locations,
            weekdays: self.weekdays,
            timing,
            shifts,
        };
        debug!(code = %rule, corrections = corrections.len(), "selection normalized");
        Ok(Normalized { rule, corrections })
    }

    fn check_vocabulary(&self, settings: &Settings) -> Result<()> {
        if let Some(l) = self.locations.iter().find(|l| !settings.is_location(l)) {
            return Err(ValidationError::UnknownLocation(l.clone()).into());
        }
        if let Some(s) = self
            .shifts
            .iter()
            .find(|s| settings.shift_kind(s).is_none())
        {
            return Err(ValidationError::UnknownShift(s.clone()).into());
        }
        Ok(())
    }
}

impl From<&Rule> for Selection {
    /// The selection a normalized rule came from, minus anything
    /// normalization discarded. Normalizing it again yields the same rule
    /// and no corrections.
    fn from(rule: &Rule) -> Self {
        let mut selection = Selection {
            locations: rule.locations.clone(),
            weekdays: rule.weekdays.clone(),
            shifts: rule.shifts.clone(),
            ..Selection::default()
        };
        match &rule.timing {
            None => {}
            Some(TimingMethod::SchedulingWeek { weeks }) => {
                selection = selection.with_scheduling_weeks(weeks.iter().copied());
            }
            Some(TimingMethod::CalendarOccurrence { ordinals }) => {
                selection = selection.with_calendar_occurrence(ordinals.iter().copied());
            }
            Some(TimingMethod::AlternatingParity { parity }) => {
                selection = selection.with_parity(*parity);
            }
        }
        selection
    }
}

/// Sort by vocabulary position and drop duplicates.
fn ordered(values: Vec<String>, rank: impl Fn(&str) -> Option<usize>) -> Vec<String> {
    let mut values = values;
    values.sort_by_key(|v| rank(v));
    values.dedup();
    values
}

// ── Output ────────────────────────────────────────────────────────────────────

/// A change normalization made on its own instead of rejecting the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AutoCorrection {
    /// A Sig shift was selected, so the location became Sig.
    LocationForcedToSig {
        /// Non-Sig locations that were deselected.
        replaced: Vec<String>,
    },
    /// `Any` was selected together with specific weeks.
    WeeksCollapsedToAny {
        /// The specific weeks that no longer apply.
        dropped: Vec<WeekLabel>,
    },
    /// Parameters of timing methods other than the chosen one were cleared.
    StaleTimingCleared {
        /// Methods whose parameters were discarded.
        cleared: Vec<TimingTag>,
    },
    /// A timing method was chosen but nothing was ticked for it; the rule
    /// falls back to every week.
    EmptyTimingDropped {
        /// The method that was dropped.
        tag: TimingTag,
    },
}

impl std::fmt::Display for AutoCorrection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutoCorrection::LocationForcedToSig { replaced } if replaced.is_empty() => {
                write!(f, "location set to Sig because a Sig shift is selected")
            }
            AutoCorrection::LocationForcedToSig { replaced } => write!(
                f,
                "location changed from {} to Sig because a Sig shift is selected",
                replaced.join(", ")
            ),
            AutoCorrection::WeeksCollapsedToAny { dropped } => {
                let dropped: Vec<&str> = dropped.iter().map(WeekLabel::as_str).collect();
                write!(f, "Any week overrides {}", dropped.join(", "))
            }
            AutoCorrection::StaleTimingCleared { cleared } => {
                let cleared: Vec<&str> = cleared.iter().map(TimingTag::as_str).collect();
                write!(f, "cleared parameters of {}", cleared.join(", "))
            }
            AutoCorrection::EmptyTimingDropped { tag } => {
                write!(f, "{tag} has no selection; matching every week")
            }
        }
    }
}

/// A normalized rule plus what normalization corrected on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Normalized {
    /// The rule.
    pub rule: Rule,
    /// Informational corrections, in the order they were applied.
    pub corrections: Vec<AutoCorrection>,
}

impl Normalized {
    /// Return `true` if normalization changed anything.
    pub fn is_corrected(&self) -> bool {
        !self.corrections.is_empty()
    }
}

/// Normalize raw selection state into a [`Rule`].
///
/// This is the entry point for untrusted input.
#[tracing::instrument(level = "debug", skip(settings))]
pub fn normalize_selection(settings: &Settings, raw: &RawSelection) -> Result<Normalized> {
    raw.parse(settings)?.normalize(settings)
}

impl TryFrom<&RawSelection> for Rule {
    type Error = Error;

    /// Normalize with the default settings, discarding the corrections.
    fn try_from(raw: &RawSelection) -> Result<Self> {
        normalize_selection(&Settings::default(), raw).map(|n| n.rule)
    }
}
