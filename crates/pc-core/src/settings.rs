//! Vocabulary settings.
//!
//! [`Settings`] holds the closed vocabularies a pipe code is built from:
//! locations, the normal shift codes, and the shift codes that belong to the
//! distinguished Sig location. It is a plain value owned by the caller; there
//! is no process-wide instance.
//!
//! Settings can be read from TOML. Every key is optional:
//!
//! ```toml
//! locations = ["Any", "JVJ", "Sig"]
//! sig_location = "Sig"
//! normal_shifts = ["EM", "M", "A", "E"]
//! sig_shifts = ["Sig1", "Sig2"]
//! format = "compact"
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Output mode of the pipe-code serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeFormat {
    /// Always four `Label: value` fields; unset fields read `Any`.
    #[default]
    #[serde(alias = "labelled")]
    Labeled,
    /// Only the fields that are set, without labels.
    Compact,
}

impl std::str::FromStr for CodeFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "labeled" | "labelled" => Ok(CodeFormat::Labeled),
            "compact" => Ok(CodeFormat::Compact),
            other => Err(Error::InvalidArgument(format!(
                "unknown code format {other:?} (expected labeled or compact)"
            ))),
        }
    }
}

impl std::fmt::Display for CodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeFormat::Labeled => write!(f, "labeled"),
            CodeFormat::Compact => write!(f, "compact"),
        }
    }
}

/// Which shift vocabulary a code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftKind {
    /// Shifts available at every ordinary location.
    Normal,
    /// Shifts that only exist at the Sig location.
    Sig,
}

/// Vocabulary configuration for selections and pipe codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Closed set of locations, in display order.
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,

    /// The distinguished location with its own shift vocabulary.
    #[serde(default = "default_sig_location")]
    pub sig_location: String,

    /// Shift codes valid at ordinary locations, in display order.
    #[serde(default = "default_normal_shifts")]
    pub normal_shifts: Vec<String>,

    /// Shift codes valid only at the Sig location, in display order.
    #[serde(default = "default_sig_shifts")]
    pub sig_shifts: Vec<String>,

    /// Default serializer mode.
    #[serde(default)]
    pub format: CodeFormat,
}

fn default_locations() -> Vec<String> {
    [
        "Any", "JVJ", "AGW", "Mbingu", "KEN", "Sig", "KICC", "Train", "Adams", "Comet", "Sarit",
        "Nyayo",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_sig_location() -> String {
    "Sig".to_string()
}

fn default_normal_shifts() -> Vec<String> {
    ["EM", "M", "A", "E"].iter().map(|s| s.to_string()).collect()
}

fn default_sig_shifts() -> Vec<String> {
    ["Sig1", "Sig2"].iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locations: default_locations(),
            sig_location: default_sig_location(),
            normal_shifts: default_normal_shifts(),
            sig_shifts: default_sig_shifts(),
            format: CodeFormat::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a TOML document and validate them.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(s).map_err(|e| Error::Config(e.message().to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the vocabularies can be used together.
    pub fn validate(&self) -> Result<()> {
        if self.locations.is_empty() {
            return Err(Error::Config("location vocabulary is empty".into()));
        }
        if !self.is_location(&self.sig_location) {
            return Err(Error::Config(format!(
                "sig location {:?} is not in the location vocabulary",
                self.sig_location
            )));
        }
        if self.normal_shifts.is_empty() && self.sig_shifts.is_empty() {
            return Err(Error::Config("both shift vocabularies are empty".into()));
        }
        if let Some(shared) = self
            .normal_shifts
            .iter()
            .find(|s| self.sig_shifts.contains(s))
        {
            return Err(Error::Config(format!(
                "shift {shared:?} is in both the normal and the Sig vocabulary"
            )));
        }
        Ok(())
    }

    /// Return `true` if `name` is a configured location.
    pub fn is_location(&self, name: &str) -> bool {
        self.locations.iter().any(|l| l == name)
    }

    /// Return `true` if `name` is the Sig location.
    pub fn is_sig_location(&self, name: &str) -> bool {
        self.sig_location == name
    }

    /// Classify a shift code, or `None` if it is in neither vocabulary.
    pub fn shift_kind(&self, code: &str) -> Option<ShiftKind> {
        if self.normal_shifts.iter().any(|s| s == code) {
            Some(ShiftKind::Normal)
        } else if self.sig_shifts.iter().any(|s| s == code) {
            Some(ShiftKind::Sig)
        } else {
            None
        }
    }

    /// Display position of a location (vocabulary order).
    pub fn location_rank(&self, name: &str) -> Option<usize> {
        self.locations.iter().position(|l| l == name)
    }

    /// Display position of a shift code: normal shifts first, then Sig shifts.
    pub fn shift_rank(&self, code: &str) -> Option<usize> {
        self.normal_shifts
            .iter()
            .chain(self.sig_shifts.iter())
            .position(|s| s == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = Settings::default();
        assert!(s.validate().is_ok());
        assert!(s.is_location("JVJ"));
        assert!(s.is_sig_location("Sig"));
        assert_eq!(s.shift_kind("M"), Some(ShiftKind::Normal));
        assert_eq!(s.shift_kind("Sig1"), Some(ShiftKind::Sig));
        assert_eq!(s.shift_kind("Night"), None);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let s = Settings::from_toml_str("").unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn toml_overrides() {
        let s = Settings::from_toml_str(
            r#"
            locations = ["Hub", "Sig"]
            sig_shifts = ["SigA"]
            format = "compact"
            "#,
        )
        .unwrap();
        assert_eq!(s.locations, vec!["Hub", "Sig"]);
        assert_eq!(s.sig_shifts, vec!["SigA"]);
        assert_eq!(s.normal_shifts, vec!["EM", "M", "A", "E"]);
        assert_eq!(s.format, CodeFormat::Compact);
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(matches!(
            Settings::from_toml_str("colour = \"red\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn sig_location_must_be_listed() {
        let err = Settings::from_toml_str(r#"locations = ["JVJ"]"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn overlapping_vocabularies_rejected() {
        let s = Settings {
            sig_shifts: vec!["M".into()],
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn shift_rank_puts_sig_after_normal() {
        let s = Settings::default();
        assert!(s.shift_rank("E").unwrap() < s.shift_rank("Sig1").unwrap());
    }

    #[test]
    fn code_format_parse() {
        assert_eq!("Compact".parse::<CodeFormat>().unwrap(), CodeFormat::Compact);
        assert_eq!("labeled".parse::<CodeFormat>().unwrap(), CodeFormat::Labeled);
        assert!("fancy".parse::<CodeFormat>().is_err());
    }

    #[test]
    fn british_spelling_in_toml() {
        assert_eq!("labelled".parse::<CodeFormat>().unwrap(), CodeFormat::Labeled);
        let s = Settings::from_toml_str("format = \"labelled\"").unwrap();
        assert_eq!(s.format, CodeFormat::Labeled);
    }
}
