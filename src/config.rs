//! Parser configuration.
use serde::{Deserialize, Serialize};

use crate::error::TleError;

/// How a two-digit epoch year on line 1 maps to a calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EpochYearRule {
    /// Always `2000 + yy`.
    #[default]
    Prefix20,
    /// `57..=99` → `1957..=1999`, `00..=56` → `2000..=2056`.
    Pivot57,
}

impl EpochYearRule {
    pub fn full_year(&self, two_digit: u16) -> i32 {
        let yy = two_digit as i32;
        match self {
            EpochYearRule::Prefix20 => 2000 + yy,
            EpochYearRule::Pivot57 if yy >= 57 => 1900 + yy,
            EpochYearRule::Pivot57 => 2000 + yy,
        }
    }
}

/// Options for [`crate::parse::parse_tle_with`].
///
/// Loadable from TOML; every key is optional:
/// ```toml
/// verify-checksums = true
/// year-rule = "pivot57"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseOptions {
    /// Reject lines whose column 69 doesn't match the computed checksum.
    pub verify_checksums: bool,
    /// Require line 1 to start with `1` and line 2 with `2`.
    pub check_line_numbers: bool,
    /// Require both lines to carry the same satellite number.
    pub check_satellite_numbers: bool,
    pub year_rule: EpochYearRule,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            verify_checksums: false,
            check_line_numbers: true,
            check_satellite_numbers: true,
            year_rule: EpochYearRule::Prefix20,
        }
    }
}

impl ParseOptions {
    /// Strict validation of everything the lines carry.
    pub fn strict() -> Self {
        Self {
            verify_checksums: true,
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

impl From<EpochYearRule> for ParseOptions {
    fn from(year_rule: EpochYearRule) -> Self {
        Self {
            year_rule,
            ..Self::default()
        }
    }
}

impl From<toml::de::Error> for TleError {
    fn from(err: toml::de::Error) -> Self {
        TleError::MalformedField {
            field: "parse_options",
            value: err.to_string(),
        }
    }
}
