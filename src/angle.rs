//! Unit-tagged angles.
//!
//! An [`Angle`] remembers the unit it was built from, so a value supplied in
//! degrees reads back in degrees bit-for-bit and only converts when the other
//! unit is requested.

use serde::{Deserialize, Serialize};

use crate::constants::{DEG2RAD, RAD2DEG};

/// Unit an [`Angle`] was constructed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    Degrees,
    Radians,
}

#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    value: f64,
    unit: AngleUnit,
}

impl std::fmt::Debug for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unit {
            AngleUnit::Degrees => write!(f, "{}°", self.value),
            AngleUnit::Radians => write!(f, "{} rad", self.value),
        }
    }
}

impl Angle {
    pub fn from_degrees(degrees: f64) -> Angle {
        Angle {
            value: degrees,
            unit: AngleUnit::Degrees,
        }
    }

    pub fn from_radians(radians: f64) -> Angle {
        Angle {
            value: radians,
            unit: AngleUnit::Radians,
        }
    }

    pub fn as_degrees(&self) -> f64 {
        match self.unit {
            AngleUnit::Degrees => self.value,
            AngleUnit::Radians => self.value * RAD2DEG,
        }
    }

    pub fn as_radians(&self) -> f64 {
        match self.unit {
            AngleUnit::Degrees => self.value * DEG2RAD,
            AngleUnit::Radians => self.value,
        }
    }

    /// The raw value in the unit it was supplied in.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// Value expressed in `unit`.
    pub fn in_unit(&self, unit: AngleUnit) -> f64 {
        match unit {
            AngleUnit::Degrees => self.as_degrees(),
            AngleUnit::Radians => self.as_radians(),
        }
    }
}
