//! Two-Line Element (TLE) set record.
//!
//! [`Tle`] holds every field a NORAD two-line element set carries. Records
//! come from [`Tle::parse`] (or the functions in [`crate::parse`]) or are
//! assembled with [`TleBuilder`], and go back to text through
//! [`Tle::to_lines`] / [`crate::format::format_tle`].
//!
//! # Example
//! ```
//! use tle_codec::tle::Tle;
//!
//! let line1 = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
//! let line2 = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";
//!
//! let tle = Tle::parse(line1, line2).unwrap();
//! assert_eq!(tle.satellite_number(), 25544);
//! assert_eq!(tle.name(), "NORAD25544");
//!
//! let (out1, out2) = tle.to_lines().unwrap();
//! assert_eq!(out1, line1);
//! assert_eq!(out2, line2);
//! ```

use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::angle::Angle;
use crate::epoch::Epoch;
use crate::error::TleError;

/// Slack allowed on angle range checks, for values converted from radians.
const ANGLE_TOLERANCE_DEG: f64 = 1e-9;

/// Security classification (column 8 of line 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "U")]
    Unclassified,
    #[serde(rename = "C")]
    Classified,
    #[serde(rename = "S")]
    Secret,
}

impl Classification {
    pub fn as_char(&self) -> char {
        match self {
            Classification::Unclassified => 'U',
            Classification::Classified => 'C',
            Classification::Secret => 'S',
        }
    }
}

impl TryFrom<char> for Classification {
    type Error = TleError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'U' => Ok(Classification::Unclassified),
            'C' => Ok(Classification::Classified),
            'S' => Ok(Classification::Secret),
            other => Err(TleError::OutOfRange {
                field: "classification",
                value: other.to_string(),
                allowed: "U, C or S",
            }),
        }
    }
}

/// A Two-Line Element set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TleBuilder")]
pub struct Tle {
    /// Satellite name (from line 0, if present).
    name: Option<String>,
    /// NORAD catalog number.
    satellite_number: u32,
    classification: Option<Classification>,
    /// International designator (launch year, launch number, piece).
    intl_designator: Option<String>,
    epoch: Epoch,
    /// First derivative of mean motion (rev/day²) / 2.
    first_derivative_mean_motion: Option<f64>,
    /// Second derivative of mean motion (rev/day³) / 6.
    second_derivative_mean_motion: Option<f64>,
    /// B* drag term (1/Earth radii).
    bstar_drag: f64,
    ephemeris_type: Option<u8>,
    element_set_number: Option<u16>,
    inclination: Angle,
    /// Right ascension of ascending node.
    raan: Angle,
    eccentricity: f64,
    argument_of_perigee: Angle,
    mean_anomaly: Angle,
    /// Mean motion (revolutions per day).
    mean_motion: f64,
    revolutions_at_epoch: Option<u32>,
}

impl Tle {
    /// Parse a TLE from two lines (without satellite name).
    pub fn parse(line1: &str, line2: &str) -> Result<Self, TleError> {
        crate::parse::parse_tle(line1, line2)
    }

    /// Parse a TLE from three lines (with satellite name on line 0).
    pub fn parse_3line(line0: &str, line1: &str, line2: &str) -> Result<Self, TleError> {
        crate::parse::parse_3line(line0, line1, line2)
    }

    /// Parse a string containing multiple TLEs (2-line or 3-line format).
    pub fn parse_batch(input: &str) -> Result<Vec<Self>, TleError> {
        crate::parse::parse_batch(input)
    }

    /// Render both lines, checksums included.
    pub fn to_lines(&self) -> Result<(String, String), TleError> {
        crate::format::format_tle(self)
    }

    pub fn builder() -> TleBuilder {
        TleBuilder::default()
    }

    // ── Accessors ─────────────────────────────────────────────────

    /// The title-line name, or `NORAD#####` when the set had none.
    pub fn name(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(format!("NORAD{:05}", self.satellite_number)),
        }
    }

    /// The title-line name exactly as supplied.
    pub fn title(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn satellite_number(&self) -> u32 {
        self.satellite_number
    }

    pub fn classification(&self) -> Option<Classification> {
        self.classification
    }

    pub fn intl_designator(&self) -> Option<&str> {
        self.intl_designator.as_deref()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Calendar year of the epoch.
    pub fn epoch_year(&self) -> i32 {
        self.epoch.year()
    }

    /// Fractional day of year of the epoch.
    pub fn epoch_day(&self) -> f64 {
        self.epoch.epoch_day()
    }

    pub fn first_derivative_mean_motion(&self) -> Option<f64> {
        self.first_derivative_mean_motion
    }

    pub fn second_derivative_mean_motion(&self) -> Option<f64> {
        self.second_derivative_mean_motion
    }

    pub fn bstar_drag(&self) -> f64 {
        self.bstar_drag
    }

    pub fn ephemeris_type(&self) -> Option<u8> {
        self.ephemeris_type
    }

    pub fn element_set_number(&self) -> Option<u16> {
        self.element_set_number
    }

    pub fn inclination(&self) -> Angle {
        self.inclination
    }

    pub fn raan(&self) -> Angle {
        self.raan
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn argument_of_perigee(&self) -> Angle {
        self.argument_of_perigee
    }

    pub fn mean_anomaly(&self) -> Angle {
        self.mean_anomaly
    }

    pub fn mean_motion(&self) -> f64 {
        self.mean_motion
    }

    pub fn revolutions_at_epoch(&self) -> Option<u32> {
        self.revolutions_at_epoch
    }

    // ── Setters ───────────────────────────────────────────────────

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn set_satellite_number(&mut self, n: u32) -> Result<(), TleError> {
        check_satellite_number(n)?;
        self.satellite_number = n;
        Ok(())
    }

    pub fn set_classification(&mut self, classification: Option<Classification>) {
        self.classification = classification;
    }

    pub fn set_intl_designator(&mut self, designator: Option<String>) -> Result<(), TleError> {
        if let Some(d) = &designator {
            check_designator(d)?;
        }
        self.intl_designator = designator;
        Ok(())
    }

    pub fn set_epoch(&mut self, epoch: Epoch) {
        self.epoch = epoch;
    }

    pub fn set_first_derivative_mean_motion(&mut self, value: Option<f64>) -> Result<(), TleError> {
        if let Some(v) = value {
            check_finite("first_derivative_mean_motion", v)?;
        }
        self.first_derivative_mean_motion = value;
        Ok(())
    }

    pub fn set_second_derivative_mean_motion(&mut self, value: Option<f64>) -> Result<(), TleError> {
        if let Some(v) = value {
            check_finite("second_derivative_mean_motion", v)?;
        }
        self.second_derivative_mean_motion = value;
        Ok(())
    }

    pub fn set_bstar_drag(&mut self, value: f64) -> Result<(), TleError> {
        check_finite("bstar_drag", value)?;
        self.bstar_drag = value;
        Ok(())
    }

    pub fn set_ephemeris_type(&mut self, value: Option<u8>) -> Result<(), TleError> {
        if let Some(v) = value {
            check_max("ephemeris_type", v as u64, 9, "0..=9")?;
        }
        self.ephemeris_type = value;
        Ok(())
    }

    pub fn set_element_set_number(&mut self, value: Option<u16>) -> Result<(), TleError> {
        if let Some(v) = value {
            check_max("element_set_number", v as u64, 9999, "0..=9999")?;
        }
        self.element_set_number = value;
        Ok(())
    }

    pub fn set_inclination(&mut self, angle: Angle) -> Result<(), TleError> {
        check_angle("inclination", angle, 180.0)?;
        self.inclination = angle;
        Ok(())
    }

    pub fn set_raan(&mut self, angle: Angle) -> Result<(), TleError> {
        check_angle("raan", angle, 360.0)?;
        self.raan = angle;
        Ok(())
    }

    /// Any finite value is stored; formatting requires [0, 1).
    pub fn set_eccentricity(&mut self, value: f64) -> Result<(), TleError> {
        check_finite("eccentricity", value)?;
        self.eccentricity = value;
        Ok(())
    }

    pub fn set_argument_of_perigee(&mut self, angle: Angle) -> Result<(), TleError> {
        check_angle("argument_of_perigee", angle, 360.0)?;
        self.argument_of_perigee = angle;
        Ok(())
    }

    pub fn set_mean_anomaly(&mut self, angle: Angle) -> Result<(), TleError> {
        check_angle("mean_anomaly", angle, 360.0)?;
        self.mean_anomaly = angle;
        Ok(())
    }

    pub fn set_mean_motion(&mut self, value: f64) -> Result<(), TleError> {
        check_mean_motion(value)?;
        self.mean_motion = value;
        Ok(())
    }

    pub fn set_revolutions_at_epoch(&mut self, value: Option<u32>) -> Result<(), TleError> {
        if let Some(v) = value {
            check_max("revolutions_at_epoch", v as u64, 99_999, "0..=99999")?;
        }
        self.revolutions_at_epoch = value;
        Ok(())
    }

    // ── By-name access ────────────────────────────────────────────

    /// Read a field by name.
    pub fn get(&self, field: TleField) -> FieldValue {
        match field {
            TleField::SatelliteNumber => FieldValue::Integer(self.satellite_number),
            TleField::Classification => self.classification.map_or(FieldValue::Absent, FieldValue::Classification),
            TleField::IntlDesignator => self.intl_designator.clone().map_or(FieldValue::Absent, FieldValue::Text),
            TleField::Epoch => FieldValue::Epoch(self.epoch),
            TleField::FirstDerivativeMeanMotion => self.first_derivative_mean_motion.map_or(FieldValue::Absent, FieldValue::Real),
            TleField::SecondDerivativeMeanMotion => self.second_derivative_mean_motion.map_or(FieldValue::Absent, FieldValue::Real),
            TleField::BstarDrag => FieldValue::Real(self.bstar_drag),
            TleField::EphemerisType => self.ephemeris_type.map_or(FieldValue::Absent, |v| FieldValue::Integer(v as u32)),
            TleField::ElementSetNumber => self.element_set_number.map_or(FieldValue::Absent, |v| FieldValue::Integer(v as u32)),
            TleField::Inclination => FieldValue::Angle(self.inclination),
            TleField::Raan => FieldValue::Angle(self.raan),
            TleField::Eccentricity => FieldValue::Real(self.eccentricity),
            TleField::ArgumentOfPerigee => FieldValue::Angle(self.argument_of_perigee),
            TleField::MeanAnomaly => FieldValue::Angle(self.mean_anomaly),
            TleField::MeanMotion => FieldValue::Real(self.mean_motion),
            TleField::RevolutionsAtEpoch => self.revolutions_at_epoch.map_or(FieldValue::Absent, FieldValue::Integer),
        }
    }

    /// Assign a field by name, with the same validation as the typed setters.
    pub fn set(&mut self, field: TleField, value: FieldValue) -> Result<(), TleError> {
        match (field, value) {
            (TleField::SatelliteNumber, FieldValue::Integer(n)) => self.set_satellite_number(n),
            (TleField::Classification, FieldValue::Classification(c)) => {
                self.set_classification(Some(c));
                Ok(())
            }
            (TleField::Classification, FieldValue::Absent) => {
                self.set_classification(None);
                Ok(())
            }
            (TleField::IntlDesignator, FieldValue::Text(s)) => self.set_intl_designator(Some(s)),
            (TleField::IntlDesignator, FieldValue::Absent) => self.set_intl_designator(None),
            (TleField::Epoch, FieldValue::Epoch(t)) => {
                self.set_epoch(t);
                Ok(())
            }
            (TleField::FirstDerivativeMeanMotion, FieldValue::Real(v)) => self.set_first_derivative_mean_motion(Some(v)),
            (TleField::FirstDerivativeMeanMotion, FieldValue::Absent) => self.set_first_derivative_mean_motion(None),
            (TleField::SecondDerivativeMeanMotion, FieldValue::Real(v)) => self.set_second_derivative_mean_motion(Some(v)),
            (TleField::SecondDerivativeMeanMotion, FieldValue::Absent) => self.set_second_derivative_mean_motion(None),
            (TleField::BstarDrag, FieldValue::Real(v)) => self.set_bstar_drag(v),
            (TleField::EphemerisType, FieldValue::Integer(v)) => {
                let v = u8::try_from(v).map_err(|_| out_of_range("ephemeris_type", v, "0..=9"))?;
                self.set_ephemeris_type(Some(v))
            }
            (TleField::EphemerisType, FieldValue::Absent) => self.set_ephemeris_type(None),
            (TleField::ElementSetNumber, FieldValue::Integer(v)) => {
                let v = u16::try_from(v).map_err(|_| out_of_range("element_set_number", v, "0..=9999"))?;
                self.set_element_set_number(Some(v))
            }
            (TleField::ElementSetNumber, FieldValue::Absent) => self.set_element_set_number(None),
            (TleField::Inclination, FieldValue::Angle(a)) => self.set_inclination(a),
            (TleField::Raan, FieldValue::Angle(a)) => self.set_raan(a),
            (TleField::Eccentricity, FieldValue::Real(v)) => self.set_eccentricity(v),
            (TleField::ArgumentOfPerigee, FieldValue::Angle(a)) => self.set_argument_of_perigee(a),
            (TleField::MeanAnomaly, FieldValue::Angle(a)) => self.set_mean_anomaly(a),
            (TleField::MeanMotion, FieldValue::Real(v)) => self.set_mean_motion(v),
            (TleField::RevolutionsAtEpoch, FieldValue::Integer(v)) => self.set_revolutions_at_epoch(Some(v)),
            (TleField::RevolutionsAtEpoch, FieldValue::Absent) => self.set_revolutions_at_epoch(None),
            (field, FieldValue::Absent) => Err(TleError::MissingField(field.name())),
            (field, other) => Err(TleError::TypeMismatch {
                field: field.name(),
                expected: field.expected_type(),
                found: other.type_name(),
            }),
        }
    }

    /// Every field with its current value, in wire order.
    pub fn to_record(&self) -> Vec<(TleField, FieldValue)> {
        TleField::ALL.iter().map(|&f| (f, self.get(f))).collect()
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), TleError> {
        check_satellite_number(self.satellite_number)?;
        if let Some(d) = &self.intl_designator {
            check_designator(d)?;
        }
        for (field, value) in [
            ("first_derivative_mean_motion", self.first_derivative_mean_motion),
            ("second_derivative_mean_motion", self.second_derivative_mean_motion),
            ("bstar_drag", Some(self.bstar_drag)),
            ("eccentricity", Some(self.eccentricity)),
        ] {
            if let Some(v) = value {
                check_finite(field, v)?;
            }
        }
        if let Some(v) = self.ephemeris_type {
            check_max("ephemeris_type", v as u64, 9, "0..=9")?;
        }
        if let Some(v) = self.element_set_number {
            check_max("element_set_number", v as u64, 9999, "0..=9999")?;
        }
        if let Some(v) = self.revolutions_at_epoch {
            check_max("revolutions_at_epoch", v as u64, 99_999, "0..=99999")?;
        }
        check_angle("inclination", self.inclination, 180.0)?;
        check_angle("raan", self.raan, 360.0)?;
        check_angle("argument_of_perigee", self.argument_of_perigee, 360.0)?;
        check_angle("mean_anomaly", self.mean_anomaly, 360.0)?;
        check_mean_motion(self.mean_motion)
    }
}

/// Builder for [`Tle`] records.
///
/// Satellite number, epoch, B*, the four angles, eccentricity and mean motion
/// are mandatory; everything else only matters for round-tripping text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TleBuilder {
    name: Option<String>,
    satellite_number: Option<u32>,
    classification: Option<Classification>,
    intl_designator: Option<String>,
    epoch: Option<Epoch>,
    first_derivative_mean_motion: Option<f64>,
    second_derivative_mean_motion: Option<f64>,
    bstar_drag: Option<f64>,
    ephemeris_type: Option<u8>,
    element_set_number: Option<u16>,
    inclination: Option<Angle>,
    raan: Option<Angle>,
    eccentricity: Option<f64>,
    argument_of_perigee: Option<Angle>,
    mean_anomaly: Option<Angle>,
    mean_motion: Option<f64>,
    revolutions_at_epoch: Option<u32>,
}

impl TleBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn satellite_number(mut self, n: u32) -> Self {
        self.satellite_number = Some(n);
        self
    }

    pub fn classification(mut self, c: Classification) -> Self {
        self.classification = Some(c);
        self
    }

    pub fn intl_designator(mut self, d: impl Into<String>) -> Self {
        self.intl_designator = Some(d.into());
        self
    }

    pub fn epoch(mut self, epoch: Epoch) -> Self {
        self.epoch = Some(epoch);
        self
    }

    pub fn first_derivative_mean_motion(mut self, v: f64) -> Self {
        self.first_derivative_mean_motion = Some(v);
        self
    }

    pub fn second_derivative_mean_motion(mut self, v: f64) -> Self {
        self.second_derivative_mean_motion = Some(v);
        self
    }

    pub fn bstar_drag(mut self, v: f64) -> Self {
        self.bstar_drag = Some(v);
        self
    }

    pub fn ephemeris_type(mut self, v: u8) -> Self {
        self.ephemeris_type = Some(v);
        self
    }

    pub fn element_set_number(mut self, v: u16) -> Self {
        self.element_set_number = Some(v);
        self
    }

    pub fn inclination(mut self, a: Angle) -> Self {
        self.inclination = Some(a);
        self
    }

    pub fn raan(mut self, a: Angle) -> Self {
        self.raan = Some(a);
        self
    }

    pub fn eccentricity(mut self, v: f64) -> Self {
        self.eccentricity = Some(v);
        self
    }

    pub fn argument_of_perigee(mut self, a: Angle) -> Self {
        self.argument_of_perigee = Some(a);
        self
    }

    pub fn mean_anomaly(mut self, a: Angle) -> Self {
        self.mean_anomaly = Some(a);
        self
    }

    pub fn mean_motion(mut self, v: f64) -> Self {
        self.mean_motion = Some(v);
        self
    }

    pub fn revolutions_at_epoch(mut self, v: u32) -> Self {
        self.revolutions_at_epoch = Some(v);
        self
    }

    /// Assemble the record, failing on the first missing or out-of-range field.
    pub fn build(self) -> Result<Tle, TleError> {
        let tle = Tle {
            name: self.name,
            satellite_number: self
                .satellite_number
                .ok_or(TleError::MissingField("satellite_number"))?,
            classification: self.classification,
            intl_designator: self.intl_designator,
            epoch: self.epoch.ok_or(TleError::MissingField("epoch"))?,
            first_derivative_mean_motion: self.first_derivative_mean_motion,
            second_derivative_mean_motion: self.second_derivative_mean_motion,
            bstar_drag: self.bstar_drag.ok_or(TleError::MissingField("bstar_drag"))?,
            ephemeris_type: self.ephemeris_type,
            element_set_number: self.element_set_number,
            inclination: self.inclination.ok_or(TleError::MissingField("inclination"))?,
            raan: self.raan.ok_or(TleError::MissingField("raan"))?,
            eccentricity: self.eccentricity.ok_or(TleError::MissingField("eccentricity"))?,
            argument_of_perigee: self
                .argument_of_perigee
                .ok_or(TleError::MissingField("argument_of_perigee"))?,
            mean_anomaly: self.mean_anomaly.ok_or(TleError::MissingField("mean_anomaly"))?,
            mean_motion: self.mean_motion.ok_or(TleError::MissingField("mean_motion"))?,
            revolutions_at_epoch: self.revolutions_at_epoch,
        };
        tle.validate()?;
        Ok(tle)
    }
}

impl TryFrom<TleBuilder> for Tle {
    type Error = TleError;

    fn try_from(builder: TleBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl From<&Tle> for TleBuilder {
    fn from(tle: &Tle) -> Self {
        Self {
            name: tle.name.clone(),
            satellite_number: Some(tle.satellite_number),
            classification: tle.classification,
            intl_designator: tle.intl_designator.clone(),
            epoch: Some(tle.epoch),
            first_derivative_mean_motion: tle.first_derivative_mean_motion,
            second_derivative_mean_motion: tle.second_derivative_mean_motion,
            bstar_drag: Some(tle.bstar_drag),
            ephemeris_type: tle.ephemeris_type,
            element_set_number: tle.element_set_number,
            inclination: Some(tle.inclination),
            raan: Some(tle.raan),
            eccentricity: Some(tle.eccentricity),
            argument_of_perigee: Some(tle.argument_of_perigee),
            mean_anomaly: Some(tle.mean_anomaly),
            mean_motion: Some(tle.mean_motion),
            revolutions_at_epoch: tle.revolutions_at_epoch,
        }
    }
}

/// Names a field of [`Tle`] for by-name access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TleField {
    SatelliteNumber,
    Classification,
    IntlDesignator,
    Epoch,
    FirstDerivativeMeanMotion,
    SecondDerivativeMeanMotion,
    BstarDrag,
    EphemerisType,
    ElementSetNumber,
    Inclination,
    Raan,
    Eccentricity,
    ArgumentOfPerigee,
    MeanAnomaly,
    MeanMotion,
    RevolutionsAtEpoch,
}

impl TleField {
    pub const ALL: [TleField; 16] = [
        TleField::SatelliteNumber,
        TleField::Classification,
        TleField::IntlDesignator,
        TleField::Epoch,
        TleField::FirstDerivativeMeanMotion,
        TleField::SecondDerivativeMeanMotion,
        TleField::BstarDrag,
        TleField::EphemerisType,
        TleField::ElementSetNumber,
        TleField::Inclination,
        TleField::Raan,
        TleField::Eccentricity,
        TleField::ArgumentOfPerigee,
        TleField::MeanAnomaly,
        TleField::MeanMotion,
        TleField::RevolutionsAtEpoch,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TleField::SatelliteNumber => "satellite_number",
            TleField::Classification => "classification",
            TleField::IntlDesignator => "intl_designator",
            TleField::Epoch => "epoch",
            TleField::FirstDerivativeMeanMotion => "first_derivative_mean_motion",
            TleField::SecondDerivativeMeanMotion => "second_derivative_mean_motion",
            TleField::BstarDrag => "bstar_drag",
            TleField::EphemerisType => "ephemeris_type",
            TleField::ElementSetNumber => "element_set_number",
            TleField::Inclination => "inclination",
            TleField::Raan => "raan",
            TleField::Eccentricity => "eccentricity",
            TleField::ArgumentOfPerigee => "argument_of_perigee",
            TleField::MeanAnomaly => "mean_anomaly",
            TleField::MeanMotion => "mean_motion",
            TleField::RevolutionsAtEpoch => "revolutions_at_epoch",
        }
    }

    /// Whether a record must always carry this field.
    pub fn is_mandatory(&self) -> bool {
        matches!(
            self,
            TleField::SatelliteNumber
                | TleField::Epoch
                | TleField::BstarDrag
                | TleField::Inclination
                | TleField::Raan
                | TleField::Eccentricity
                | TleField::ArgumentOfPerigee
                | TleField::MeanAnomaly
                | TleField::MeanMotion
        )
    }

    fn expected_type(&self) -> &'static str {
        match self {
            TleField::SatelliteNumber
            | TleField::EphemerisType
            | TleField::ElementSetNumber
            | TleField::RevolutionsAtEpoch => "integer",
            TleField::Classification => "classification",
            TleField::IntlDesignator => "text",
            TleField::Epoch => "epoch",
            TleField::Inclination
            | TleField::Raan
            | TleField::ArgumentOfPerigee
            | TleField::MeanAnomaly => "angle",
            TleField::FirstDerivativeMeanMotion
            | TleField::SecondDerivativeMeanMotion
            | TleField::BstarDrag
            | TleField::Eccentricity
            | TleField::MeanMotion => "real",
        }
    }
}

impl FromStr for TleField {
    type Err = TleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TleField::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| TleError::malformed("field_name", s))
    }
}

impl std::fmt::Display for TleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A field value for by-name access.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// An optional field that is not set.
    Absent,
    Integer(u32),
    Real(f64),
    Text(String),
    Classification(Classification),
    Epoch(Epoch),
    Angle(Angle),
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Absent => "absent",
            FieldValue::Integer(_) => "integer",
            FieldValue::Real(_) => "real",
            FieldValue::Text(_) => "text",
            FieldValue::Classification(_) => "classification",
            FieldValue::Epoch(_) => "epoch",
            FieldValue::Angle(_) => "angle",
        }
    }
}

// ── Validation ────────────────────────────────────────────────────

fn out_of_range(field: &'static str, value: impl ToString, allowed: &'static str) -> TleError {
    TleError::OutOfRange {
        field,
        value: value.to_string(),
        allowed,
    }
}

fn check_satellite_number(n: u32) -> Result<(), TleError> {
    if !(1..=99_999).contains(&n) {
        return Err(out_of_range("satellite_number", n, "1..=99999"));
    }
    Ok(())
}

fn check_designator(d: &str) -> Result<(), TleError> {
    if d.len() > 8 || !d.is_ascii() {
        return Err(out_of_range("intl_designator", d, "at most 8 ASCII characters"));
    }
    Ok(())
}

fn check_max(field: &'static str, value: u64, max: u64, allowed: &'static str) -> Result<(), TleError> {
    if value > max {
        return Err(out_of_range(field, value, allowed));
    }
    Ok(())
}

fn check_finite(field: &'static str, value: f64) -> Result<(), TleError> {
    if !value.is_finite() {
        return Err(out_of_range(field, value, "finite values"));
    }
    Ok(())
}

fn check_angle(field: &'static str, angle: Angle, max_deg: f64) -> Result<(), TleError> {
    let deg = angle.as_degrees();
    if !deg.is_finite() || deg < -ANGLE_TOLERANCE_DEG || deg > max_deg + ANGLE_TOLERANCE_DEG {
        let allowed = if max_deg <= 180.0 { "0..=180 degrees" } else { "0..=360 degrees" };
        return Err(out_of_range(field, format!("{:?}", angle), allowed));
    }
    Ok(())
}

fn check_mean_motion(value: f64) -> Result<(), TleError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(out_of_range("mean_motion", value, "positive revolutions per day"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sample_builder() -> TleBuilder {
        Tle::builder()
            .satellite_number(25544)
            .epoch(Epoch::from_unix_seconds(1_221_913_540.104_192).unwrap())
            .bstar_drag(-0.11606e-4)
            .inclination(Angle::from_degrees(51.6416))
            .raan(Angle::from_radians(4.319))
            .eccentricity(0.0006703)
            .argument_of_perigee(Angle::from_degrees(130.536))
            .mean_anomaly(Angle::from_degrees(325.0288))
            .mean_motion(15.72125391)
    }

    #[test]
    fn test_builder_fidelity() {
        let epoch = Epoch::from_unix_seconds(1_000_000.5).unwrap();
        let tle = sample_builder()
            .epoch(epoch)
            .classification(Classification::Unclassified)
            .intl_designator("98067A")
            .first_derivative_mean_motion(-0.00002182)
            .element_set_number(292)
            .revolutions_at_epoch(56353)
            .build()
            .unwrap();

        let record = tle.to_record();
        assert_eq!(record.len(), 16);
        let expected = vec![
            (TleField::SatelliteNumber, FieldValue::Integer(25544)),
            (TleField::Classification, FieldValue::Classification(Classification::Unclassified)),
            (TleField::IntlDesignator, FieldValue::Text("98067A".into())),
            (TleField::Epoch, FieldValue::Epoch(epoch)),
            (TleField::FirstDerivativeMeanMotion, FieldValue::Real(-0.00002182)),
            (TleField::SecondDerivativeMeanMotion, FieldValue::Absent),
            (TleField::BstarDrag, FieldValue::Real(-0.11606e-4)),
            (TleField::EphemerisType, FieldValue::Absent),
            (TleField::ElementSetNumber, FieldValue::Integer(292)),
            (TleField::Inclination, FieldValue::Angle(Angle::from_degrees(51.6416))),
            (TleField::Raan, FieldValue::Angle(Angle::from_radians(4.319))),
            (TleField::Eccentricity, FieldValue::Real(0.0006703)),
            (TleField::ArgumentOfPerigee, FieldValue::Angle(Angle::from_degrees(130.536))),
            (TleField::MeanAnomaly, FieldValue::Angle(Angle::from_degrees(325.0288))),
            (TleField::MeanMotion, FieldValue::Real(15.72125391)),
            (TleField::RevolutionsAtEpoch, FieldValue::Integer(56353)),
        ];
        assert_eq!(record, expected);

        match tle.get(TleField::Epoch) {
            FieldValue::Epoch(t) => assert_eq!(t.unix_seconds(), 1_000_000.5),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(tle.raan().as_radians(), 4.319);
    }

    #[test]
    fn test_missing_field() {
        let err = Tle::builder()
            .satellite_number(25544)
            .epoch(Epoch::from_year_day(2024, 1.5).unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err, TleError::MissingField("bstar_drag"));
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }

    #[test]
    fn test_builder_range_checks() {
        let err = sample_builder().satellite_number(100_000).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
        let err = sample_builder().inclination(Angle::from_degrees(181.0)).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
        let err = sample_builder().mean_motion(0.0).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
        let err = sample_builder().intl_designator("TOO-LONG-ID").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
        // the format step rejects these, not the builder
        assert!(sample_builder().eccentricity(1.0).build().is_ok());
        assert!(sample_builder().bstar_drag(2.0).build().is_ok());
    }

    #[test]
    fn test_default_name() {
        let tle = sample_builder().satellite_number(5).build().unwrap();
        assert_eq!(tle.name(), "NORAD00005");
        assert_eq!(tle.title(), None);
        let named = sample_builder().name("ISS (ZARYA)").build().unwrap();
        assert_eq!(named.name(), "ISS (ZARYA)");
    }

    #[test]
    fn test_set_by_name() {
        let mut tle = sample_builder().build().unwrap();
        tle.set(TleField::Inclination, FieldValue::Angle(Angle::from_degrees(98.2)))
            .unwrap();
        assert_eq!(tle.inclination().as_degrees(), 98.2);

        tle.set(TleField::ElementSetNumber, FieldValue::Integer(999)).unwrap();
        assert_eq!(tle.element_set_number(), Some(999));
        tle.set(TleField::ElementSetNumber, FieldValue::Absent).unwrap();
        assert_eq!(tle.element_set_number(), None);
    }

    #[test]
    fn test_set_type_mismatch() {
        let mut tle = sample_builder().build().unwrap();
        let err = tle
            .set(TleField::MeanAnomaly, FieldValue::Real(12.0))
            .unwrap_err();
        assert_eq!(
            err,
            TleError::TypeMismatch {
                field: "mean_anomaly",
                expected: "angle",
                found: "real",
            }
        );
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        let err = tle.set(TleField::MeanMotion, FieldValue::Absent).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        // the failed assignments left the record untouched
        assert_eq!(tle.mean_anomaly().as_degrees(), 325.0288);
    }

    #[test]
    fn test_field_names() {
        for field in TleField::ALL {
            assert_eq!(field.name().parse::<TleField>().unwrap(), field);
        }
        assert!("altitude".parse::<TleField>().is_err());
        assert!(TleField::BstarDrag.is_mandatory());
        assert!(!TleField::RevolutionsAtEpoch.is_mandatory());
    }

    #[test]
    fn test_classification_chars() {
        for c in ['U', 'C', 'S'] {
            assert_eq!(Classification::try_from(c).unwrap().as_char(), c);
        }
        assert!(Classification::try_from('X').is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = sample_builder().build().unwrap();
        let mut copy = original.clone();
        copy.set_mean_motion(14.0).unwrap();
        assert_eq!(original.mean_motion(), 15.72125391);
        assert_eq!(copy.mean_motion(), 14.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let tle = sample_builder()
            .name("ISS (ZARYA)")
            .classification(Classification::Unclassified)
            .intl_designator("98067A")
            .revolutions_at_epoch(56353)
            .build()
            .unwrap();
        let text = toml::to_string(&tle).unwrap();
        assert!(text.contains("classification = \"U\""), "{text}");
        assert!(text.contains("unit = \"radians\""), "{text}");

        let back: Tle = toml::from_str(&text).unwrap();
        assert_eq!(back, tle);
        assert_eq!(back.raan().unit(), crate::angle::AngleUnit::Radians);
        assert_eq!(back.epoch(), tle.epoch());
    }

    #[test]
    fn test_deserialize_validates() {
        let tle = sample_builder().build().unwrap();
        let mut value = toml::Value::try_from(&tle).unwrap();
        value["inclination"]["value"] = toml::Value::Float(181.0);
        let err = value.try_into::<Tle>().unwrap_err();
        assert!(err.to_string().contains("inclination"), "{err}");

        let mut value = toml::Value::try_from(&tle).unwrap();
        if let Some(table) = value.as_table_mut() {
            table.remove("mean_motion");
        }
        let err = value.try_into::<Tle>().unwrap_err();
        assert!(err.to_string().contains("mean_motion"), "{err}");
    }
}
