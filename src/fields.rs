//! Fixed-width column map of the two TLE lines.
//!
//! # TLE Format Reference
//! ```text
//! Line 1: 1 NNNNNC NNNNNAAA NNNNN.NNNNNNNN +.NNNNNNNN +NNNNN-N +NNNNN-N N NNNNN
//! Line 2: 2 NNNNN NNN.NNNN NNN.NNNN NNNNNNN NNN.NNNN NNN.NNNN NN.NNNNNNNNNNNNNN
//! ```
//!
//! Offsets below are 0-based byte offsets; the standard documents them as
//! 1-based inclusive columns.

use crate::error::TleError;

/// A named column span on a TLE line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    /// Line the field lives on (1 or 2).
    pub line: u8,
    pub offset: usize,
    pub width: usize,
}

impl Field {
    const fn new(name: &'static str, line: u8, offset: usize, width: usize) -> Self {
        Self {
            name,
            line,
            offset,
            width,
        }
    }

    /// One past the last byte of the field.
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }
}

// ── Line 1 ──
pub const LINE1_NUMBER: Field = Field::new("line_number", 1, 0, 1);
pub const LINE1_SATELLITE_NUMBER: Field = Field::new("satellite_number", 1, 2, 5);
pub const LINE1_CLASSIFICATION: Field = Field::new("classification", 1, 7, 1);
pub const LINE1_INTL_DESIGNATOR: Field = Field::new("intl_designator", 1, 9, 8);
pub const LINE1_EPOCH_YEAR: Field = Field::new("epoch_year", 1, 18, 2);
pub const LINE1_EPOCH_DAY: Field = Field::new("epoch_day", 1, 20, 12);
pub const LINE1_FIRST_DERIVATIVE: Field = Field::new("first_derivative_mean_motion", 1, 33, 10);
pub const LINE1_SECOND_DERIVATIVE: Field = Field::new("second_derivative_mean_motion", 1, 44, 8);
pub const LINE1_BSTAR: Field = Field::new("bstar_drag", 1, 53, 8);
pub const LINE1_EPHEMERIS_TYPE: Field = Field::new("ephemeris_type", 1, 62, 1);
pub const LINE1_ELEMENT_SET: Field = Field::new("element_set_number", 1, 64, 4);
pub const LINE1_CHECKSUM: Field = Field::new("checksum", 1, 68, 1);

// ── Line 2 ──
pub const LINE2_NUMBER: Field = Field::new("line_number", 2, 0, 1);
pub const LINE2_SATELLITE_NUMBER: Field = Field::new("satellite_number", 2, 2, 5);
pub const LINE2_INCLINATION: Field = Field::new("inclination", 2, 8, 8);
pub const LINE2_RAAN: Field = Field::new("raan", 2, 17, 8);
pub const LINE2_ECCENTRICITY: Field = Field::new("eccentricity", 2, 26, 7);
pub const LINE2_ARG_PERIGEE: Field = Field::new("argument_of_perigee", 2, 34, 8);
pub const LINE2_MEAN_ANOMALY: Field = Field::new("mean_anomaly", 2, 43, 8);
pub const LINE2_MEAN_MOTION: Field = Field::new("mean_motion", 2, 52, 11);
pub const LINE2_REVOLUTIONS: Field = Field::new("revolutions_at_epoch", 2, 63, 5);
pub const LINE2_CHECKSUM: Field = Field::new("checksum", 2, 68, 1);

/// Return the trimmed text of `field`, failing if the line ends before it does.
pub fn extract<'a>(line: &'a str, field: &Field) -> Result<&'a str, TleError> {
    if line.len() < field.end() {
        return Err(TleError::LineTooShort {
            line: field.line,
            len: line.len(),
            required: field.end(),
        });
    }
    line.get(field.offset..field.end())
        .map(str::trim)
        .ok_or_else(|| TleError::malformed(field.name, line))
}

/// Like [`extract`], but a field past the end of the line or left blank is `None`.
pub fn extract_optional<'a>(line: &'a str, field: &Field) -> Result<Option<&'a str>, TleError> {
    if line.len() < field.end() {
        return Ok(None);
    }
    extract(line, field).map(|s| if s.is_empty() { None } else { Some(s) })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS_LINE1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn test_line1_columns() {
        assert_eq!(extract(ISS_LINE1, &LINE1_NUMBER).unwrap(), "1");
        assert_eq!(extract(ISS_LINE1, &LINE1_SATELLITE_NUMBER).unwrap(), "25544");
        assert_eq!(extract(ISS_LINE1, &LINE1_CLASSIFICATION).unwrap(), "U");
        assert_eq!(extract(ISS_LINE1, &LINE1_INTL_DESIGNATOR).unwrap(), "98067A");
        assert_eq!(extract(ISS_LINE1, &LINE1_EPOCH_YEAR).unwrap(), "08");
        assert_eq!(extract(ISS_LINE1, &LINE1_EPOCH_DAY).unwrap(), "264.51782528");
        assert_eq!(extract(ISS_LINE1, &LINE1_FIRST_DERIVATIVE).unwrap(), "-.00002182");
        assert_eq!(extract(ISS_LINE1, &LINE1_SECOND_DERIVATIVE).unwrap(), "00000-0");
        assert_eq!(extract(ISS_LINE1, &LINE1_BSTAR).unwrap(), "-11606-4");
        assert_eq!(extract(ISS_LINE1, &LINE1_EPHEMERIS_TYPE).unwrap(), "0");
        assert_eq!(extract(ISS_LINE1, &LINE1_ELEMENT_SET).unwrap(), "292");
        assert_eq!(extract(ISS_LINE1, &LINE1_CHECKSUM).unwrap(), "7");
    }

    #[test]
    fn test_line2_columns() {
        assert_eq!(extract(ISS_LINE2, &LINE2_SATELLITE_NUMBER).unwrap(), "25544");
        assert_eq!(extract(ISS_LINE2, &LINE2_INCLINATION).unwrap(), "51.6416");
        assert_eq!(extract(ISS_LINE2, &LINE2_RAAN).unwrap(), "247.4627");
        assert_eq!(extract(ISS_LINE2, &LINE2_ECCENTRICITY).unwrap(), "0006703");
        assert_eq!(extract(ISS_LINE2, &LINE2_ARG_PERIGEE).unwrap(), "130.5360");
        assert_eq!(extract(ISS_LINE2, &LINE2_MEAN_ANOMALY).unwrap(), "325.0288");
        assert_eq!(extract(ISS_LINE2, &LINE2_MEAN_MOTION).unwrap(), "15.72125391");
        assert_eq!(extract(ISS_LINE2, &LINE2_REVOLUTIONS).unwrap(), "56353");
        assert_eq!(extract(ISS_LINE2, &LINE2_CHECKSUM).unwrap(), "7");
    }

    #[test]
    fn test_short_line() {
        let err = extract("1 25544U", &LINE1_EPOCH_DAY).unwrap_err();
        assert_eq!(
            err,
            TleError::LineTooShort {
                line: 1,
                len: 8,
                required: 32
            }
        );
        assert_eq!(extract_optional(&ISS_LINE1[..62], &LINE1_ELEMENT_SET).unwrap(), None);
    }

    #[test]
    fn test_blank_optional() {
        let line = format!("{:<69}", "1 25544  ");
        assert_eq!(extract_optional(&line, &LINE1_CLASSIFICATION).unwrap(), None);
        assert_eq!(extract_optional(&line, &LINE1_INTL_DESIGNATOR).unwrap(), None);
    }
}
