//! Two-Line Element text → [`Tle`] records.
//!
//! Parses standard NORAD/Space-Track TLE format (2-line and 3-line with name)
//! and batches of mixed sets.

use std::str::FromStr;

use tracing::{debug, warn};

use crate::angle::Angle;
use crate::checksum::verify_checksum;
use crate::config::ParseOptions;
use crate::constants::{MIN_LINE1_LENGTH, MIN_LINE2_LENGTH};
use crate::decimal::{parse_decimal, parse_decimal_rhs};
use crate::epoch::Epoch;
use crate::error::TleError;
use crate::fields::*;
use crate::tle::{Classification, Tle, TleBuilder};

/// Parse a TLE from two lines with the default [`ParseOptions`].
pub fn parse_tle(line1: &str, line2: &str) -> Result<Tle, TleError> {
    parse_tle_with(line1, line2, &ParseOptions::default())
}

/// Parse a TLE from two lines.
pub fn parse_tle_with(line1: &str, line2: &str, options: &ParseOptions) -> Result<Tle, TleError> {
    parse_with_name(None, line1, line2, options)
}

/// Parse a TLE from three lines (with satellite name on line 0).
///
/// A leading `0 ` on the name line, as some catalogs emit, is dropped.
pub fn parse_3line(line0: &str, line1: &str, line2: &str) -> Result<Tle, TleError> {
    parse_3line_with(line0, line1, line2, &ParseOptions::default())
}

pub fn parse_3line_with(
    line0: &str,
    line1: &str,
    line2: &str,
    options: &ParseOptions,
) -> Result<Tle, TleError> {
    let name = line0.trim();
    let name = name.strip_prefix("0 ").unwrap_or(name).trim().to_string();
    parse_with_name(Some(name), line1, line2, options)
}

/// Parse a string containing multiple TLEs (2-line or 3-line format).
///
/// Lines starting with '1' followed by a line starting with '2' form a
/// two-line set; a line followed by such a pair is taken as its name. Other
/// lines are skipped.
pub fn parse_batch(input: &str) -> Result<Vec<Tle>, TleError> {
    parse_batch_with(input, &ParseOptions::default())
}

pub fn parse_batch_with(input: &str, options: &ParseOptions) -> Result<Vec<Tle>, TleError> {
    let lines: Vec<&str> = input
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(TleError::Empty);
    }

    let is_line1 = |l: &str| l.starts_with("1 ");
    let is_line2 = |l: &str| l.starts_with("2 ");

    let mut tles = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if is_line1(lines[i]) && i + 1 < lines.len() && is_line2(lines[i + 1]) {
            tles.push(parse_tle_with(lines[i], lines[i + 1], options)?);
            i += 2;
        } else if i + 2 < lines.len() && is_line1(lines[i + 1]) && is_line2(lines[i + 2]) {
            tles.push(parse_3line_with(lines[i], lines[i + 1], lines[i + 2], options)?);
            i += 3;
        } else {
            if i + 1 == lines.len() && is_line1(lines[i]) {
                warn!(line = i, "input ends with an incomplete element set");
            } else {
                debug!(line = i, text = lines[i], "skipping unrecognized line");
            }
            i += 1;
        }
    }

    if tles.is_empty() {
        return Err(TleError::Empty);
    }

    Ok(tles)
}

fn parse_with_name(
    name: Option<String>,
    line1: &str,
    line2: &str,
    options: &ParseOptions,
) -> Result<Tle, TleError> {
    decode(name, line1, line2, options).map_err(wire_error)
}

/// Range failures on parsed text are bad input, not encoding failures.
fn wire_error(err: TleError) -> TleError {
    match err {
        TleError::OutOfRange {
            field: "satellite_number",
            value,
            ..
        } => TleError::InvalidIdentifier(value),
        TleError::OutOfRange { field, value, .. } => TleError::MalformedField { field, value },
        other => other,
    }
}

fn decode(
    name: Option<String>,
    line1: &str,
    line2: &str,
    options: &ParseOptions,
) -> Result<Tle, TleError> {
    let line1 = line1.trim_end_matches(['\r', '\n']);
    let line2 = line2.trim_end_matches(['\r', '\n']);

    if line1.len() < MIN_LINE1_LENGTH {
        return Err(TleError::LineTooShort {
            line: 1,
            len: line1.len(),
            required: MIN_LINE1_LENGTH,
        });
    }
    if line2.len() < MIN_LINE2_LENGTH {
        return Err(TleError::LineTooShort {
            line: 2,
            len: line2.len(),
            required: MIN_LINE2_LENGTH,
        });
    }

    if options.check_line_numbers {
        check_line_number(line1, &LINE1_NUMBER, "1")?;
        check_line_number(line2, &LINE2_NUMBER, "2")?;
    }

    if options.verify_checksums {
        verify_checksum(1, line1)?;
        verify_checksum(2, line2)?;
    } else {
        for (n, line) in [(1, line1), (2, line2)] {
            if let Err(err) = verify_checksum(n, line) {
                debug!(%err, "ignoring checksum");
            }
        }
    }

    // ── Parse Line 1 ──
    let satellite_number = parse_satellite_number(extract(line1, &LINE1_SATELLITE_NUMBER)?)?;

    let classification = extract_optional(line1, &LINE1_CLASSIFICATION)?
        .map(|s| {
            s.chars()
                .next()
                .and_then(|c| Classification::try_from(c).ok())
                .ok_or_else(|| TleError::malformed(LINE1_CLASSIFICATION.name, s))
        })
        .transpose()?;

    let intl_designator = extract_optional(line1, &LINE1_INTL_DESIGNATOR)?.map(str::to_string);

    let epoch_year_2d: u16 = parse_digits(&LINE1_EPOCH_YEAR, extract(line1, &LINE1_EPOCH_YEAR)?)?;
    let epoch_year = options.year_rule.full_year(epoch_year_2d);
    let epoch_day = parse_decimal(LINE1_EPOCH_DAY.name, extract(line1, &LINE1_EPOCH_DAY)?)?;
    let epoch = Epoch::from_year_day(epoch_year, epoch_day)?;

    let first_derivative = extract_optional(line1, &LINE1_FIRST_DERIVATIVE)?
        .map(|s| parse_decimal(LINE1_FIRST_DERIVATIVE.name, s))
        .transpose()?;
    let second_derivative = extract_optional(line1, &LINE1_SECOND_DERIVATIVE)?
        .map(|s| parse_decimal_rhs(LINE1_SECOND_DERIVATIVE.name, s))
        .transpose()?;
    let bstar = parse_decimal_rhs(LINE1_BSTAR.name, extract(line1, &LINE1_BSTAR)?)?;

    let ephemeris_type: Option<u8> = extract_optional(line1, &LINE1_EPHEMERIS_TYPE)?
        .map(|s| parse_digits(&LINE1_EPHEMERIS_TYPE, s))
        .transpose()?;
    let element_set_number: Option<u16> = extract_optional(line1, &LINE1_ELEMENT_SET)?
        .map(|s| parse_digits(&LINE1_ELEMENT_SET, s))
        .transpose()?;

    // ── Parse Line 2 ──
    let satellite_number_2 = parse_satellite_number(extract(line2, &LINE2_SATELLITE_NUMBER)?)?;
    if options.check_satellite_numbers && satellite_number != satellite_number_2 {
        return Err(TleError::SatelliteNumberMismatch(satellite_number, satellite_number_2));
    }

    let inclination = parse_angle(line2, &LINE2_INCLINATION)?;
    let raan = parse_angle(line2, &LINE2_RAAN)?;

    // Eccentricity has implied leading decimal point
    let ecc_digits = extract(line2, &LINE2_ECCENTRICITY)?;
    if !is_digits(ecc_digits) {
        return Err(TleError::malformed(LINE2_ECCENTRICITY.name, ecc_digits));
    }
    let eccentricity = parse_decimal(LINE2_ECCENTRICITY.name, &format!("0.{}", ecc_digits))?;

    let argument_of_perigee = parse_angle(line2, &LINE2_ARG_PERIGEE)?;
    let mean_anomaly = parse_angle(line2, &LINE2_MEAN_ANOMALY)?;
    let mean_motion = parse_decimal(LINE2_MEAN_MOTION.name, extract(line2, &LINE2_MEAN_MOTION)?)?;

    let revolutions: Option<u32> = extract_optional(line2, &LINE2_REVOLUTIONS)?
        .map(|s| parse_digits(&LINE2_REVOLUTIONS, s))
        .transpose()?;

    let builder = TleBuilder::default()
        .satellite_number(satellite_number)
        .epoch(epoch)
        .bstar_drag(bstar)
        .inclination(inclination)
        .raan(raan)
        .eccentricity(eccentricity)
        .argument_of_perigee(argument_of_perigee)
        .mean_anomaly(mean_anomaly)
        .mean_motion(mean_motion);

    let mut tle = builder.build()?;
    tle.set_name(name);
    tle.set_classification(classification);
    tle.set_intl_designator(intl_designator)?;
    tle.set_first_derivative_mean_motion(first_derivative)?;
    tle.set_second_derivative_mean_motion(second_derivative)?;
    tle.set_ephemeris_type(ephemeris_type)?;
    tle.set_element_set_number(element_set_number)?;
    tle.set_revolutions_at_epoch(revolutions)?;

    debug!(
        satellite_number,
        epoch = %tle.epoch(),
        "parsed element set"
    );
    Ok(tle)
}

fn check_line_number(line: &str, field: &Field, expected: &str) -> Result<(), TleError> {
    let found = extract(line, field)?;
    if found != expected {
        return Err(TleError::LineNumber {
            line: field.line,
            found: line.chars().next().unwrap_or(' '),
        });
    }
    Ok(())
}

/// Satellite numbers must be plain digits; Alpha-5 and other schemes are rejected.
fn parse_satellite_number(text: &str) -> Result<u32, TleError> {
    if !is_digits(text) {
        return Err(TleError::InvalidIdentifier(text.to_string()));
    }
    text.parse::<u32>()
        .map_err(|_| TleError::InvalidIdentifier(text.to_string()))
}

fn parse_digits<T: FromStr>(field: &Field, text: &str) -> Result<T, TleError> {
    if !is_digits(text) {
        return Err(TleError::malformed(field.name, text));
    }
    text.parse::<T>()
        .map_err(|_| TleError::malformed(field.name, text))
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_angle(line: &str, field: &Field) -> Result<Angle, TleError> {
    parse_decimal(field.name, extract(line, field)?).map(Angle::from_degrees)
}
