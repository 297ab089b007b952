//! [`Tle`] records → Two-Line Element text.
//!
//! ```text
//! 1 NNNNNC IIIIIIII YYDDD.DDDDDDDD ±.DDDDDDDD ±DDDDD±D ±DDDDD±D E EEEEC
//! 2 NNNNN III.IIII RRR.RRRR EEEEEEE PPP.PPPP MMM.MMMM NN.NNNNNNNNRRRRRC
//! ```
//!
//! Unset text fields (classification, designator) are written as blanks;
//! unset numeric fields are written as zero.

use chrono::{Datelike, Duration, DurationRound, Timelike};
use tracing::debug;

use crate::checksum::checksum_char;
use crate::constants::LINE_LENGTH;
use crate::epoch::Epoch;
use crate::decimal::{format_decimal, format_decimal_rhs, format_fixed};
use crate::error::TleError;
use crate::fields::*;
use crate::tle::Tle;

/// Eccentricity is written as a 7-digit fraction.
const ECCENTRICITY_SCALE: f64 = 1.0e7;

/// One unit in the last place of the epoch day, 1e-8 day.
const EPOCH_DAY_STEP_MICROS: i64 = 864;

/// Render both lines of `tle`, each ending in its checksum digit.
pub fn format_tle(tle: &Tle) -> Result<(String, String), TleError> {
    let line1 = format_line1(tle)?;
    let line2 = format_line2(tle)?;
    debug!(
        satellite_number = tle.satellite_number(),
        "formatted element set"
    );
    Ok((line1, line2))
}

/// Render the name line followed by both element lines.
pub fn format_3line(tle: &Tle) -> Result<(String, String, String), TleError> {
    let (line1, line2) = format_tle(tle)?;
    Ok((tle.name().into_owned(), line1, line2))
}

/// Render line 1, checksum included.
pub fn format_line1(tle: &Tle) -> Result<String, TleError> {
    let classification = tle.classification().map_or(' ', |c| c.as_char());
    let designator = tle.intl_designator().unwrap_or("");
    let (year, epoch_day) = epoch_columns(&tle.epoch())?;

    let first_derivative = format_decimal(
        LINE1_FIRST_DERIVATIVE.name,
        tle.first_derivative_mean_motion().unwrap_or(0.0),
        LINE1_FIRST_DERIVATIVE.width,
        8,
    )?;
    let second_derivative = format_decimal_rhs(
        LINE1_SECOND_DERIVATIVE.name,
        tle.second_derivative_mean_motion().unwrap_or(0.0),
        LINE1_SECOND_DERIVATIVE.width,
    )?;
    let bstar = format_decimal_rhs(LINE1_BSTAR.name, tle.bstar_drag(), LINE1_BSTAR.width)?;

    let line = format!(
        "1 {:05}{} {:<8} {:02}{} {} {} {} {} {:>4}",
        tle.satellite_number(),
        classification,
        designator,
        year.rem_euclid(100),
        epoch_day,
        first_derivative,
        second_derivative,
        bstar,
        tle.ephemeris_type().unwrap_or(0),
        tle.element_set_number().unwrap_or(0),
    );
    finish(1, line)
}

/// Render line 2, checksum included.
pub fn format_line2(tle: &Tle) -> Result<String, TleError> {
    let eccentricity = tle.eccentricity();
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(TleError::InvalidEncoding {
            field: LINE2_ECCENTRICITY.name,
            value: eccentricity,
            reason: "must lie in [0, 1)",
        });
    }
    let ecc_digits = (eccentricity * ECCENTRICITY_SCALE).round();
    if ecc_digits >= ECCENTRICITY_SCALE {
        return Err(TleError::InvalidEncoding {
            field: LINE2_ECCENTRICITY.name,
            value: eccentricity,
            reason: "rounds to 1 at seven digits",
        });
    }

    let angle = |field: &Field, degrees: f64| format_fixed(field.name, degrees, field.width, 4);
    let inclination = angle(&LINE2_INCLINATION, tle.inclination().as_degrees())?;
    let raan = angle(&LINE2_RAAN, tle.raan().as_degrees())?;
    let arg_perigee = angle(&LINE2_ARG_PERIGEE, tle.argument_of_perigee().as_degrees())?;
    let mean_anomaly = angle(&LINE2_MEAN_ANOMALY, tle.mean_anomaly().as_degrees())?;
    let mean_motion = format_fixed(
        LINE2_MEAN_MOTION.name,
        tle.mean_motion(),
        LINE2_MEAN_MOTION.width,
        8,
    )?;

    let line = format!(
        "2 {:05} {} {} {:07} {} {} {}{:>5}",
        tle.satellite_number(),
        inclination,
        raan,
        ecc_digits as u32,
        arg_perigee,
        mean_anomaly,
        mean_motion,
        tle.revolutions_at_epoch().unwrap_or(0),
    );
    finish(2, line)
}

/// The epoch year and the `DDD.DDDDDDDD` day column.
///
/// The instant is rounded to the column's resolution before it is split, so a
/// time just before midnight on Dec 31 carries into day 001 of the next year.
fn epoch_columns(epoch: &Epoch) -> Result<(i32, String), TleError> {
    let utc = epoch
        .as_utc()
        .duration_round(Duration::microseconds(EPOCH_DAY_STEP_MICROS))
        .map_err(|_| TleError::InvalidEncoding {
            field: LINE1_EPOCH_DAY.name,
            value: epoch.epoch_day(),
            reason: "epoch cannot be rounded to the column resolution",
        })?;
    let nanos_of_day =
        utc.num_seconds_from_midnight() as i64 * 1_000_000_000 + utc.nanosecond() as i64;
    let steps = nanos_of_day / (EPOCH_DAY_STEP_MICROS * 1_000);
    Ok((utc.year(), format!("{:03}.{:08}", utc.ordinal(), steps)))
}

/// Append the checksum, after making sure every column landed where it should.
fn finish(line_number: u8, mut line: String) -> Result<String, TleError> {
    if line.len() != LINE_LENGTH - 1 {
        return Err(TleError::OutOfRange {
            field: "line",
            value: format!("{} ({} characters on line {})", line, line.len(), line_number),
            allowed: "68 characters before the checksum",
        });
    }
    let checksum = checksum_char(&line);
    line.push(checksum);
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Angle;
    use crate::epoch::Epoch;
    use crate::error::ErrorKind;
    use crate::parse::parse_tle;
    use crate::tle::{Classification, TleBuilder};

    const ISS_LINE1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    fn builder() -> TleBuilder {
        Tle::builder()
            .satellite_number(5)
            .epoch(Epoch::from_year_day(2024, 1.5).unwrap())
            .bstar_drag(0.0)
            .inclination(Angle::from_degrees(34.25))
            .raan(Angle::from_degrees(0.5))
            .eccentricity(0.1859667)
            .argument_of_perigee(Angle::from_degrees(331.7664))
            .mean_anomaly(Angle::from_degrees(19.3264))
            .mean_motion(10.82419157)
    }

    #[test]
    fn test_iss_round_trip() {
        let tle = parse_tle(ISS_LINE1, ISS_LINE2).unwrap();
        let (line1, line2) = format_tle(&tle).unwrap();
        assert_eq!(line1, ISS_LINE1);
        assert_eq!(line2, ISS_LINE2);
    }

    #[test]
    fn test_round_trip_other_sets() {
        let sets = [
            (
                "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753",
                "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667",
            ),
            (
                "1 28129U 03058A   06175.57071136 -.00000104  00000-0  10000-3 0   459",
                "2 28129  54.7298 115.2767 0048391 328.0272  31.8158  2.00565356 19397",
            ),
        ];
        for (l1, l2) in sets {
            let tle = parse_tle(l1, l2).unwrap();
            let (out1, out2) = format_tle(&tle).unwrap();
            assert_eq!(out1, l1);
            assert_eq!(out2, l2);
        }
    }

    #[test]
    fn test_built_record_defaults() {
        let tle = builder().build().unwrap();
        let (line1, line2) = format_tle(&tle).unwrap();
        assert_eq!(line1.len(), 69);
        assert_eq!(line2.len(), 69);
        assert_eq!(
            line1,
            "1 00005           24001.50000000  .00000000  00000-0  00000-0 0    00"
        );
        assert_eq!(&line2[17..25], "  0.5000");
        assert_eq!(&line2[26..33], "1859667");
    }

    #[test]
    fn test_classification_and_designator() {
        let tle = builder()
            .classification(Classification::Secret)
            .intl_designator("58002B")
            .build()
            .unwrap();
        let (line1, _) = format_tle(&tle).unwrap();
        assert_eq!(&line1[..18], "1 00005S 58002B   ");
    }

    #[test]
    fn test_eccentricity_limits() {
        let tle = builder().eccentricity(1.0).build().unwrap();
        let err = format_tle(&tle).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);

        let tle = builder().eccentricity(-0.1).build().unwrap();
        assert_eq!(format_tle(&tle).unwrap_err().kind(), ErrorKind::InvalidEncoding);

        let tle = builder().eccentricity(0.99999999).build().unwrap();
        assert_eq!(format_tle(&tle).unwrap_err().kind(), ErrorKind::InvalidEncoding);
    }

    #[test]
    fn test_bstar_limits() {
        let tle = builder().bstar_drag(1.5).build().unwrap();
        let err = format_tle(&tle).unwrap_err();
        assert_eq!(
            err,
            TleError::InvalidEncoding {
                field: "bstar_drag",
                value: 1.5,
                reason: "magnitude must be below 1",
            }
        );
        let tle = builder().second_derivative_mean_motion(-1.0).build().unwrap();
        assert_eq!(format_tle(&tle).unwrap_err().kind(), ErrorKind::InvalidEncoding);
    }

    #[test]
    fn test_radians_are_written_in_degrees() {
        let tle = builder()
            .inclination(Angle::from_radians(std::f64::consts::FRAC_PI_2))
            .build()
            .unwrap();
        let (_, line2) = format_tle(&tle).unwrap();
        assert_eq!(&line2[8..16], " 90.0000");
    }

    #[test]
    fn test_epoch_day_carries_into_next_year() {
        let epoch = Epoch::from_utc_ordinal(2023, 365, 86_399.999_913_6).unwrap();
        let tle = builder().epoch(epoch).build().unwrap();
        let (line1, _) = format_tle(&tle).unwrap();
        assert_eq!(&line1[18..32], "24001.00000000");

        let epoch = Epoch::from_utc_ordinal(2023, 365, 86_399.9995).unwrap();
        let tle = builder().epoch(epoch).build().unwrap();
        let (line1, _) = format_tle(&tle).unwrap();
        assert_eq!(&line1[18..32], "23365.99999999");
    }

    #[test]
    fn test_format_3line() {
        let tle = builder().name("VANGUARD 1").build().unwrap();
        let (name, line1, _) = format_3line(&tle).unwrap();
        assert_eq!(name, "VANGUARD 1");
        assert!(line1.starts_with("1 00005"));
    }
}
