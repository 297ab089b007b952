//! Element set epochs.
//!
//! A TLE carries its epoch as a two-digit year plus a fractional day of year.
//! [`Epoch`] holds the absolute UTC instant those two numbers describe, with
//! nanosecond resolution, and derives the year/day view back on demand.
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::NANOS_PER_SEC;
use crate::error::TleError;

/// An absolute UTC instant.
///
/// # Examples
/// ```
/// use tle_codec::epoch::Epoch;
///
/// let t = Epoch::from_year_day(2013, 91.5).unwrap();
/// assert_eq!(t.to_string(), "2013-04-01T12:00:00.000000000Z");
/// assert_eq!(t.epoch_day(), 91.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Epoch {
    utc: DateTime<Utc>,
}

impl Epoch {
    // ── Constructors ──────────────────────────────────────────────

    /// Create an Epoch from a calendar year and a 1-based fractional day of year.
    ///
    /// `instant = start_of(year) + floor(day - 1) days + frac(day) * 86400 s`,
    /// rounded to the nearest nanosecond. The fraction is taken from the
    /// shortest decimal form of `day`, so a wire value such as `264.51782528`
    /// lands exactly on its 864 µs grid.
    pub fn from_year_day(year: i32, day: f64) -> Result<Self, TleError> {
        if !day.is_finite() {
            return Err(out_of_range("epoch_day", day, "finite values"));
        }
        let start = start_of_year(year)?;
        let nanos = day_nanos(day)
            .ok_or_else(|| out_of_range("epoch_day", day, "the representable date range"))?
            - DAY_NANOS;
        let whole = nanos.div_euclid(DAY_NANOS);
        let rest = nanos.rem_euclid(DAY_NANOS);

        i64::try_from(whole)
            .ok()
            .and_then(Duration::try_days)
            .and_then(|offset| start.checked_add_signed(offset))
            .and_then(|t| t.checked_add_signed(Duration::nanoseconds(rest as i64)))
            .map(Self::from)
            .ok_or_else(|| out_of_range("epoch_day", day, "the representable date range"))
    }

    /// Create an Epoch from a UTC year, 1-based day of year, and seconds into that day.
    pub fn from_utc_ordinal(year: i32, day_of_year: u32, seconds: f64) -> Result<Self, TleError> {
        if !seconds.is_finite() {
            return Err(out_of_range("seconds", seconds, "finite values"));
        }
        let date = NaiveDate::from_yo_opt(year, day_of_year).ok_or(TleError::OutOfRange {
            field: "day_of_year",
            value: day_of_year.to_string(),
            allowed: "the days of the given year",
        })?;
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or_else(|| out_of_range("epoch_year", year as f64, "the representable date range"))?;
        let nanos = (seconds * NANOS_PER_SEC).round() as i64;

        midnight
            .checked_add_signed(Duration::nanoseconds(nanos))
            .map(Self::from)
            .ok_or_else(|| out_of_range("seconds", seconds, "the representable date range"))
    }

    /// Create an Epoch from seconds since 1970-01-01T00:00:00 UTC.
    pub fn from_unix_seconds(secs: f64) -> Result<Self, TleError> {
        if !secs.is_finite() {
            return Err(out_of_range("unix_seconds", secs, "finite values"));
        }
        let mut whole = secs.floor() as i64;
        let mut nanos = ((secs - secs.floor()) * NANOS_PER_SEC).round() as u32;
        if nanos >= 1_000_000_000 {
            whole += 1;
            nanos -= 1_000_000_000;
        }
        DateTime::from_timestamp(whole, nanos)
            .map(Self::from)
            .ok_or_else(|| out_of_range("unix_seconds", secs, "the representable date range"))
    }

    // ── Accessors ─────────────────────────────────────────────────

    pub fn as_utc(&self) -> &DateTime<Utc> {
        &self.utc
    }

    /// Calendar year, which is also the TLE epoch year.
    pub fn year(&self) -> i32 {
        self.utc.year()
    }

    /// 1-based day of year.
    pub fn day_of_year(&self) -> u32 {
        self.utc.ordinal()
    }

    pub fn hour(&self) -> u32 {
        self.utc.hour()
    }

    pub fn minute(&self) -> u32 {
        self.utc.minute()
    }

    /// Seconds into the minute, including the fractional part.
    pub fn second(&self) -> f64 {
        self.utc.second() as f64 + self.utc.nanosecond() as f64 / NANOS_PER_SEC
    }

    /// Fractional day of year, `day_of_year + (hour + (minute + second/60)/60)/24`.
    pub fn epoch_day(&self) -> f64 {
        let minutes = self.minute() as f64 + self.second() / 60.0;
        let hours = self.hour() as f64 + minutes / 60.0;
        self.day_of_year() as f64 + hours / 24.0
    }

    /// Seconds since 1970-01-01T00:00:00 UTC (floating point).
    pub fn unix_seconds(&self) -> f64 {
        self.utc.timestamp() as f64 + self.utc.timestamp_subsec_nanos() as f64 / NANOS_PER_SEC
    }

    // ── Arithmetic ────────────────────────────────────────────────

    /// Duration between two epochs in seconds.
    pub fn duration_since(&self, other: &Epoch) -> f64 {
        let delta = self.utc - other.utc;
        match delta.num_nanoseconds() {
            Some(ns) => ns as f64 / NANOS_PER_SEC,
            None => delta.num_milliseconds() as f64 / 1.0e3,
        }
    }

    /// Shift by `seconds` (may be negative), rounded to the nearest nanosecond.
    pub fn add_seconds(&self, seconds: f64) -> Result<Epoch, TleError> {
        if !seconds.is_finite() {
            return Err(out_of_range("seconds", seconds, "finite values"));
        }
        let nanos = (seconds * NANOS_PER_SEC).round() as i64;
        self.utc
            .checked_add_signed(Duration::nanoseconds(nanos))
            .map(Self::from)
            .ok_or_else(|| out_of_range("seconds", seconds, "the representable date range"))
    }
}

impl From<DateTime<Utc>> for Epoch {
    fn from(utc: DateTime<Utc>) -> Self {
        Self { utc }
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.utc.format("%Y-%m-%dT%H:%M:%S%.9fZ"))
    }
}

impl std::ops::Sub for Epoch {
    type Output = f64;
    /// Returns duration in seconds.
    fn sub(self, rhs: Self) -> f64 {
        self.duration_since(&rhs)
    }
}

fn start_of_year(year: i32) -> Result<DateTime<Utc>, TleError> {
    NaiveDate::from_yo_opt(year, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| out_of_range("epoch_year", year as f64, "the representable date range"))
}

/// Nanoseconds in one day.
const DAY_NANOS: i128 = 86_400 * 1_000_000_000;

/// Fractional digits past this many are below a nanosecond.
const MAX_FRACTION_DIGITS: usize = 15;

/// `day` in nanoseconds, read from its shortest decimal representation.
fn day_nanos(day: f64) -> Option<i128> {
    let text = day.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((&text, ""));
    let whole: i128 = whole.parse().ok()?;

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    let fraction_nanos = if fraction.is_empty() {
        0
    } else {
        let digits: i128 = fraction.parse().ok()?;
        let scale = 10i128.pow(fraction.len() as u32);
        (digits * DAY_NANOS + scale / 2) / scale
    };

    let nanos = whole.checked_mul(DAY_NANOS)?.checked_add(fraction_nanos)?;
    Some(if day < 0.0 { -nanos } else { nanos })
}

fn out_of_range(field: &'static str, value: f64, allowed: &'static str) -> TleError {
    TleError::OutOfRange {
        field,
        value: value.to_string(),
        allowed,
    }
}
