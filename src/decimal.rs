//! TLE numeric encodings.
//!
//! Two forms appear on the lines besides plain integers:
//!
//! - **Assumed decimal**: an ordinary fixed-point number whose leading `0` is
//!   dropped, e.g. `-.00002182`.
//! - **Decimal with exponent** (B* and the second derivative of mean motion):
//!   `[sign]DDDDD[sign]E`, read as `sign * 0.DDDDD * 10^(sign E)`, e.g.
//!   `-11606-4` → `-0.11606e-4`.

use crate::error::TleError;

/// Digits in the exponent of the decimal-with-exponent form.
const EXPONENT_DIGITS: usize = 1;

/// Parse an assumed-decimal field such as `-.00002182` or `15.72125391`.
pub fn parse_decimal(field: &'static str, text: &str) -> Result<f64, TleError> {
    let s = text.trim();
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);

    let points = body.bytes().filter(|&b| b == b'.').count();
    let well_formed = points <= 1
        && body.bytes().any(|b| b.is_ascii_digit())
        && body.bytes().all(|b| b.is_ascii_digit() || b == b'.');
    if !well_formed {
        return Err(TleError::malformed(field, text));
    }

    s.parse::<f64>().map_err(|_| TleError::malformed(field, text))
}

/// Parse the decimal-with-exponent form: `" 16538-4"` → 0.16538e-4,
/// `"-11606-4"` → -0.11606e-4.
pub fn parse_decimal_rhs(field: &'static str, text: &str) -> Result<f64, TleError> {
    let s = text.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    // The exponent sign is the last + or - that isn't the leading sign
    let split = rest
        .rfind(['+', '-'])
        .filter(|&pos| pos > 0)
        .ok_or_else(|| TleError::malformed(field, text))?;
    let (mantissa, exponent) = rest.split_at(split);

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(mantissa) || !all_digits(&exponent[1..]) {
        return Err(TleError::malformed(field, text));
    }

    let magnitude = format!("0.{}e{}", mantissa, exponent)
        .parse::<f64>()
        .map_err(|_| TleError::malformed(field, text))?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Format `value` with `places` decimals, right-aligned to `width` characters.
pub fn format_fixed(
    field: &'static str,
    value: f64,
    width: usize,
    places: usize,
) -> Result<String, TleError> {
    let text = fixed_text(field, value, places)?;
    fit(field, value, text, width)
}

/// Like [`format_fixed`], but drops the leading `0` when |value| < 1.
pub fn format_decimal(
    field: &'static str,
    value: f64,
    width: usize,
    places: usize,
) -> Result<String, TleError> {
    let mut text = fixed_text(field, value, places)?;
    if let Some(rest) = text.strip_prefix("-0.") {
        text = format!("-.{}", rest);
    } else if let Some(rest) = text.strip_prefix("0.") {
        text = format!(".{}", rest);
    }
    fit(field, value, text, width)
}

fn fixed_text(field: &'static str, value: f64, places: usize) -> Result<String, TleError> {
    if !value.is_finite() {
        return Err(TleError::InvalidEncoding {
            field,
            value,
            reason: "value is not finite",
        });
    }
    Ok(format!("{:.*}", places, value))
}

fn fit(field: &'static str, value: f64, text: String, width: usize) -> Result<String, TleError> {
    if text.len() > width {
        return Err(TleError::InvalidEncoding {
            field,
            value,
            reason: "integer part does not fit the column",
        });
    }
    Ok(format!("{:>width$}", text, width = width))
}

/// Format `value` in the decimal-with-exponent form, `width` characters wide.
///
/// Zero is written as `" 00000-0"` (for width 8).
pub fn format_decimal_rhs(field: &'static str, value: f64, width: usize) -> Result<String, TleError> {
    if !value.is_finite() || value.abs() >= 1.0 {
        return Err(TleError::InvalidEncoding {
            field,
            value,
            reason: "magnitude must be below 1",
        });
    }

    // sign + mantissa + exponent sign + exponent
    let mantissa_digits = width.saturating_sub(2 + EXPONENT_DIGITS).max(1);
    if value == 0.0 {
        return Ok(format!(
            " {}-{}",
            "0".repeat(mantissa_digits),
            "0".repeat(EXPONENT_DIGITS)
        ));
    }

    let magnitude = value.abs();
    let lower = 10f64.powi(mantissa_digits as i32 - 1);
    let upper = 10f64.powi(mantissa_digits as i32);

    // value = 0.DDDDD * 10^-exponent
    let mut exponent = -(magnitude.log10().floor() as i32 + 1);
    let mut digits = (magnitude * 10f64.powi(exponent + mantissa_digits as i32)).round();
    // log10 can land one decade off near exact powers of ten, and rounding
    // can carry into an extra digit
    if digits >= upper {
        exponent -= 1;
        digits = (magnitude * 10f64.powi(exponent + mantissa_digits as i32)).round();
    } else if digits < lower {
        exponent += 1;
        digits = (magnitude * 10f64.powi(exponent + mantissa_digits as i32)).round();
    }

    if exponent < 0 || digits >= upper {
        return Err(TleError::InvalidEncoding {
            field,
            value,
            reason: "magnitude rounds to 1",
        });
    }
    if exponent >= 10i32.pow(EXPONENT_DIGITS as u32) {
        return Err(TleError::InvalidEncoding {
            field,
            value,
            reason: "magnitude is too small for the exponent column",
        });
    }

    let sign = if value < 0.0 { '-' } else { ' ' };
    Ok(format!(
        "{}{:0md$}-{:0ed$}",
        sign,
        digits as u64,
        exponent,
        md = mantissa_digits,
        ed = EXPONENT_DIGITS
    ))
}
