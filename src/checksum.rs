//! TLE line checksums.
//!
//! The checksum is the sum of all digits on the line, plus one for every
//! minus sign, modulo 10. Letters, blanks, `+` and `.` count as zero.

use crate::constants::LINE_LENGTH;
use crate::error::TleError;

/// Compute TLE checksum (mod-10 of sum of digits, '-' counts as 1).
///
/// `line` should exclude the checksum column itself.
pub fn checksum(line: &str) -> u8 {
    let sum: u32 = line
        .bytes()
        .map(|b| match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

/// The checksum rendered as the character that ends a line.
pub fn checksum_char(line: &str) -> char {
    char::from(b'0' + checksum(line))
}

/// Check column 69 of a complete line against the checksum of columns 1–68.
pub fn verify_checksum(line_number: u8, line: &str) -> Result<(), TleError> {
    let body_len = LINE_LENGTH - 1;
    if line.len() < LINE_LENGTH {
        return Err(TleError::LineTooShort {
            line: line_number,
            len: line.len(),
            required: LINE_LENGTH,
        });
    }

    let expected = match line.as_bytes()[body_len] {
        b @ b'0'..=b'9' => b - b'0',
        _ => {
            let column = line.get(body_len..).unwrap_or(line);
            return Err(TleError::malformed("checksum", column));
        }
    };
    let computed = line
        .get(..body_len)
        .map(checksum)
        .ok_or_else(|| TleError::malformed("checksum", line))?;

    if expected != computed {
        return Err(TleError::ChecksumMismatch {
            line: line_number,
            expected,
            computed,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const ISS_LINE1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn test_checksum() {
        assert_eq!(checksum(&ISS_LINE1[..68]), 7);
        assert_eq!(checksum(&ISS_LINE2[..68]), 7);
    }

    #[test]
    fn test_minus_counts_as_one() {
        // 9 + 9 + 8 = 26, plus one minus sign = 27
        assert_eq!(checksum("9 9-8"), 7);
        assert_eq!(checksum_char("9 9-8"), '7');
        // letters, plus signs and points are ignored
        assert_eq!(checksum("A+.9 9-8"), 7);
    }

    #[test]
    fn test_verify() {
        verify_checksum(1, ISS_LINE1).unwrap();
        verify_checksum(2, ISS_LINE2).unwrap();

        let corrupted = ISS_LINE1.replace("25544U", "25545U");
        let err = verify_checksum(1, &corrupted).unwrap_err();
        assert_eq!(
            err,
            TleError::ChecksumMismatch {
                line: 1,
                expected: 7,
                computed: 8
            }
        );
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_verify_short_line() {
        let err = verify_checksum(2, &ISS_LINE2[..60]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }
}
