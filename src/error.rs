//! Error type shared by the parser, formatter and record builder.

use thiserror::Error;

/// Broad category of a [`TleError`], for callers that branch on failure kind
/// instead of matching individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input text is too short, corrupted, or a numeric sub-field is malformed.
    MalformedInput,
    /// The satellite number column is not all digits.
    InvalidIdentifier,
    /// A mandatory construction parameter was never supplied.
    MissingField,
    /// A value cannot be represented in its TLE column.
    InvalidEncoding,
    /// A by-name field assignment used the wrong value type.
    TypeMismatch,
}

/// TLE codec errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TleError {
    #[error("Line {line} must be at least {required} characters, got {len}")]
    LineTooShort {
        line: u8,
        len: usize,
        required: usize,
    },

    #[error("Line {line} must start with '{line}', got '{found}'")]
    LineNumber { line: u8, found: char },

    #[error("Failed to parse field '{field}' from {value:?}")]
    MalformedField { field: &'static str, value: String },

    #[error("Satellite number {0:?} is not all digits")]
    InvalidIdentifier(String),

    #[error("Satellite numbers don't match between lines: {0} vs {1}")]
    SatelliteNumberMismatch(u32, u32),

    #[error("Checksum failed on line {line}: expected {expected}, computed {computed}")]
    ChecksumMismatch {
        line: u8,
        expected: u8,
        computed: u8,
    },

    #[error("Missing mandatory field '{0}'")]
    MissingField(&'static str),

    #[error("Cannot encode {field} = {value}: {reason}")]
    InvalidEncoding {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Field '{field}' value {value} is outside {allowed}")]
    OutOfRange {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },

    #[error("Field '{field}' expects {expected}, got {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("No TLEs found in input")]
    Empty,
}

impl TleError {
    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TleError::LineTooShort { .. }
            | TleError::LineNumber { .. }
            | TleError::MalformedField { .. }
            | TleError::SatelliteNumberMismatch(..)
            | TleError::ChecksumMismatch { .. }
            | TleError::Empty => ErrorKind::MalformedInput,
            TleError::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            TleError::MissingField(_) => ErrorKind::MissingField,
            TleError::InvalidEncoding { .. } | TleError::OutOfRange { .. } => {
                ErrorKind::InvalidEncoding
            }
            TleError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
        }
    }

    pub(crate) fn malformed(field: &'static str, value: &str) -> Self {
        TleError::MalformedField {
            field,
            value: value.to_string(),
        }
    }
}
