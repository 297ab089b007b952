//! # tle-codec
//!
//! Lossless parsing and formatting of NORAD Two-Line Element (TLE) sets.
//!
//! A TLE packs one satellite's mean orbital elements into two fixed-width
//! 69-character lines (optionally preceded by a name line). This crate reads
//! those lines into a typed [`Tle`] record and writes a record back to the
//! exact column layout, checksum digit included.
//!
//! ## Architecture
//!
//! - **tle**: the [`Tle`] record, its [`TleBuilder`], and field access by name
//!   ([`TleField`] / [`FieldValue`]).
//! - **parse** / **format**: text → record and record → text.
//! - **fields**: the column map shared by both directions.
//! - **decimal**: the assumed-decimal and decimal-with-exponent encodings.
//! - **checksum**: the modulo-10 line checksum.
//! - **epoch**: UTC epochs and the `YYDDD.DDDDDDDD` representation.
//! - **angle**: angles tagged with their unit.
//! - **config**: [`ParseOptions`] controlling how strict parsing is.
//! - **elements**: the [`ElementSet`] view handed to propagators.

pub mod angle;
pub mod checksum;
pub mod config;
pub mod constants;
pub mod decimal;
pub mod elements;
pub mod epoch;
pub mod error;
pub mod fields;
pub mod format;
pub mod parse;
pub mod tle;

// Re-exports for convenience
pub use angle::{Angle, AngleUnit};
pub use checksum::checksum;
pub use config::{EpochYearRule, ParseOptions};
pub use elements::ElementSet;
pub use epoch::Epoch;
pub use error::{ErrorKind, TleError};
pub use format::{format_3line, format_tle};
pub use parse::{parse_3line, parse_batch, parse_tle};
pub use tle::{Classification, FieldValue, Tle, TleBuilder, TleField};
