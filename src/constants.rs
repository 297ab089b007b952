//! Wire-format and unit constants.

/// Length of a complete TLE line, checksum included.
pub const LINE_LENGTH: usize = 69;

/// Shortest line 1 the parser accepts (through the B* column).
pub const MIN_LINE1_LENGTH: usize = 62;

/// Shortest line 2 the parser accepts.
pub const MIN_LINE2_LENGTH: usize = 69;

/// Seconds per solar day
pub const SOLAR_DAY: f64 = 86400.0;

/// Minutes per solar day
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Nanoseconds per second
pub const NANOS_PER_SEC: f64 = 1.0e9;

/// Two pi
pub const TAU: f64 = std::f64::consts::TAU;

/// Degrees to radians
pub const DEG2RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees
pub const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;
