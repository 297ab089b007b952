//! Read-only view of a mean element set, for propagators.
//!
//! A propagator (SGP4 or anything else) initializes from these quantities and
//! never needs the wire representation or the record's internals.

use crate::angle::Angle;
use crate::constants::{MINUTES_PER_DAY, SOLAR_DAY, TAU};
use crate::epoch::Epoch;
use crate::tle::Tle;

/// Mean elements at an epoch, as consumed by an orbit propagator.
pub trait ElementSet {
    fn satellite_number(&self) -> u32;
    fn epoch(&self) -> Epoch;
    /// B* drag term (1/Earth radii).
    fn bstar_drag(&self) -> f64;
    fn inclination(&self) -> Angle;
    fn raan(&self) -> Angle;
    fn eccentricity(&self) -> f64;
    fn argument_of_perigee(&self) -> Angle;
    fn mean_anomaly(&self) -> Angle;
    /// Mean motion (revolutions per day).
    fn mean_motion(&self) -> f64;

    /// Mean motion in radians per minute, the unit SGP4 initializes from.
    fn mean_motion_rad_per_min(&self) -> f64 {
        self.mean_motion() * TAU / MINUTES_PER_DAY
    }

    /// Orbital period (seconds).
    fn period(&self) -> f64 {
        SOLAR_DAY / self.mean_motion()
    }
}

impl ElementSet for Tle {
    fn satellite_number(&self) -> u32 {
        Tle::satellite_number(self)
    }

    fn epoch(&self) -> Epoch {
        Tle::epoch(self)
    }

    fn bstar_drag(&self) -> f64 {
        Tle::bstar_drag(self)
    }

    fn inclination(&self) -> Angle {
        Tle::inclination(self)
    }

    fn raan(&self) -> Angle {
        Tle::raan(self)
    }

    fn eccentricity(&self) -> f64 {
        Tle::eccentricity(self)
    }

    fn argument_of_perigee(&self) -> Angle {
        Tle::argument_of_perigee(self)
    }

    fn mean_anomaly(&self) -> Angle {
        Tle::mean_anomaly(self)
    }

    fn mean_motion(&self) -> f64 {
        Tle::mean_motion(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ISS_LINE1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    fn describe(elements: &dyn ElementSet) -> (u32, f64, f64) {
        (
            elements.satellite_number(),
            elements.inclination().as_radians(),
            elements.period(),
        )
    }

    #[test]
    fn test_tle_as_element_set() {
        let tle = Tle::parse(ISS_LINE1, ISS_LINE2).unwrap();
        let (norad, inc, period) = describe(&tle);
        assert_eq!(norad, 25544);
        assert_relative_eq!(inc, 51.6416_f64.to_radians(), epsilon = 1e-12);
        // ISS period is roughly 91.6 minutes
        assert_relative_eq!(period, 86400.0 / 15.72125391, epsilon = 1e-9);
        assert!(period > 5400.0 && period < 5600.0);
    }

    #[test]
    fn test_mean_motion_rad_per_min() {
        let tle = Tle::parse(ISS_LINE1, ISS_LINE2).unwrap();
        assert_relative_eq!(
            tle.mean_motion_rad_per_min(),
            15.72125391 * std::f64::consts::TAU / 1440.0,
            epsilon = 1e-12
        );
    }
}
