//! Direction of prayer.

use crate::state::{Coordinates, Location};

/// The Kaaba, Mecca.
pub const KAABA: Coordinates = Coordinates {
    latitude: 21.4225,
    longitude: 39.8262,
};

/// Initial great-circle bearing from `location` to the Kaaba, in degrees
/// clockwise from true north, in `[0, 360)`.
///
/// At the Kaaba itself the bearing is undefined and reported as 0.
pub fn qibla_bearing(location: &Location) -> f64 {
    bearing(location.coordinates(), KAABA)
}

fn bearing(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let delta = (to.longitude - from.longitude).to_radians();
    let y = delta.sin();
    let x = phi1.cos() * phi2.tan() - phi1.sin() * delta.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}
