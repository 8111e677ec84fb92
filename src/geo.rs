use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS-84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Euclidean distance in degree space, not a geodesic. The viewport
    /// zoom buckets are defined over this planar value.
    pub fn planar_distance(self, other: LatLng) -> f64 {
        ((self.lat - other.lat).powi(2) + (self.lon - other.lon).powi(2)).sqrt()
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// Initial compass bearing from `from` toward `to` in degrees clockwise
/// from north, in the half-open range `(-180, 180]`.
///
/// Coincident points have no direction; the result is `0`, never NaN.
pub fn initial_bearing(from: LatLng, to: LatLng) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let degrees = y.atan2(x).to_degrees();
    // degree conversion can overshoot ±180 by a rounding step, and atan2
    // lands on the open end of the range when y is a negative zero
    if degrees <= -180.0 {
        degrees + 360.0
    } else if degrees > 180.0 {
        degrees - 360.0
    } else {
        degrees
    }
}
