//! Great-circle distance between coordinates
//!
//! Uses the spherical law of cosines and reports statute miles, matching
//! the units the proximity thresholds are configured in.

use crate::domain::types::Coordinate;

const STATUTE_MILES_PER_NAUTICAL_MILE: f64 = 1.15077945;

/// Distance between two coordinates in statute miles.
///
/// The acos argument is clamped to [-1, 1]: for identical or antipodal
/// inputs, rounding can push the dot product just outside the domain and
/// acos would return NaN instead of 0 or pi.
#[inline]
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lon1 = a.longitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let lon2 = b.longitude.to_radians();

    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon1 - lon2).cos();
    let angle = cos_angle.clamp(-1.0, 1.0).acos();

    let nautical_miles = 60.0 * angle.to_degrees();
    STATUTE_MILES_PER_NAUTICAL_MILE * nautical_miles
}
