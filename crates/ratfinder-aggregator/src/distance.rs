//! Great-circle distance on the mean-radius sphere.

use geo::{point, HaversineDistance};

use ratfinder_core::Coordinates;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Kilometres spanned by one degree of latitude on the mean-radius sphere.
pub const KM_PER_LAT_DEGREE: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

/// Haversine distance between two points, in kilometres.
///
/// Symmetric in its arguments. Callers are expected to pass validated
/// coordinates; non-finite input yields a non-finite result.
#[must_use]
pub fn great_circle_km(from: Coordinates, to: Coordinates) -> f64 {
    let a = point!(x: from.lng, y: from.lat);
    let b = point!(x: to.lng, y: to.lat);
    a.haversine_distance(&b) / 1000.0
}
