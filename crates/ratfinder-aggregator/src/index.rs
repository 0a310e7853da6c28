//! Spatial index for radius queries.
//!
//! Points are stored in an R-tree as unit vectors on the sphere, so a
//! great-circle radius becomes a straight-line chord and the antimeridian
//! and poles need no special casing. Every candidate the tree returns is
//! confirmed with the exact haversine distance.

use rstar::primitives::GeomWithData;
use rstar::RTree;

use ratfinder_core::Coordinates;

use crate::distance::{great_circle_km, EARTH_RADIUS_KM};

/// Slack on the chord bound so float error never drops a point the exact
/// check would keep.
const CHORD_SLACK: f64 = 1e-9;

/// A radius query hit: the position the point was inserted at, and its
/// distance from the query centre in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub position: usize,
    pub distance_km: f64,
}

type Entry = GeomWithData<[f64; 3], (usize, Coordinates)>;

#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: RTree<Entry>,
}

impl SpatialIndex {
    /// Builds an index over `points`.
    ///
    /// Positions are the iteration order of `points`. Points with non-finite
    /// or out-of-range coordinates are skipped.
    pub fn build(points: impl IntoIterator<Item = Coordinates>) -> Self {
        let entries = points
            .into_iter()
            .enumerate()
            .filter_map(|(position, point)| {
                if Coordinates::new(point.lat, point.lng).is_err() {
                    tracing::warn!(
                        position,
                        lat = point.lat,
                        lng = point.lng,
                        "skipping site with invalid coordinates"
                    );
                    return None;
                }
                Some(GeomWithData::new(unit_vector(point), (position, point)))
            })
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// All points within `radius_km` of `center`, nearest first.
    ///
    /// Equal distances keep insertion order.
    #[must_use]
    pub fn within_radius(&self, center: Coordinates, radius_km: f64) -> Vec<Hit> {
        if radius_km.is_nan() || radius_km < 0.0 {
            return Vec::new();
        }

        let angle = (radius_km / EARTH_RADIUS_KM).min(std::f64::consts::PI);
        let chord = 2.0 * (angle / 2.0).sin();
        let max_squared = chord * chord * (1.0 + CHORD_SLACK) + CHORD_SLACK;

        let mut hits: Vec<Hit> = self
            .tree
            .locate_within_distance(unit_vector(center), max_squared)
            .filter_map(|entry| {
                let (position, point) = entry.data;
                let distance_km = great_circle_km(center, point);
                (distance_km <= radius_km).then_some(Hit {
                    position,
                    distance_km,
                })
            })
            .collect();

        hits.sort_by_key(|hit| hit.position);
        hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        hits
    }
}

/// Position on the unit sphere.
fn unit_vector(point: Coordinates) -> [f64; 3] {
    let lat = point.lat.to_radians();
    let lng = point.lng.to_radians();
    [lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin()]
}
