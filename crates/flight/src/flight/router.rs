//! Great-circle router: waypoints, arc length, and orientation along the minor arc.

use daylight_core::vector;
use daylight_geo::{GeoPoint, UnitVector3, angular_distance, slerp_points, to_unit_vector};
use tracing::warn;

/// Fraction offset used for the central finite difference in [`GreatCircleRoute::tangent_at`].
const TANGENT_STEP: f64 = 1e-4;

/// Arc lengths this close to 180 deg have no unique minor arc.
const ANTIPODAL_TOLERANCE_DEG: f64 = 1e-9;

/// Minor great-circle arc between two points on a perfect sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreatCircleRoute {
    departure: GeoPoint,
    arrival: GeoPoint,
    arc_angle_deg: f64,
}

/// Orientation of a marker moving along the route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerFrame {
    /// Marker position on the unit sphere.
    pub position: UnitVector3,
    /// Unit direction of travel, tangent to the sphere.
    pub tangent: UnitVector3,
    /// Outward surface normal (equal to the position on a unit sphere).
    pub normal: UnitVector3,
    /// `normal x tangent`, pointing to the left of the direction of travel.
    pub binormal: UnitVector3,
}

impl GreatCircleRoute {
    pub fn new(departure: GeoPoint, arrival: GeoPoint) -> Self {
        let arc_angle_deg = angular_distance(departure, arrival);
        if arc_angle_deg == 0.0 {
            warn!(?departure, "departure and arrival coincide; route collapses to a point");
        } else if 180.0 - arc_angle_deg < ANTIPODAL_TOLERANCE_DEG {
            warn!(?departure, ?arrival, "antipodal endpoints; arc choice is arbitrary");
        }
        Self {
            departure,
            arrival,
            arc_angle_deg,
        }
    }

    pub fn departure(&self) -> GeoPoint {
        self.departure
    }

    pub fn arrival(&self) -> GeoPoint {
        self.arrival
    }

    /// Central angle of the arc in degrees.
    pub fn arc_angle_deg(&self) -> f64 {
        self.arc_angle_deg
    }

    pub fn is_degenerate(&self) -> bool {
        self.arc_angle_deg == 0.0
    }

    /// Point at `fraction` of the way along the arc; fractions outside [0, 1] extrapolate.
    pub fn point_at(&self, fraction: f64) -> GeoPoint {
        slerp_points(self.departure, self.arrival, fraction)
    }

    /// `sample_count + 1` points evenly spaced in fraction, both endpoints included.
    pub fn waypoints(&self, sample_count: usize) -> Vec<GeoPoint> {
        let segments = sample_count.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect()
    }

    /// Unit direction of travel at `fraction`, or `None` when the route has no direction
    /// (coincident endpoints).
    pub fn tangent_at(&self, fraction: f64) -> Option<UnitVector3> {
        if self.is_degenerate() {
            return None;
        }
        let position = to_unit_vector(self.point_at(fraction)).0;
        let behind = to_unit_vector(self.point_at(fraction - TANGENT_STEP)).0;
        let ahead = to_unit_vector(self.point_at(fraction + TANGENT_STEP)).0;
        let delta = vector::sub(&ahead, &behind);
        // Drop the radial component so the tangent lies in the local horizontal plane.
        let radial = vector::scale(&position, vector::dot(&delta, &position));
        UnitVector3::from_vector(vector::sub(&delta, &radial))
    }

    /// Position, tangent, and normals at `fraction`; `None` for a degenerate route.
    pub fn frame_at(&self, fraction: f64) -> Option<MarkerFrame> {
        let tangent = self.tangent_at(fraction)?;
        let position = to_unit_vector(self.point_at(fraction));
        let binormal = UnitVector3::from_vector(vector::cross(&position.0, &tangent.0))?;
        Some(MarkerFrame {
            position,
            tangent,
            normal: position,
            binormal,
        })
    }
}

/// Central angle between departure and arrival in degrees.
pub fn arc_angle(departure: GeoPoint, arrival: GeoPoint) -> f64 {
    angular_distance(departure, arrival)
}

/// Waypoints along the minor arc: `sample_count + 1` points evenly spaced by slerp fraction.
/// A `sample_count` of zero is treated as one segment.
pub fn build_route(departure: GeoPoint, arrival: GeoPoint, sample_count: usize) -> Vec<GeoPoint> {
    GreatCircleRoute::new(departure, arrival).waypoints(sample_count)
}
