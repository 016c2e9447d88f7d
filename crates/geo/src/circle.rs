//! Small circles and bearing/distance projection on the sphere.

use crate::{GeoPoint, wrap_longitude};

/// Default resolution for rings: one vertex per degree of bearing.
pub const DEFAULT_RING_POINTS: usize = 360;

/// Point diametrically opposite `point`.
pub fn antipode(point: GeoPoint) -> GeoPoint {
    GeoPoint::new_unchecked(-point.latitude, wrap_longitude(point.longitude + 180.0))
}

/// Project `origin` along an initial `bearing_deg` (clockwise from north) by an angular
/// distance of `distance_deg`.
pub fn destination_point(origin: GeoPoint, bearing_deg: f64, distance_deg: f64) -> GeoPoint {
    let (sin_lat, cos_lat) = origin.latitude.to_radians().sin_cos();
    let (sin_d, cos_d) = distance_deg.to_radians().sin_cos();
    let (sin_b, cos_b) = bearing_deg.to_radians().sin_cos();

    let sin_lat2 = (sin_lat * cos_d + cos_lat * sin_d * cos_b).clamp(-1.0, 1.0);
    let lat2 = sin_lat2.asin();
    let dlon = (sin_b * sin_d * cos_lat).atan2(cos_d - sin_lat * sin_lat2);

    GeoPoint::new_unchecked(
        lat2.to_degrees(),
        wrap_longitude(origin.longitude + dlon.to_degrees()),
    )
}

/// Ring of `num_points` points at a fixed angular radius from `center`, ordered by bearing
/// from 0 deg upwards in steps of `360 / num_points`. The ring is open: the first point is
/// not repeated at the end.
pub fn small_circle(center: GeoPoint, angular_radius_deg: f64, num_points: usize) -> Vec<GeoPoint> {
    if num_points == 0 {
        return Vec::new();
    }
    let step = 360.0 / num_points as f64;
    (0..num_points)
        .map(|i| destination_point(center, i as f64 * step, angular_radius_deg))
        .collect()
}
