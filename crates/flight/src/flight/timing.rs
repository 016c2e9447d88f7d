//! Flight timing: arc length to distance, distance to duration, progress to wall-clock time.

use chrono::{DateTime, TimeDelta, Utc};
use daylight_core::constants::{EARTH_RADIUS_KM, MS_PER_HOUR};
use daylight_geo::GeoPoint;

use super::router::arc_angle;

/// Great-circle distance over a sphere of radius `earth_radius_km`.
pub fn great_circle_distance_km(departure: GeoPoint, arrival: GeoPoint, earth_radius_km: f64) -> f64 {
    earth_radius_km * arc_angle(departure, arrival).to_radians()
}

/// Great-circle distance over the mean Earth radius (6371 km).
pub fn distance_km(departure: GeoPoint, arrival: GeoPoint) -> f64 {
    great_circle_distance_km(departure, arrival, EARTH_RADIUS_KM)
}

/// Flight duration in milliseconds at a constant cruise speed.
pub fn duration_ms(distance_km: f64, cruise_speed_kmh: f64) -> f64 {
    distance_km / cruise_speed_kmh * MS_PER_HOUR
}

/// Wall-clock instant after `fraction` of the flight, rounded to the millisecond.
///
/// The fraction is not clamped: negative values or values above one extrapolate before
/// departure or past arrival. Offsets beyond the representable range saturate at
/// `DateTime::<Utc>::MIN_UTC` / `MAX_UTC`; a NaN offset yields the departure instant.
pub fn instant_at_fraction(
    departure_instant: DateTime<Utc>,
    duration_ms: f64,
    fraction: f64,
) -> DateTime<Utc> {
    let offset = fraction * duration_ms;
    if offset.is_nan() {
        return departure_instant;
    }
    TimeDelta::try_milliseconds(offset.round() as i64)
        .and_then(|delta| departure_instant.checked_add_signed(delta))
        .unwrap_or(if offset > 0.0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
}
