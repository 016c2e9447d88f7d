//! Core units, constants, and shared primitives for the Daylight Route workspace.

/// Physical and calendar constants.
pub mod constants {
    /// Mean Earth radius used for all great-circle distances (km).
    pub const EARTH_RADIUS_KM: f64 = 6_371.0;
    /// Milliseconds per hour.
    pub const MS_PER_HOUR: f64 = 3_600_000.0;
    /// Milliseconds per minute.
    pub const MS_PER_MINUTE: f64 = 60_000.0;
    /// Apparent solar motion across longitudes (degrees per hour).
    pub const DEGREES_PER_HOUR: f64 = 15.0;
    /// Length of the tropical year approximated by the declination harmonic (days).
    pub const DAYS_PER_YEAR: f64 = 365.0;
    /// Obliquity amplitude of the single-harmonic declination model (degrees).
    pub const AXIAL_TILT_DEG: f64 = 23.44;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{MS_PER_HOUR, MS_PER_MINUTE};

    /// Convert milliseconds to hours.
    #[inline]
    pub fn ms_to_hours(ms: f64) -> f64 {
        ms / MS_PER_HOUR
    }

    /// Convert milliseconds to minutes.
    #[inline]
    pub fn ms_to_minutes(ms: f64) -> f64 {
        ms / MS_PER_MINUTE
    }

    /// Split a millisecond span into whole hours and remaining minutes, rounding to the minute.
    pub fn hours_minutes(ms: f64) -> (i64, i64) {
        let total_minutes = ms_to_minutes(ms.max(0.0)).round() as i64;
        (total_minutes / 60, total_minutes % 60)
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a Cartesian 3D vector.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product `a x b`.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Unit vector in the direction of `v`, or `None` when `v` is (numerically) zero.
    pub fn normalize(v: &Vector3) -> Option<Vector3> {
        let n = norm(v);
        if n <= f64::EPSILON * 1e-3 || !n.is_finite() {
            return None;
        }
        Some(scale(v, 1.0 / n))
    }
}
