//! Spherical geometry on a perfect unit sphere.
//!
//! Every crate in the workspace maps geographic coordinates to Cartesian space through
//! [`to_unit_vector`] and back through [`to_geo_point`]. The mapping is fixed:
//!
//! ```text
//! phi   = (90 - lat) * pi / 180
//! theta = (lon + 180) * pi / 180
//! x = -sin(phi) * cos(theta),  y = cos(phi),  z = sin(phi) * sin(theta)
//! ```
//!
//! so `+y` is the north pole and the prime meridian on the equator sits at `+x`.

use daylight_core::vector::{self, Vector3};
use thiserror::Error;

pub mod circle;
pub mod polygon;

pub use circle::{antipode, destination_point, small_circle};

/// Errors raised when constructing geometric values from raw input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoError {
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    #[error("polygon needs at least three vertices, got {0}")]
    DegeneratePolygon(usize),
}

/// Geographic point in degrees, latitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a validated point; latitude must lie in [-90, 90] and longitude in [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(GeoError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build a point without range checks, for inputs already known to be in range.
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn to_unit_vector(self) -> UnitVector3 {
        to_unit_vector(self)
    }
}

/// Cartesian point on the unit sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitVector3(pub Vector3);

impl UnitVector3 {
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn z(&self) -> f64 {
        self.0[2]
    }

    pub fn as_array(&self) -> Vector3 {
        self.0
    }

    /// Renormalize an arbitrary vector onto the sphere; `None` for the zero vector.
    pub fn from_vector(v: Vector3) -> Option<Self> {
        vector::normalize(&v).map(Self)
    }

    pub fn dot(&self, other: &UnitVector3) -> f64 {
        vector::dot(&self.0, &other.0)
    }

    pub fn to_geo_point(self) -> GeoPoint {
        to_geo_point(self)
    }
}

/// Map a geographic point onto the unit sphere.
pub fn to_unit_vector(point: GeoPoint) -> UnitVector3 {
    let phi = (90.0 - point.latitude).to_radians();
    let theta = (point.longitude + 180.0).to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    UnitVector3([-sin_phi * theta.cos(), cos_phi, sin_phi * theta.sin()])
}

/// Inverse of [`to_unit_vector`]. Longitude is reported in [-180, 180]; at the north pole,
/// where the mapping collapses every meridian onto one vector, it is 0.
pub fn to_geo_point(v: UnitVector3) -> GeoPoint {
    let [x, y, z] = v.0;
    let horizontal = x.hypot(z);
    // atan2 keeps full precision near the poles, where acos(y) would not.
    let latitude = y.atan2(horizontal).to_degrees();
    if horizontal == 0.0 {
        return GeoPoint::new_unchecked(latitude, 0.0);
    }
    let theta = z.atan2(-x).to_degrees();
    let mut longitude = theta - 180.0;
    if longitude < -180.0 {
        longitude += 360.0;
    }
    GeoPoint::new_unchecked(latitude, longitude)
}

/// Great-circle separation in degrees, in [0, 180], by the spherical law of cosines.
pub fn angular_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }
    let (sin_a, cos_a) = a.latitude.to_radians().sin_cos();
    let (sin_b, cos_b) = b.latitude.to_radians().sin_cos();
    let delta_lon = (b.longitude - a.longitude).abs().to_radians();
    let cos_d = sin_a * sin_b + cos_a * cos_b * delta_lon.cos();
    cos_d.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Spherical linear interpolation along the minor arc from `a` to `b`.
///
/// Coincident endpoints return `a` for every fraction. For antipodal endpoints the arc
/// is taken through the plane containing the polar axis (or the x axis when `a` is a pole),
/// so the result is deterministic. Fractions outside [0, 1] extrapolate along the circle.
pub fn slerp_points(a: GeoPoint, b: GeoPoint, fraction: f64) -> GeoPoint {
    let omega_deg = angular_distance(a, b);
    if omega_deg == 0.0 {
        return a;
    }
    if fraction == 0.0 {
        return a;
    }
    if fraction == 1.0 {
        return b;
    }
    let va = to_unit_vector(a).0;
    let vb = to_unit_vector(b).0;
    let omega = omega_deg.to_radians();
    let sin_omega = omega.sin();

    let blended = if sin_omega.abs() < 1e-12 {
        let perpendicular = antipodal_direction(&va);
        let t = fraction * omega;
        vector::add(
            &vector::scale(&va, t.cos()),
            &vector::scale(&perpendicular, t.sin()),
        )
    } else {
        let wa = ((1.0 - fraction) * omega).sin() / sin_omega;
        let wb = (fraction * omega).sin() / sin_omega;
        vector::add(&vector::scale(&va, wa), &vector::scale(&vb, wb))
    };

    match UnitVector3::from_vector(blended) {
        Some(v) => to_geo_point(v),
        None => a,
    }
}

/// Unit vector perpendicular to `from`, used to pick one great circle among the
/// infinitely many joining antipodes.
fn antipodal_direction(from: &Vector3) -> Vector3 {
    let pole = [0.0, 1.0, 0.0];
    let axis = match vector::normalize(&vector::cross(from, &pole)) {
        Some(axis) => axis,
        None => [1.0, 0.0, 0.0],
    };
    let direction = vector::cross(&axis, from);
    vector::normalize(&direction).unwrap_or([1.0, 0.0, 0.0])
}

/// Normalize a longitude into [-180, 180).
pub fn wrap_longitude(longitude: f64) -> f64 {
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped.is_finite() { wrapped } else { longitude }
}
