//! Terminator and twilight rings for a given instant, independent of any flight.
//!
//! Each ring is a small circle of radius `90 - elevation` degrees. Day-side rings are
//! centred on the subsolar point; night-side rings use the same radii around the antisolar
//! point.

use chrono::{DateTime, Utc};
use daylight_ephem::{NoaaSolarNoon, SolarNoon, subsolar_point_with};
use daylight_geo::circle::DEFAULT_RING_POINTS;
use daylight_geo::{GeoPoint, UnitVector3, antipode, small_circle, to_unit_vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    Terminator,
    Civil,
    Nautical,
    Astronomical,
}

impl BoundaryKind {
    pub const ALL: [BoundaryKind; 4] = [
        BoundaryKind::Terminator,
        BoundaryKind::Civil,
        BoundaryKind::Nautical,
        BoundaryKind::Astronomical,
    ];

    /// Sun elevation (degrees) that the ring traces.
    pub fn elevation_deg(self) -> f64 {
        match self {
            BoundaryKind::Terminator => 0.0,
            BoundaryKind::Civil => -6.0,
            BoundaryKind::Nautical => -12.0,
            BoundaryKind::Astronomical => -18.0,
        }
    }

    pub fn angular_radius_deg(self) -> f64 {
        90.0 - self.elevation_deg()
    }

    pub fn label(self) -> &'static str {
        match self {
            BoundaryKind::Terminator => "terminator",
            BoundaryKind::Civil => "civil",
            BoundaryKind::Nautical => "nautical",
            BoundaryKind::Astronomical => "astronomical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    Day,
    Night,
}

impl Hemisphere {
    pub fn label(self) -> &'static str {
        match self {
            Hemisphere::Day => "day",
            Hemisphere::Night => "night",
        }
    }
}

/// One open ring, ordered by bearing around its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCurve {
    pub hemisphere: Hemisphere,
    pub kind: BoundaryKind,
    pub center: GeoPoint,
    pub angular_radius_deg: f64,
    pub points: Vec<UnitVector3>,
}

/// The eight rings for one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct TwilightBoundarySet {
    pub instant: DateTime<Utc>,
    pub subsolar: GeoPoint,
    pub antisolar: GeoPoint,
    pub curves: Vec<BoundaryCurve>,
}

impl TwilightBoundarySet {
    pub fn curve(&self, hemisphere: Hemisphere, kind: BoundaryKind) -> Option<&BoundaryCurve> {
        self.curves
            .iter()
            .find(|c| c.hemisphere == hemisphere && c.kind == kind)
    }

    pub fn day(&self, kind: BoundaryKind) -> Option<&BoundaryCurve> {
        self.curve(Hemisphere::Day, kind)
    }

    pub fn night(&self, kind: BoundaryKind) -> Option<&BoundaryCurve> {
        self.curve(Hemisphere::Night, kind)
    }
}

/// Boundary rings at `instant` with one point per degree of bearing.
pub fn boundaries_for_instant(instant: DateTime<Utc>) -> TwilightBoundarySet {
    boundaries_with(instant, DEFAULT_RING_POINTS, &NoaaSolarNoon)
}

pub fn boundaries_with<N>(instant: DateTime<Utc>, num_points: usize, noon: &N) -> TwilightBoundarySet
where
    N: SolarNoon + ?Sized,
{
    let subsolar = subsolar_point_with(instant, noon);
    let antisolar = antipode(subsolar);
    let curves = [(Hemisphere::Day, subsolar), (Hemisphere::Night, antisolar)]
        .into_iter()
        .flat_map(|(hemisphere, center)| {
            BoundaryKind::ALL.into_iter().map(move |kind| {
                let radius = kind.angular_radius_deg();
                BoundaryCurve {
                    hemisphere,
                    kind,
                    center,
                    angular_radius_deg: radius,
                    points: small_circle(center, radius, num_points)
                        .into_iter()
                        .map(to_unit_vector)
                        .collect(),
                }
            })
        })
        .collect();
    TwilightBoundarySet {
        instant,
        subsolar,
        antisolar,
        curves,
    }
}
