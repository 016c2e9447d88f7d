//! Sun-relative classification of surface points.
//!
//! Two independent policies coexist and callers pick one per use:
//! - a boolean daylight test against a single threshold (used for aggregate timing), and
//! - a banded classification through a [`BandTable`] (used for per-point display).
//!
//! They are deliberately not reconciled; a 90 deg threshold and a table starting at 85 deg
//! will disagree on points between the two.

use std::fmt;

use chrono::{DateTime, Utc};
use daylight_ephem::{NoaaSolarNoon, SolarNoon, subsolar_point_with};
use daylight_geo::{GeoPoint, angular_distance};
use thiserror::Error;

/// Boolean daylight cut-off: the geometric horizon.
pub const DEFAULT_DAYLIGHT_THRESHOLD_DEG: f64 = 90.0;
/// Wider cut-off that counts civil-ish twilight as daylight.
pub const LEGACY_DAYLIGHT_THRESHOLD_DEG: f64 = 95.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("band limits must be finite and strictly increasing, got {0:?}")]
    NonMonotonicBands(Vec<f64>),
}

/// Illumination band, ordered from brightest to darkest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SunBand {
    Day,
    CivilTwilight,
    NauticalTwilight,
    AstronomicalTwilight,
    Night,
}

impl SunBand {
    pub const ALL: [SunBand; 5] = [
        SunBand::Day,
        SunBand::CivilTwilight,
        SunBand::NauticalTwilight,
        SunBand::AstronomicalTwilight,
        SunBand::Night,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SunBand::Day => "day",
            SunBand::CivilTwilight => "civil",
            SunBand::NauticalTwilight => "nautical",
            SunBand::AstronomicalTwilight => "astronomical",
            SunBand::Night => "night",
        }
    }

    pub fn is_twilight(self) -> bool {
        matches!(
            self,
            SunBand::CivilTwilight | SunBand::NauticalTwilight | SunBand::AstronomicalTwilight
        )
    }
}

impl fmt::Display for SunBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper sun-angle limits (degrees) of Day, Civil, Nautical, and Astronomical bands;
/// anything at or beyond the last limit is Night.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandTable {
    limits: [f64; 4],
}

impl BandTable {
    /// Display banding: day below 85 deg, night from 100 deg.
    pub const COLORING: BandTable = BandTable {
        limits: [85.0, 90.0, 95.0, 100.0],
    };

    /// Conventional twilight definitions: sun elevation 0, -6, -12, -18 deg.
    pub const SOLAR_ELEVATION: BandTable = BandTable {
        limits: [90.0, 96.0, 102.0, 108.0],
    };

    pub fn new(limits: [f64; 4]) -> Result<Self, ClassifyError> {
        if !strictly_increasing(&limits) {
            return Err(ClassifyError::NonMonotonicBands(limits.to_vec()));
        }
        Ok(Self { limits })
    }

    pub fn limits(&self) -> [f64; 4] {
        self.limits
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self::COLORING
    }
}

/// Color-gradient stops: darkness rises linearly through five equal steps between the
/// first and last stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStops {
    stops: [f64; 6],
}

impl GradientStops {
    pub const FINE: GradientStops = GradientStops {
        stops: [85.0, 88.0, 91.0, 94.0, 97.0, 100.0],
    };

    pub fn new(stops: [f64; 6]) -> Result<Self, ClassifyError> {
        if !strictly_increasing(&stops) {
            return Err(ClassifyError::NonMonotonicBands(stops.to_vec()));
        }
        Ok(Self { stops })
    }

    pub fn stops(&self) -> [f64; 6] {
        self.stops
    }

    /// Darkness level in [0, 1]: 0 at or below the first stop, 1 at or beyond the last.
    pub fn level(&self, sun_angle_deg: f64) -> f64 {
        let s = &self.stops;
        if sun_angle_deg <= s[0] {
            return 0.0;
        }
        if sun_angle_deg >= s[5] {
            return 1.0;
        }
        let segments = (s.len() - 1) as f64;
        for k in 0..s.len() - 1 {
            if sun_angle_deg < s[k + 1] {
                let within = (sun_angle_deg - s[k]) / (s[k + 1] - s[k]);
                return (k as f64 + within) / segments;
            }
        }
        1.0
    }
}

impl Default for GradientStops {
    fn default() -> Self {
        Self::FINE
    }
}

/// Linear RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const DAYLIGHT: Rgb = Rgb {
        r: 1.0,
        g: 0.82,
        b: 0.35,
    };
    pub const NIGHT: Rgb = Rgb {
        r: 0.08,
        g: 0.12,
        b: 0.35,
    };

    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0) as f32;
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn to_u8(self) -> [u8; 3] {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [c(self.r), c(self.g), c(self.b)]
    }
}

/// Per-point route color: blend from `day` to `night` by the gradient darkness level.
pub fn shade(sun_angle_deg: f64, stops: &GradientStops, day: Rgb, night: Rgb) -> Rgb {
    day.lerp(night, stops.level(sun_angle_deg))
}

/// Angular distance from the subsolar point at `instant` to `point`, in [0, 180].
pub fn sun_angle_at(point: GeoPoint, instant: DateTime<Utc>) -> f64 {
    sun_angle_with(point, instant, &NoaaSolarNoon)
}

/// [`sun_angle_at`] with an explicit solar-noon provider.
pub fn sun_angle_with<N>(point: GeoPoint, instant: DateTime<Utc>, noon: &N) -> f64
where
    N: SolarNoon + ?Sized,
{
    angular_distance(subsolar_point_with(instant, noon), point)
}

/// Sun elevation above the horizon implied by a sun angle.
pub fn elevation_from_sun_angle(sun_angle_deg: f64) -> f64 {
    90.0 - sun_angle_deg
}

/// Boolean daylight test: strictly below the threshold counts as daylight.
pub fn is_daylight(sun_angle_deg: f64, threshold_deg: f64) -> bool {
    sun_angle_deg < threshold_deg
}

/// Band for a sun angle; limits are exclusive upper bounds.
pub fn classify(sun_angle_deg: f64, table: &BandTable) -> SunBand {
    let [day, civil, nautical, astronomical] = table.limits;
    if sun_angle_deg < day {
        SunBand::Day
    } else if sun_angle_deg < civil {
        SunBand::CivilTwilight
    } else if sun_angle_deg < nautical {
        SunBand::NauticalTwilight
    } else if sun_angle_deg < astronomical {
        SunBand::AstronomicalTwilight
    } else {
        SunBand::Night
    }
}

fn strictly_increasing(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite()) && values.windows(2).all(|w| w[0] < w[1])
}
