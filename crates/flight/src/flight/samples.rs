//! Route sampling, daylight/darkness aggregation, and sunrise/sunset detection.

use chrono::{DateTime, Utc};
use daylight_core::constants::MS_PER_MINUTE;
use daylight_ephem::{NoaaSolarNoon, SolarNoon};
use daylight_geo::GeoPoint;
use tracing::trace;

use super::classify::{SunBand, classify, is_daylight, sun_angle_with};
use super::timing::instant_at_fraction;
use super::{FlightOptions, FlightPlan};

/// One classified point along a flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSample {
    /// Fraction of the route at the sample (segment midpoint).
    pub fraction: f64,
    pub point: GeoPoint,
    pub instant: DateTime<Utc>,
    pub sun_angle_deg: f64,
    pub band: SunBand,
}

impl RouteSample {
    pub fn is_daylight(&self, threshold_deg: f64) -> bool {
        is_daylight(self.sun_angle_deg, threshold_deg)
    }
}

/// Ordered, immutable set of samples computed for one flight plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSampleSet {
    samples: Vec<RouteSample>,
}

impl RouteSampleSet {
    pub fn samples(&self) -> &[RouteSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteSample> {
        self.samples.iter()
    }

    /// Sample whose segment contains `fraction` (clamped to the route).
    pub fn sample_at(&self, fraction: f64) -> Option<&RouteSample> {
        if self.samples.is_empty() {
            return None;
        }
        let n = self.samples.len();
        let idx = ((fraction.clamp(0.0, 1.0) * n as f64).floor() as usize).min(n - 1);
        self.samples.get(idx)
    }
}

/// Daylight/darkness split of a flight. The two parts always sum to the rounded duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaylightSplit {
    pub daylight_ms: i64,
    pub darkness_ms: i64,
}

impl DaylightSplit {
    pub fn total_ms(&self) -> i64 {
        self.daylight_ms + self.darkness_ms
    }

    pub fn daylight_fraction(&self) -> f64 {
        let total = self.total_ms();
        if total == 0 {
            0.0
        } else {
            self.daylight_ms as f64 / total as f64
        }
    }

    /// `(daylight, darkness)` in whole minutes. The total is rounded once and darkness is the
    /// remainder, so the minutes add up to the rounded total.
    pub fn minutes(&self) -> (i64, i64) {
        let total_minutes = (self.total_ms() as f64 / MS_PER_MINUTE).round() as i64;
        let daylight_minutes = (total_minutes as f64 * self.daylight_fraction()).round() as i64;
        (daylight_minutes, total_minutes - daylight_minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    Sunrise,
    Sunset,
}

impl TransitionKind {
    pub fn label(self) -> &'static str {
        match self {
            TransitionKind::Sunrise => "sunrise",
            TransitionKind::Sunset => "sunset",
        }
    }
}

/// Change of daylight state between two consecutive samples, stamped at the later sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub fraction: f64,
    pub instant: DateTime<Utc>,
    pub kind: TransitionKind,
}

/// Sample `plan` at `sample_count` segment midpoints with default options.
pub fn sample_route(plan: &FlightPlan, sample_count: usize) -> RouteSampleSet {
    sample_route_with(plan, sample_count, &FlightOptions::default(), &NoaaSolarNoon)
}

/// Sample `plan` at fractions `(i + 0.5) / sample_count` for `i` in `0..sample_count`.
///
/// Each sample carries its own instant and sun angle, so the sun moves during the flight.
pub fn sample_route_with<N>(
    plan: &FlightPlan,
    sample_count: usize,
    options: &FlightOptions,
    noon: &N,
) -> RouteSampleSet
where
    N: SolarNoon + ?Sized,
{
    let route = plan.route();
    let duration = plan.duration_ms(options.earth_radius_km);
    let samples = (0..sample_count)
        .map(|i| {
            let fraction = (i as f64 + 0.5) / sample_count as f64;
            let point = route.point_at(fraction);
            let instant = instant_at_fraction(plan.departure_instant, duration, fraction);
            let sun_angle_deg = sun_angle_with(point, instant, noon);
            let band = classify(sun_angle_deg, &options.bands);
            trace!(fraction, sun_angle_deg, %band, "route sample");
            RouteSample {
                fraction,
                point,
                instant,
                sun_angle_deg,
                band,
            }
        })
        .collect();
    RouteSampleSet { samples }
}

/// Split `total_duration_ms` by the share of samples in daylight.
///
/// The total is rounded to whole milliseconds once; daylight is the rounded proportional
/// share and darkness takes the remainder.
pub fn aggregate_daylight_darkness(
    samples: &[RouteSample],
    total_duration_ms: f64,
    threshold_deg: f64,
) -> DaylightSplit {
    let total = total_duration_ms.round() as i64;
    if samples.is_empty() {
        return DaylightSplit {
            daylight_ms: 0,
            darkness_ms: total,
        };
    }
    let lit = samples
        .iter()
        .filter(|s| s.is_daylight(threshold_deg))
        .count();
    let daylight_ms = (total as f64 * lit as f64 / samples.len() as f64).round() as i64;
    DaylightSplit {
        daylight_ms,
        darkness_ms: total - daylight_ms,
    }
}

/// Sunrise/sunset transitions between consecutive samples, in route order.
pub fn find_transitions(samples: &[RouteSample], threshold_deg: f64) -> Vec<Transition> {
    samples
        .windows(2)
        .filter_map(|pair| {
            let before = pair[0].is_daylight(threshold_deg);
            let after = pair[1].is_daylight(threshold_deg);
            if before == after {
                return None;
            }
            Some(Transition {
                fraction: pair[1].fraction,
                instant: pair[1].instant,
                kind: if after {
                    TransitionKind::Sunrise
                } else {
                    TransitionKind::Sunset
                },
            })
        })
        .collect()
}
