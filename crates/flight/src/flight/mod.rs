//! Flight planning orchestrator: route, timing, sampling, and summary for one flight.

pub mod classify;
pub mod router;
pub mod samples;
pub mod sweep;
pub mod timing;

use chrono::{DateTime, Utc};
use daylight_core::constants::EARTH_RADIUS_KM;
use daylight_ephem::{NoaaSolarNoon, SolarNoon};
use daylight_geo::{GeoError, GeoPoint};
use tracing::debug;

use self::classify::{
    BandTable, ClassifyError, DEFAULT_DAYLIGHT_THRESHOLD_DEG, GradientStops, Rgb, SunBand,
    classify, is_daylight, shade, sun_angle_with,
};
use self::router::{GreatCircleRoute, MarkerFrame};
use self::samples::{
    DaylightSplit, RouteSampleSet, Transition, TransitionKind, aggregate_daylight_darkness,
    find_transitions, sample_route_with,
};
use self::timing::{duration_ms, great_circle_distance_km, instant_at_fraction};

/// Top-level flight planning error.
#[derive(Debug, thiserror::Error)]
pub enum FlightError {
    #[error("invalid coordinate: {0}")]
    Coordinate(#[from] GeoError),
    #[error("cruise speed must be positive and finite, got {0} km/h")]
    InvalidCruiseSpeed(f64),
    #[error("earth radius must be positive and finite, got {0} km")]
    InvalidEarthRadius(f64),
    #[error("daylight threshold must be finite, got {0} degrees")]
    InvalidThreshold(f64),
    #[error("sample count must be at least 1")]
    NoSamples,
    #[error("classification policy rejected: {0}")]
    Classify(#[from] ClassifyError),
    #[error("invalid departure window: {0}")]
    InvalidWindow(String),
}

/// Inputs that define one flight. Any change means building a new plan and profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightPlan {
    pub departure: GeoPoint,
    pub arrival: GeoPoint,
    pub departure_instant: DateTime<Utc>,
    pub cruise_speed_kmh: f64,
}

impl FlightPlan {
    pub fn new(
        departure: GeoPoint,
        arrival: GeoPoint,
        departure_instant: DateTime<Utc>,
        cruise_speed_kmh: f64,
    ) -> Result<Self, FlightError> {
        GeoPoint::new(departure.latitude, departure.longitude)?;
        GeoPoint::new(arrival.latitude, arrival.longitude)?;
        if !(cruise_speed_kmh.is_finite() && cruise_speed_kmh > 0.0) {
            return Err(FlightError::InvalidCruiseSpeed(cruise_speed_kmh));
        }
        Ok(Self {
            departure,
            arrival,
            departure_instant,
            cruise_speed_kmh,
        })
    }

    pub fn route(&self) -> GreatCircleRoute {
        GreatCircleRoute::new(self.departure, self.arrival)
    }

    pub fn distance_km(&self, earth_radius_km: f64) -> f64 {
        great_circle_distance_km(self.departure, self.arrival, earth_radius_km)
    }

    pub fn duration_ms(&self, earth_radius_km: f64) -> f64 {
        duration_ms(self.distance_km(earth_radius_km), self.cruise_speed_kmh)
    }
}

/// Sampling density and classification policy for planning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightOptions {
    pub sample_count: usize,
    pub earth_radius_km: f64,
    /// Boolean daylight threshold used for totals and transitions.
    pub daylight_threshold_deg: f64,
    /// Banded classification stored on every sample.
    pub bands: BandTable,
    /// Gradient stops for per-point shading.
    pub gradient: GradientStops,
}

impl Default for FlightOptions {
    fn default() -> Self {
        Self {
            sample_count: 1_000,
            earth_radius_km: EARTH_RADIUS_KM,
            daylight_threshold_deg: DEFAULT_DAYLIGHT_THRESHOLD_DEG,
            bands: BandTable::default(),
            gradient: GradientStops::default(),
        }
    }
}

/// Aggregate results read back by the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightSummary {
    pub distance_km: f64,
    pub duration_ms: f64,
    pub daylight_ms: i64,
    pub darkness_ms: i64,
    pub transitions: Vec<Transition>,
}

impl FlightSummary {
    pub fn split(&self) -> DaylightSplit {
        DaylightSplit {
            daylight_ms: self.daylight_ms,
            darkness_ms: self.darkness_ms,
        }
    }

    pub fn count(&self, kind: TransitionKind) -> usize {
        self.transitions.iter().filter(|t| t.kind == kind).count()
    }
}

/// Snapshot of where the aircraft is at some animation progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightPosition {
    pub fraction: f64,
    pub point: GeoPoint,
    pub instant: DateTime<Utc>,
    pub sun_angle_deg: f64,
    pub band: SunBand,
    pub daylight: bool,
}

/// Everything derived from one [`FlightPlan`]: computed once and handed out immutably.
#[derive(Debug, Clone)]
pub struct FlightProfile {
    pub plan: FlightPlan,
    pub options: FlightOptions,
    pub route: GreatCircleRoute,
    pub samples: RouteSampleSet,
    pub summary: FlightSummary,
}

impl FlightProfile {
    pub fn arrival_instant(&self) -> DateTime<Utc> {
        instant_at_fraction(self.plan.departure_instant, self.summary.duration_ms, 1.0)
    }

    /// Position at animation `progress`, clamped to [0, 1].
    pub fn position_at(&self, progress: f64) -> FlightPosition {
        self.position_at_with(progress, &NoaaSolarNoon)
    }

    pub fn position_at_with<N>(&self, progress: f64, noon: &N) -> FlightPosition
    where
        N: SolarNoon + ?Sized,
    {
        let fraction = progress.clamp(0.0, 1.0);
        let point = self.route.point_at(fraction);
        let instant =
            instant_at_fraction(self.plan.departure_instant, self.summary.duration_ms, fraction);
        let sun_angle_deg = sun_angle_with(point, instant, noon);
        FlightPosition {
            fraction,
            point,
            instant,
            sun_angle_deg,
            band: classify(sun_angle_deg, &self.options.bands),
            daylight: is_daylight(sun_angle_deg, self.options.daylight_threshold_deg),
        }
    }

    /// Marker orientation at animation `progress`, clamped to [0, 1].
    pub fn frame_at(&self, progress: f64) -> Option<MarkerFrame> {
        self.route.frame_at(progress.clamp(0.0, 1.0))
    }

    /// Per-sample colors for drawing the route.
    pub fn sample_colors(&self, day: Rgb, night: Rgb) -> Vec<Rgb> {
        self.samples
            .iter()
            .map(|s| shade(s.sun_angle_deg, &self.options.gradient, day, night))
            .collect()
    }
}

/// Plan a flight with the NOAA solar-noon model.
pub fn plan_flight(plan: FlightPlan, options: &FlightOptions) -> Result<FlightProfile, FlightError> {
    plan_flight_with(plan, options, &NoaaSolarNoon)
}

/// Build route, samples, and summary for `plan` in one pass.
pub fn plan_flight_with<N>(
    plan: FlightPlan,
    options: &FlightOptions,
    noon: &N,
) -> Result<FlightProfile, FlightError>
where
    N: SolarNoon + ?Sized,
{
    if options.sample_count == 0 {
        return Err(FlightError::NoSamples);
    }
    if !(options.earth_radius_km.is_finite() && options.earth_radius_km > 0.0) {
        return Err(FlightError::InvalidEarthRadius(options.earth_radius_km));
    }
    if !options.daylight_threshold_deg.is_finite() {
        return Err(FlightError::InvalidThreshold(options.daylight_threshold_deg));
    }

    let route = plan.route();
    let distance_km = plan.distance_km(options.earth_radius_km);
    let duration_ms = plan.duration_ms(options.earth_radius_km);
    let samples = sample_route_with(&plan, options.sample_count, options, noon);
    let split =
        aggregate_daylight_darkness(samples.samples(), duration_ms, options.daylight_threshold_deg);
    let transitions = find_transitions(samples.samples(), options.daylight_threshold_deg);

    debug!(
        distance_km,
        duration_ms,
        daylight_ms = split.daylight_ms,
        darkness_ms = split.darkness_ms,
        transitions = transitions.len(),
        "planned flight"
    );

    Ok(FlightProfile {
        plan,
        options: *options,
        route,
        samples,
        summary: FlightSummary {
            distance_km,
            duration_ms,
            daylight_ms: split.daylight_ms,
            darkness_ms: split.darkness_ms,
            transitions,
        },
    })
}
