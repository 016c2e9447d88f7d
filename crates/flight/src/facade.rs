//! Re-exported APIs for consumers of the flight crate.

pub use crate::flight::classify::{
    BandTable, ClassifyError, DEFAULT_DAYLIGHT_THRESHOLD_DEG, GradientStops,
    LEGACY_DAYLIGHT_THRESHOLD_DEG, Rgb, SunBand, classify, elevation_from_sun_angle, is_daylight,
    shade, sun_angle_at, sun_angle_with,
};
pub use crate::flight::router::{GreatCircleRoute, MarkerFrame, arc_angle, build_route};
pub use crate::flight::samples::{
    DaylightSplit, RouteSample, RouteSampleSet, Transition, TransitionKind,
    aggregate_daylight_darkness, find_transitions, sample_route, sample_route_with,
};
pub use crate::flight::sweep::{
    DepartureWindow, MAX_SWEEP_DEPARTURES, SweepPoint, brightest, darkest, sweep_departures,
};
pub use crate::flight::timing::{
    distance_km, duration_ms, great_circle_distance_km, instant_at_fraction,
};
pub use crate::flight::{
    FlightError, FlightOptions, FlightPlan, FlightPosition, FlightProfile, FlightSummary,
    plan_flight, plan_flight_with,
};
pub use crate::twilight::{
    BoundaryCurve, BoundaryKind, Hemisphere, TwilightBoundarySet, boundaries_for_instant,
    boundaries_with,
};

pub mod policy {
    use daylight_config::PolicyConfig;

    use crate::flight::classify::{BandTable, GradientStops};
    use crate::flight::{FlightError, FlightOptions};

    /// Convert a loaded `PolicyConfig` into runtime `FlightOptions`.
    pub fn options_from_config(config: &PolicyConfig) -> Result<FlightOptions, FlightError> {
        if config.sample_count == 0 {
            return Err(FlightError::NoSamples);
        }
        if !(config.earth_radius_km.is_finite() && config.earth_radius_km > 0.0) {
            return Err(FlightError::InvalidEarthRadius(config.earth_radius_km));
        }
        if !config.daylight_threshold_deg.is_finite() {
            return Err(FlightError::InvalidThreshold(config.daylight_threshold_deg));
        }
        Ok(FlightOptions {
            sample_count: config.sample_count,
            earth_radius_km: config.earth_radius_km,
            daylight_threshold_deg: config.daylight_threshold_deg,
            bands: BandTable::new(config.bands)?,
            gradient: GradientStops::new(config.gradient)?,
        })
    }
}
