//! Departure sweep: how the daylight share of one route changes with departure time.

use chrono::{DateTime, TimeDelta, Utc};
use daylight_geo::GeoPoint;
use tracing::debug;

use super::samples::TransitionKind;
use super::{FlightError, FlightOptions, FlightPlan, plan_flight};

/// Upper bound on departures evaluated by a single sweep.
pub const MAX_SWEEP_DEPARTURES: usize = 20_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepartureWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step: TimeDelta,
}

impl DepartureWindow {
    /// Departure instants from `start` to `end` inclusive.
    pub fn instants(&self) -> Result<Vec<DateTime<Utc>>, FlightError> {
        if self.step < TimeDelta::milliseconds(1) {
            return Err(FlightError::InvalidWindow(format!(
                "step must be at least 1 ms, got {} us",
                self.step.num_microseconds().unwrap_or(i64::MIN)
            )));
        }
        if self.end < self.start {
            return Err(FlightError::InvalidWindow(format!(
                "window ends ({}) before it starts ({})",
                self.end, self.start
            )));
        }
        let span_ms = (self.end - self.start).num_milliseconds();
        let step_ms = self.step.num_milliseconds();
        let count = (span_ms / step_ms) as usize + 1;
        if count > MAX_SWEEP_DEPARTURES {
            return Err(FlightError::InvalidWindow(format!(
                "{count} departures exceed the limit of {MAX_SWEEP_DEPARTURES}"
            )));
        }
        Ok((0..count)
            .map(|i| self.start + TimeDelta::milliseconds(step_ms * i as i64))
            .collect())
    }
}

/// Daylight outcome of one candidate departure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub departure_instant: DateTime<Utc>,
    pub arrival_instant: DateTime<Utc>,
    pub daylight_ms: i64,
    pub darkness_ms: i64,
    pub daylight_fraction: f64,
    pub sunrises: usize,
    pub sunsets: usize,
}

/// Plan the same route for every departure in `window`.
pub fn sweep_departures(
    departure: GeoPoint,
    arrival: GeoPoint,
    cruise_speed_kmh: f64,
    window: &DepartureWindow,
    options: &FlightOptions,
) -> Result<Vec<SweepPoint>, FlightError> {
    let instants = window.instants()?;
    debug!(departures = instants.len(), "sweeping departure window");
    instants
        .into_iter()
        .map(|instant| {
            let plan = FlightPlan::new(departure, arrival, instant, cruise_speed_kmh)?;
            let profile = plan_flight(plan, options)?;
            let split = profile.summary.split();
            Ok(SweepPoint {
                departure_instant: instant,
                arrival_instant: profile.arrival_instant(),
                daylight_ms: split.daylight_ms,
                darkness_ms: split.darkness_ms,
                daylight_fraction: split.daylight_fraction(),
                sunrises: profile.summary.count(TransitionKind::Sunrise),
                sunsets: profile.summary.count(TransitionKind::Sunset),
            })
        })
        .collect()
}

/// Departure with the largest daylight share; earliest wins ties.
pub fn brightest(points: &[SweepPoint]) -> Option<&SweepPoint> {
    points.iter().fold(None, |best: Option<&SweepPoint>, p| match best {
        Some(b) if b.daylight_fraction >= p.daylight_fraction => Some(b),
        _ => Some(p),
    })
}

/// Departure with the smallest daylight share; earliest wins ties.
pub fn darkest(points: &[SweepPoint]) -> Option<&SweepPoint> {
    points.iter().fold(None, |best: Option<&SweepPoint>, p| match best {
        Some(b) if b.daylight_fraction <= p.daylight_fraction => Some(b),
        _ => Some(p),
    })
}
