//! Solar noon providers.
//!
//! The subsolar longitude only needs the instant of solar noon on a given calendar day,
//! so that calculation sits behind the [`SolarNoon`] trait. Implementations must be
//! closed-form and cheap: callers may query once per rendered frame.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

/// Julian day of the Unix epoch.
const JD_UNIX_EPOCH: f64 = 2_440_587.5;
/// Julian day of J2000.0.
const JD_J2000: f64 = 2_451_545.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;
const MINUTES_PER_DAY: f64 = 1_440.0;

/// Contract for the solar-noon primitive: instant of local apparent noon at a location.
pub trait SolarNoon {
    fn solar_noon(&self, date: NaiveDate, latitude: f64, longitude: f64) -> DateTime<Utc>;
}

/// Apparent solar noon following the NOAA spreadsheet formulation (equation of time
/// refined over two passes). Latitude does not affect transit time and is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoaaSolarNoon;

/// Mean solar noon: `12:00 UTC - 4 min per degree east`, no equation-of-time correction.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSolarNoon;

impl SolarNoon for NoaaSolarNoon {
    fn solar_noon(&self, date: NaiveDate, _latitude: f64, longitude: f64) -> DateTime<Utc> {
        let midnight = start_of_day(date);
        let jd = julian_day(midnight);

        let first_guess = jd + 0.5 - longitude / 360.0;
        let mut noon_minutes = 720.0 - 4.0 * longitude - equation_of_time(julian_century(first_guess));
        let refined = jd + noon_minutes / MINUTES_PER_DAY;
        noon_minutes = 720.0 - 4.0 * longitude - equation_of_time(julian_century(refined));

        midnight + minutes(noon_minutes)
    }
}

impl SolarNoon for MeanSolarNoon {
    fn solar_noon(&self, date: NaiveDate, _latitude: f64, longitude: f64) -> DateTime<Utc> {
        start_of_day(date) + minutes(720.0 - 4.0 * longitude)
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn minutes(value: f64) -> TimeDelta {
    TimeDelta::milliseconds((value * 60_000.0).round() as i64)
}

fn julian_day(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / 86_400_000.0 + JD_UNIX_EPOCH
}

fn julian_century(jd: f64) -> f64 {
    (jd - JD_J2000) / DAYS_PER_CENTURY
}

/// Equation of time in minutes for `t` Julian centuries since J2000.0.
fn equation_of_time(t: f64) -> f64 {
    let epsilon = obliquity_corrected(t);
    let l0 = ((280.46646 + t * (36_000.76983 + t * 0.000_303_2)).rem_euclid(360.0)).to_radians();
    let e = 0.016_708_634 - t * (0.000_042_037 + t * 0.000_000_126_7);
    let m = (357.52911 + t * (35_999.05029 - t * 0.000_153_7)).to_radians();
    let y = (epsilon / 2.0).tan().powi(2);

    let eq = y * (2.0 * l0).sin() - 2.0 * e * m.sin() + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();
    4.0 * eq.to_degrees()
}

fn obliquity_corrected(t: f64) -> f64 {
    let seconds = 21.448 - t * (46.815 + t * (0.00059 - t * 0.001813));
    let mean = 23.0 + (26.0 + seconds / 60.0) / 60.0;
    let omega = (125.04 - 1_934.136 * t).to_radians();
    (mean + 0.00256 * omega.cos()).to_radians()
}
