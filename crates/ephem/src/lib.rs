//! Low-precision solar ephemeris for day/night shading.
//!
//! The model is intentionally analytic rather than a numerical ephemeris: declination is a
//! single cosine harmonic of the day of year (good to roughly one degree) and the subsolar
//! longitude follows from the solar noon of the prime meridian. Solar noon itself is a
//! pluggable primitive, see [`noon::SolarNoon`].

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use daylight_core::constants::{AXIAL_TILT_DEG, DAYS_PER_YEAR, DEGREES_PER_HOUR};
use daylight_core::units::ms_to_hours;
use daylight_geo::{GeoPoint, antipode, wrap_longitude};

pub mod noon;

pub use noon::{MeanSolarNoon, NoaaSolarNoon, SolarNoon};

/// Day-of-year offset aligning the cosine minimum with the December solstice.
const SOLSTICE_OFFSET_DAYS: f64 = 10.0;

/// Solar declination in degrees, `-23.44 * cos(360/365 * (day_of_year + 10))`.
///
/// `day_of_year` counts from 1 on January 1st of `date`'s year. The result always lies in
/// [-23.44, 23.44]; the approximation error against a full ephemeris stays near 1 degree.
pub fn solar_declination(date: NaiveDate) -> f64 {
    let day_of_year = f64::from(date.ordinal());
    let angle = (360.0 / DAYS_PER_YEAR * (day_of_year + SOLSTICE_OFFSET_DAYS)).to_radians();
    -AXIAL_TILT_DEG * angle.cos()
}

/// Point where the sun is overhead at `instant`, using the NOAA solar-noon primitive.
pub fn subsolar_point(instant: DateTime<Utc>) -> GeoPoint {
    subsolar_point_with(instant, &NoaaSolarNoon)
}

/// Subsolar point with an explicit solar-noon provider.
///
/// Longitude is `-(hours since solar noon at 0 deg) * 15`, so the point drifts west as UTC
/// advances, and is wrapped into [-180, 180).
pub fn subsolar_point_with<N>(instant: DateTime<Utc>, noon: &N) -> GeoPoint
where
    N: SolarNoon + ?Sized,
{
    let date = instant.date_naive();
    let latitude = solar_declination(date);
    let noon_at_prime_meridian = noon.solar_noon(date, 0.0, 0.0);
    let elapsed_ms = (instant - noon_at_prime_meridian).num_milliseconds() as f64;
    let longitude = wrap_longitude(-ms_to_hours(elapsed_ms) * DEGREES_PER_HOUR);
    GeoPoint::new_unchecked(latitude, longitude)
}

/// Point on the night side directly opposite the sun at `instant`.
pub fn antisolar_point(instant: DateTime<Utc>) -> GeoPoint {
    antipode(subsolar_point(instant))
}

/// Antisolar point with an explicit solar-noon provider.
pub fn antisolar_point_with<N>(instant: DateTime<Utc>, noon: &N) -> GeoPoint
where
    N: SolarNoon + ?Sized,
{
    antipode(subsolar_point_with(instant, noon))
}
