//! Solar-geometry and great-circle flight engine.
//!
//! The workspace crates are re-exported here so front-ends (CLI, renderers, UI bindings)
//! depend on a single library: spherical geometry, the solar ephemeris, flight planning
//! with day/night classification, twilight rings, configuration, and exports.

pub use daylight_config as config;
pub use daylight_core as core;
pub use daylight_ephem as ephem;
pub use daylight_export as export;
pub use daylight_flight as flight;
pub use daylight_geo as geo;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
