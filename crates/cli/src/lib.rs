//! Shared plumbing for the Daylight Route command-line tools.

use anyhow::{Context, anyhow};
use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};
use daylight_route::config::{AirportCatalog, load_airports};
use daylight_route::geo::GeoPoint;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. `RUST_LOG` overrides the verbosity-derived level.
pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}

/// Parse an RFC 3339 instant, or a naive `YYYY-MM-DD HH:MM[:SS]` / `YYYY-MM-DDTHH:MM[:SS]` taken as UTC.
pub fn parse_instant(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow!("unrecognised instant '{}'; expected RFC 3339", raw))
}

pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format an instant in a fixed UTC offset, falling back to UTC for out-of-range offsets.
pub fn format_local(instant: DateTime<Utc>, offset_minutes: i32) -> String {
    match FixedOffset::east_opt(offset_minutes * 60) {
        Some(offset) => instant
            .with_timezone(&offset)
            .to_rfc3339_opts(SecondsFormat::Secs, false),
        None => format_instant(instant),
    }
}

/// `Xh Ym` for a millisecond span.
pub fn format_hm(ms: f64) -> String {
    let (hours, minutes) = daylight_route::core::units::hours_minutes(ms);
    format!("{hours}h {minutes}m")
}

/// A route endpoint resolved either from a literal `lat,lon` or from the airport catalog.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub label: String,
    pub point: GeoPoint,
}

/// Parse `lat,lon` into a validated point; `None` when `raw` is not a coordinate pair.
pub fn parse_coordinate(raw: &str) -> Option<anyhow::Result<GeoPoint>> {
    let (lat, lon) = raw.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    Some(GeoPoint::new(lat, lon).map_err(anyhow::Error::from))
}

/// Resolves endpoints, loading the airport catalog only when a code is used.
pub struct EndpointResolver<'a> {
    airports_path: &'a Path,
    catalog: Option<AirportCatalog>,
}

impl<'a> EndpointResolver<'a> {
    pub fn new(airports_path: &'a Path) -> Self {
        Self {
            airports_path,
            catalog: None,
        }
    }

    pub fn resolve(&mut self, raw: &str) -> anyhow::Result<Endpoint> {
        if let Some(point) = parse_coordinate(raw) {
            return Ok(Endpoint {
                label: raw.trim().to_string(),
                point: point?,
            });
        }
        if self.catalog.is_none() {
            let catalog = load_airports(self.airports_path).with_context(|| {
                format!(
                    "loading airport catalog from {}",
                    self.airports_path.display()
                )
            })?;
            self.catalog = Some(catalog);
        }
        let catalog = self
            .catalog
            .as_ref()
            .ok_or_else(|| anyhow!("airport catalog unavailable"))?;
        let airport = catalog.find(raw)?;
        Ok(Endpoint {
            label: format!("{} ({})", airport.code, airport.name),
            point: catalog.locate(raw)?,
        })
    }
}
