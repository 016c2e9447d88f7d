//! Configuration models and loaders for the Daylight Route workspace.

use std::fs::File;
use std::path::{Path, PathBuf};

use daylight_geo::polygon::GeoPolygon;
use daylight_geo::{GeoError, GeoPoint};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Airport record parsed from catalog files.
#[derive(Debug, Deserialize, Clone)]
pub struct AirportConfig {
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA zone name, kept for display only.
    #[serde(default)]
    pub timezone: Option<String>,
}

impl AirportConfig {
    pub fn location(&self) -> Result<GeoPoint, GeoError> {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Planning policy: sampling density, cruise defaults, and classification thresholds.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PolicyConfig {
    pub sample_count: usize,
    pub cruise_speed_kmh: f64,
    pub earth_radius_km: f64,
    pub daylight_threshold_deg: f64,
    pub bands: [f64; 4],
    pub gradient: [f64; 6],
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            sample_count: 1_000,
            cruise_speed_kmh: 750.0,
            earth_radius_km: 6_371.0,
            daylight_threshold_deg: 90.0,
            bands: [85.0, 90.0, 95.0, 100.0],
            gradient: [85.0, 88.0, 91.0, 94.0, 97.0, 100.0],
        }
    }
}

/// Time zone region as supplied by external polygon data.
#[derive(Debug, Deserialize, Clone)]
pub struct TimezoneConfig {
    pub name: String,
    pub utc_offset_minutes: i32,
    /// Ring of `[latitude, longitude]` pairs.
    pub polygon: Vec<[f64; 2]>,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("airport '{0}' not found in catalog")]
    UnknownAirport(String),
    #[error("invalid geometry in '{name}': {source}")]
    Geometry {
        name: String,
        #[source]
        source: GeoError,
    },
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),
}

/// Airport catalog with case-insensitive code lookup.
#[derive(Debug, Clone, Default)]
pub struct AirportCatalog {
    airports: Vec<AirportConfig>,
}

impl AirportCatalog {
    pub fn new(airports: Vec<AirportConfig>) -> Self {
        Self { airports }
    }

    pub fn airports(&self) -> &[AirportConfig] {
        &self.airports
    }

    pub fn find(&self, code: &str) -> Result<&AirportConfig, ConfigError> {
        let upper = code.trim().to_uppercase();
        self.airports
            .iter()
            .find(|a| a.code.to_uppercase() == upper)
            .ok_or_else(|| ConfigError::UnknownAirport(code.to_string()))
    }

    /// Resolve a code straight to a validated location.
    pub fn locate(&self, code: &str) -> Result<GeoPoint, ConfigError> {
        let airport = self.find(code)?;
        airport.location().map_err(|source| ConfigError::Geometry {
            name: airport.code.clone(),
            source,
        })
    }
}

/// Named polygon with a fixed UTC offset.
#[derive(Debug, Clone)]
pub struct TimezoneRegion {
    pub name: String,
    pub utc_offset_minutes: i32,
    pub polygon: GeoPolygon,
}

/// Ordered list of regions; the first region containing a point wins.
#[derive(Debug, Clone, Default)]
pub struct TimezoneCatalog {
    regions: Vec<TimezoneRegion>,
}

impl TimezoneCatalog {
    pub fn from_configs(configs: Vec<TimezoneConfig>) -> Result<Self, ConfigError> {
        let regions = configs
            .into_iter()
            .map(|cfg| {
                let polygon = cfg
                    .polygon
                    .iter()
                    .map(|[lat, lon]| GeoPoint::new(*lat, *lon))
                    .collect::<Result<Vec<_>, _>>()
                    .and_then(GeoPolygon::new)
                    .map_err(|source| ConfigError::Geometry {
                        name: cfg.name.clone(),
                        source,
                    })?;
                Ok(TimezoneRegion {
                    name: cfg.name,
                    utc_offset_minutes: cfg.utc_offset_minutes,
                    polygon,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { regions })
    }

    pub fn regions(&self) -> &[TimezoneRegion] {
        &self.regions
    }

    /// First region covering `point`; a point on a shared edge goes to the earlier region.
    pub fn locate(&self, point: GeoPoint) -> Option<&TimezoneRegion> {
        self.regions.iter().find(|r| r.polygon.covers(point))
    }
}

/// Load an airport catalog from a YAML list, a single TOML record, or a directory of TOML records.
pub fn load_airports<P: AsRef<Path>>(path: P) -> Result<AirportCatalog, ConfigError> {
    let airports: Vec<AirportConfig> = load_records(path.as_ref())?;
    info!(count = airports.len(), path = %path.as_ref().display(), "loaded airport catalog");
    Ok(AirportCatalog::new(airports))
}

/// Load time zone polygons from a YAML list, a single TOML record, or a directory of TOML records.
pub fn load_timezones<P: AsRef<Path>>(path: P) -> Result<TimezoneCatalog, ConfigError> {
    let configs: Vec<TimezoneConfig> = load_records(path.as_ref())?;
    info!(count = configs.len(), path = %path.as_ref().display(), "loaded time zone regions");
    TimezoneCatalog::from_configs(configs)
}

/// Load a planning policy from TOML or YAML and validate it.
pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<PolicyConfig, ConfigError> {
    let path = path.as_ref();
    let policy: PolicyConfig = if has_extension(path, "toml") {
        toml::from_str(&std::fs::read_to_string(path)?)?
    } else {
        serde_yaml::from_reader(File::open(path)?)?
    };
    validate_policy(&policy)?;
    Ok(policy)
}

/// Reject policies that would make planning ill-defined.
pub fn validate_policy(policy: &PolicyConfig) -> Result<(), ConfigError> {
    if policy.sample_count == 0 {
        return Err(ConfigError::InvalidPolicy(
            "sample_count must be positive".to_string(),
        ));
    }
    if !(policy.cruise_speed_kmh.is_finite() && policy.cruise_speed_kmh > 0.0) {
        return Err(ConfigError::InvalidPolicy(format!(
            "cruise_speed_kmh must be positive, got {}",
            policy.cruise_speed_kmh
        )));
    }
    if !(policy.earth_radius_km.is_finite() && policy.earth_radius_km > 0.0) {
        return Err(ConfigError::InvalidPolicy(format!(
            "earth_radius_km must be positive, got {}",
            policy.earth_radius_km
        )));
    }
    if !policy.daylight_threshold_deg.is_finite() {
        return Err(ConfigError::InvalidPolicy(format!(
            "daylight_threshold_deg must be finite, got {}",
            policy.daylight_threshold_deg
        )));
    }
    if !policy.bands.windows(2).all(|w| w[0] < w[1]) {
        return Err(ConfigError::InvalidPolicy(format!(
            "bands must be strictly increasing, got {:?}",
            policy.bands
        )));
    }
    if !policy.gradient.windows(2).all(|w| w[0] < w[1]) {
        return Err(ConfigError::InvalidPolicy(format!(
            "gradient stops must be strictly increasing, got {:?}",
            policy.gradient
        )));
    }
    Ok(())
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().map(|e| e == ext).unwrap_or(false)
}

fn load_records<T>(path: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if path.is_dir() {
        read_dir_records(path)
    } else if has_extension(path, "toml") {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| has_extension(path, "toml"))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
