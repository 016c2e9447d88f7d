//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod samples {
    use std::io::{self, Write};

    pub const HEADER: &str =
        "fraction,latitude,longitude,instant_utc,sun_angle_deg,band,daylight";

    /// Write the route-sample CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row for one route sample.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub fraction: f64,
        pub latitude: f64,
        pub longitude: f64,
        pub instant_utc: &'a str,
        pub sun_angle_deg: f64,
        pub band: &'a str,
        pub daylight: bool,
    }

    impl<'a> Record<'a> {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{:.6},{:.6},{:.6},{},{:.4},{},{}",
                self.fraction,
                self.latitude,
                self.longitude,
                self.instant_utc,
                self.sun_angle_deg,
                self.band,
                if self.daylight { "true" } else { "false" },
            )
        }
    }
}

pub mod sweep {
    use std::io::{self, Write};

    pub const HEADER: &str = "depart_utc,arrive_utc,daylight_min,darkness_min,daylight_fraction,sunrises,sunsets";

    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row for one swept departure.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub depart_utc: &'a str,
        pub arrive_utc: &'a str,
        pub daylight_min: i64,
        pub darkness_min: i64,
        pub daylight_fraction: f64,
        pub sunrises: usize,
        pub sunsets: usize,
    }

    impl<'a> Record<'a> {
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{},{},{},{:.4},{},{}",
                self.depart_utc,
                self.arrive_utc,
                self.daylight_min,
                self.darkness_min,
                self.daylight_fraction,
                self.sunrises,
                self.sunsets,
            )
        }
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};

    #[derive(Debug, Clone, Serialize)]
    pub struct Endpoint {
        pub label: String,
        pub latitude: f64,
        pub longitude: f64,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct TransitionEntry {
        pub kind: &'static str,
        pub fraction: f64,
        pub instant_utc: String,
    }

    /// Flight summary sidecar.
    #[derive(Debug, Clone, Serialize)]
    pub struct FlightSummary {
        pub departure: Endpoint,
        pub arrival: Endpoint,
        pub depart_utc: String,
        pub arrive_utc: String,
        pub cruise_speed_kmh: f64,
        pub distance_km: f64,
        pub duration_ms: f64,
        pub daylight_ms: i64,
        pub darkness_ms: i64,
        pub daylight_threshold_deg: f64,
        pub sample_count: usize,
        pub transitions: Vec<TransitionEntry>,
    }

    pub fn write_json(writer: &mut dyn Write, summary: &FlightSummary) -> io::Result<()> {
        to_writer_pretty(&mut *writer, summary)?;
        writeln!(writer)
    }
}

pub mod boundaries {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};

    #[derive(Debug, Clone, Serialize)]
    pub struct Curve {
        pub hemisphere: &'static str,
        pub kind: &'static str,
        pub angular_radius_deg: f64,
        pub center: [f64; 2],
        /// Unit-sphere vertices as `[x, y, z]`.
        pub points: Vec<[f64; 3]>,
    }

    /// Boundary-set sidecar for one instant.
    #[derive(Debug, Clone, Serialize)]
    pub struct BoundarySet {
        pub instant_utc: String,
        pub subsolar: [f64; 2],
        pub antisolar: [f64; 2],
        pub curves: Vec<Curve>,
    }

    pub fn write_json(writer: &mut dyn Write, set: &BoundarySet) -> io::Result<()> {
        to_writer_pretty(&mut *writer, set)?;
        writeln!(writer)
    }
}
