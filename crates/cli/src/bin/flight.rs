use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use daylight_cli::{
    EndpointResolver, format_hm, format_instant, format_local, init_logging, parse_instant,
};
use daylight_route::config::{PolicyConfig, TimezoneCatalog, load_policy, load_timezones};
use daylight_route::export::{self, samples as export_samples, summary as export_summary};
use daylight_route::flight::policy::options_from_config;
use daylight_route::flight::{FlightPlan, FlightProfile, is_daylight, plan_flight};
use daylight_route::geo::GeoPoint;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Great-circle flight planner with day/night breakdown"
)]
struct Cli {
    /// Departure airport code or `lat,lon`
    #[arg(long, allow_hyphen_values = true)]
    from: String,

    /// Arrival airport code or `lat,lon`
    #[arg(long, allow_hyphen_values = true)]
    to: String,

    /// Departure instant (RFC 3339; naive times are UTC). Defaults to now.
    #[arg(long)]
    depart: Option<String>,

    /// Cruise speed in km/h (defaults to policy)
    #[arg(long)]
    speed: Option<f64>,

    /// Number of route samples (defaults to policy)
    #[arg(long)]
    samples: Option<usize>,

    /// Daylight threshold on the sun angle in degrees (defaults to policy)
    #[arg(long)]
    threshold: Option<f64>,

    /// Airport catalog (YAML list, TOML record, or directory of TOML records)
    #[arg(long, default_value = "configs/airports.yaml")]
    airports: PathBuf,

    /// Planning policy file (TOML or YAML)
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Time zone polygons used to show local times
    #[arg(long)]
    timezones: Option<PathBuf>,

    /// Write route samples as CSV ('-' for stdout)
    #[arg(long)]
    samples_csv: Option<PathBuf>,

    /// Write the flight summary as JSON ('-' for stdout)
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut policy = match &cli.policy {
        Some(path) => load_policy(path)
            .with_context(|| format!("loading policy from {}", path.display()))?,
        None => PolicyConfig::default(),
    };
    if let Some(samples) = cli.samples {
        policy.sample_count = samples;
    }
    if let Some(threshold) = cli.threshold {
        policy.daylight_threshold_deg = threshold;
    }
    let options = options_from_config(&policy)?;

    let mut resolver = EndpointResolver::new(&cli.airports);
    let origin = resolver.resolve(&cli.from)?;
    let destination = resolver.resolve(&cli.to)?;
    let depart = match &cli.depart {
        Some(raw) => parse_instant(raw)?,
        None => Utc::now(),
    };
    let speed = cli.speed.unwrap_or(policy.cruise_speed_kmh);

    let plan = FlightPlan::new(origin.point, destination.point, depart, speed)?;
    let profile = plan_flight(plan, &options)?;
    let timezones = match &cli.timezones {
        Some(path) => Some(
            load_timezones(path)
                .with_context(|| format!("loading time zones from {}", path.display()))?,
        ),
        None => None,
    };

    let summary = &profile.summary;
    let split = summary.split();
    let (daylight_min, darkness_min) = split.minutes();
    let arrival = profile.arrival_instant();

    println!("=== Flight Summary ===");
    println!("Route       : {} -> {}", origin.label, destination.label);
    println!(
        "Departure   : {}{}",
        format_instant(depart),
        local_suffix(timezones.as_ref(), origin.point, depart)
    );
    println!(
        "Arrival     : {}{}",
        format_instant(arrival),
        local_suffix(timezones.as_ref(), destination.point, arrival)
    );
    println!(
        "Distance    : {:.1} km (arc {:.2} deg)",
        summary.distance_km,
        profile.route.arc_angle_deg()
    );
    println!(
        "Duration    : {} at {:.0} km/h",
        format_hm(summary.duration_ms),
        speed
    );
    println!(
        "Daylight    : {}h {}m ({:.1}%)",
        daylight_min / 60,
        daylight_min % 60,
        split.daylight_fraction() * 100.0
    );
    println!("Darkness    : {}h {}m", darkness_min / 60, darkness_min % 60);
    if summary.transitions.is_empty() {
        println!("Transitions : none");
    }
    for transition in &summary.transitions {
        println!(
            "Transition  : {} at {:.1}% ({})",
            transition.kind.label(),
            transition.fraction * 100.0,
            format_instant(transition.instant)
        );
    }

    if let Some(path) = &cli.samples_csv {
        write_samples(path, &profile)?;
    }
    if let Some(path) = &cli.summary_json {
        write_summary(path, &profile, &origin.label, &destination.label)?;
    }

    Ok(())
}

fn local_suffix(
    timezones: Option<&TimezoneCatalog>,
    point: GeoPoint,
    instant: chrono::DateTime<Utc>,
) -> String {
    timezones
        .and_then(|catalog| catalog.locate(point))
        .map(|region| {
            format!(
                " (local {} {})",
                format_local(instant, region.utc_offset_minutes),
                region.name
            )
        })
        .unwrap_or_default()
}

fn write_samples(path: &Path, profile: &FlightProfile) -> anyhow::Result<()> {
    let mut writer = export::writer_for_path(path)?;
    export_samples::write_header(writer.as_mut())?;
    for sample in profile.samples.iter() {
        let instant = format_instant(sample.instant);
        export_samples::Record {
            fraction: sample.fraction,
            latitude: sample.point.latitude,
            longitude: sample.point.longitude,
            instant_utc: &instant,
            sun_angle_deg: sample.sun_angle_deg,
            band: sample.band.label(),
            daylight: is_daylight(sample.sun_angle_deg, profile.options.daylight_threshold_deg),
        }
        .write_to(writer.as_mut())?;
    }
    writer.flush()?;
    Ok(())
}

fn write_summary(
    path: &Path,
    profile: &FlightProfile,
    origin_label: &str,
    destination_label: &str,
) -> anyhow::Result<()> {
    let summary = &profile.summary;
    let sidecar = export_summary::FlightSummary {
        departure: export_summary::Endpoint {
            label: origin_label.to_string(),
            latitude: profile.plan.departure.latitude,
            longitude: profile.plan.departure.longitude,
        },
        arrival: export_summary::Endpoint {
            label: destination_label.to_string(),
            latitude: profile.plan.arrival.latitude,
            longitude: profile.plan.arrival.longitude,
        },
        depart_utc: format_instant(profile.plan.departure_instant),
        arrive_utc: format_instant(profile.arrival_instant()),
        cruise_speed_kmh: profile.plan.cruise_speed_kmh,
        distance_km: summary.distance_km,
        duration_ms: summary.duration_ms,
        daylight_ms: summary.daylight_ms,
        darkness_ms: summary.darkness_ms,
        daylight_threshold_deg: profile.options.daylight_threshold_deg,
        sample_count: profile.samples.len(),
        transitions: summary
            .transitions
            .iter()
            .map(|t| export_summary::TransitionEntry {
                kind: t.kind.label(),
                fraction: t.fraction,
                instant_utc: format_instant(t.instant),
            })
            .collect(),
    };
    let mut writer = export::writer_for_path(path)?;
    export_summary::write_json(writer.as_mut(), &sidecar)?;
    writer.flush()?;
    Ok(())
}
