use std::io::Write;
use std::path::PathBuf;

use chrono::TimeDelta;
use clap::Parser;
use daylight_cli::{EndpointResolver, format_instant, init_logging, parse_instant};
use daylight_route::config::{PolicyConfig, load_policy};
use daylight_route::export::{self, sweep as export_sweep};
use daylight_route::flight::policy::options_from_config;
use daylight_route::flight::{DepartureWindow, SweepPoint, brightest, darkest, sweep_departures};
use tracing::info;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Sweep departure times and tabulate daylight along one route"
)]
struct Cli {
    #[arg(long, allow_hyphen_values = true)]
    from: String,

    #[arg(long, allow_hyphen_values = true)]
    to: String,

    /// First departure (RFC 3339; naive times are UTC)
    #[arg(long)]
    start: String,

    /// Last departure, inclusive
    #[arg(long)]
    end: String,

    #[arg(long, default_value_t = 60)]
    step_minutes: i64,

    /// Cruise speed in km/h (defaults to policy)
    #[arg(long)]
    speed: Option<f64>,

    /// Samples per flight (defaults to policy)
    #[arg(long)]
    samples: Option<usize>,

    #[arg(long, default_value = "configs/airports.yaml")]
    airports: PathBuf,

    #[arg(long)]
    policy: Option<PathBuf>,

    /// Output CSV path ('-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut policy = match &cli.policy {
        Some(path) => load_policy(path)?,
        None => PolicyConfig::default(),
    };
    if let Some(samples) = cli.samples {
        policy.sample_count = samples;
    }
    let options = options_from_config(&policy)?;
    let speed = cli.speed.unwrap_or(policy.cruise_speed_kmh);

    let mut resolver = EndpointResolver::new(&cli.airports);
    let origin = resolver.resolve(&cli.from)?;
    let destination = resolver.resolve(&cli.to)?;

    let window = DepartureWindow {
        start: parse_instant(&cli.start)?,
        end: parse_instant(&cli.end)?,
        step: TimeDelta::try_minutes(cli.step_minutes)
            .ok_or_else(|| anyhow::anyhow!("--step-minutes {} is out of range", cli.step_minutes))?,
    };
    let points = sweep_departures(origin.point, destination.point, speed, &window, &options)?;
    info!(
        departures = points.len(),
        from = %origin.label,
        to = %destination.label,
        "departure sweep complete"
    );

    let mut writer = export::writer_for_path(&cli.output)?;
    export_sweep::write_header(writer.as_mut())?;
    for point in &points {
        let depart = format_instant(point.departure_instant);
        let arrive = format_instant(point.arrival_instant);
        export_sweep::Record {
            depart_utc: &depart,
            arrive_utc: &arrive,
            daylight_min: point.daylight_ms / 60_000,
            darkness_min: point.darkness_ms / 60_000,
            daylight_fraction: point.daylight_fraction,
            sunrises: point.sunrises,
            sunsets: point.sunsets,
        }
        .write_to(writer.as_mut())?;
    }
    writer.flush()?;

    report("Brightest", brightest(&points));
    report("Darkest", darkest(&points));
    Ok(())
}

fn report(label: &str, point: Option<&SweepPoint>) {
    if let Some(p) = point {
        eprintln!(
            "{label:<9} : depart {} ({:.1}% daylight)",
            format_instant(p.departure_instant),
            p.daylight_fraction * 100.0
        );
    }
}
