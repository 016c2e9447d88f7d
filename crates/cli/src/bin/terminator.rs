use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use daylight_cli::{format_instant, init_logging, parse_instant};
use daylight_route::ephem::NoaaSolarNoon;
use daylight_route::export::{self, boundaries};
use daylight_route::flight::{TwilightBoundarySet, boundaries_with};
use daylight_route::geo::circle::DEFAULT_RING_POINTS;
use tracing::info;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Emit terminator and twilight rings for an instant as JSON"
)]
struct Cli {
    /// Instant to evaluate (RFC 3339; naive times are UTC). Defaults to now.
    #[arg(long)]
    at: Option<String>,

    /// Points per ring
    #[arg(long, default_value_t = DEFAULT_RING_POINTS)]
    points: usize,

    /// Output path ('-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.points == 0 {
        anyhow::bail!("--points must be at least 1");
    }
    let instant = match &cli.at {
        Some(raw) => parse_instant(raw)?,
        None => Utc::now(),
    };

    let set = boundaries_with(instant, cli.points, &NoaaSolarNoon);
    info!(
        subsolar_lat = set.subsolar.latitude,
        subsolar_lon = set.subsolar.longitude,
        curves = set.curves.len(),
        "computed boundary rings"
    );

    let mut writer = export::writer_for_path(&cli.output)?;
    boundaries::write_json(writer.as_mut(), &to_export(&set))?;
    writer.flush()?;
    Ok(())
}

fn to_export(set: &TwilightBoundarySet) -> boundaries::BoundarySet {
    boundaries::BoundarySet {
        instant_utc: format_instant(set.instant),
        subsolar: [set.subsolar.latitude, set.subsolar.longitude],
        antisolar: [set.antisolar.latitude, set.antisolar.longitude],
        curves: set
            .curves
            .iter()
            .map(|curve| boundaries::Curve {
                hemisphere: curve.hemisphere.label(),
                kind: curve.kind.label(),
                angular_radius_deg: curve.angular_radius_deg,
                center: [curve.center.latitude, curve.center.longitude],
                points: curve.points.iter().map(|p| p.as_array()).collect(),
            })
            .collect(),
    }
}
