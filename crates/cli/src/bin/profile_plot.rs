use clap::Parser;
use csv::ReaderBuilder;
use daylight_route::flight::{
    BandTable, DEFAULT_DAYLIGHT_THRESHOLD_DEG, GradientStops, Rgb, shade,
};
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render the sun-angle profile of a flight from its samples CSV"
)]
struct Cli {
    /// Samples CSV written by `flight --samples-csv`
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/profile.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Threshold line in degrees
    #[arg(long, default_value_t = DEFAULT_DAYLIGHT_THRESHOLD_DEG)]
    threshold: f64,
}

#[derive(Debug, Clone, Copy)]
struct Point {
    fraction: f64,
    sun_angle_deg: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let points = read_points(&cli.input)?;
    if points.is_empty() {
        return Err(anyhow::anyhow!("No samples in the provided CSV"));
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 18.0, FontStyle::Normal);

    let angle_min = 0.0;
    let angle_max = 180.0;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Sun angle along route".to_string(), caption_font)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..100.0, angle_min..angle_max)?;

    // Band backgrounds; small sun angles are day.
    let limits = BandTable::COLORING.limits();
    let mut lower = angle_min;
    for (i, upper) in limits
        .iter()
        .copied()
        .chain(std::iter::once(angle_max))
        .enumerate()
    {
        let color = band_color(i, limits.len());
        chart.draw_series(std::iter::once(Rectangle::new(
            [(0.0, lower), (100.0, upper)],
            color.mix(0.35).filled(),
        )))?;
        lower = upper;
    }

    chart
        .configure_mesh()
        .x_desc("Progress (%)")
        .y_desc("Sun angle (deg)")
        .label_style(label_font.clone())
        .x_labels(11)
        .y_labels(10)
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, cli.threshold), (100.0, cli.threshold)],
        ShapeStyle::from(&BLACK.mix(0.6)).stroke_width(2),
    )))?;

    let gradient = GradientStops::default();
    chart.draw_series(points.iter().map(|p| {
        let [r, g, b] = shade(p.sun_angle_deg, &gradient, Rgb::DAYLIGHT, Rgb::NIGHT).to_u8();
        Circle::new(
            (p.fraction * 100.0, p.sun_angle_deg),
            2,
            RGBColor(r, g, b).filled(),
        )
    }))?;
    chart.draw_series(std::iter::once(PathElement::new(
        points
            .iter()
            .map(|p| (p.fraction * 100.0, p.sun_angle_deg))
            .collect::<Vec<_>>(),
        ShapeStyle::from(&BLACK.mix(0.4)).stroke_width(1),
    )))?;

    root.present()?;
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn read_points(path: &str) -> anyhow::Result<Vec<Point>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let fraction_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("fraction"))
        .ok_or_else(|| anyhow::anyhow!("CSV missing 'fraction' column"))?;
    let angle_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("sun_angle_deg"))
        .ok_or_else(|| anyhow::anyhow!("CSV missing 'sun_angle_deg' column"))?;

    let mut points = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let fraction: f64 = r.get(fraction_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        let sun_angle_deg: f64 = r.get(angle_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        if fraction.is_finite() && sun_angle_deg.is_finite() {
            points.push(Point {
                fraction,
                sun_angle_deg,
            });
        }
    }
    points.sort_by(|a, b| a.fraction.total_cmp(&b.fraction));
    Ok(points)
}

/// Day through night, sky blue fading to navy.
fn band_color(index: usize, limit_count: usize) -> RGBColor {
    let t = index as f64 / limit_count.max(1) as f64;
    let day = Rgb::DAYLIGHT;
    let night = Rgb::NIGHT;
    let [r, g, b] = day.lerp(night, t).to_u8();
    RGBColor(r, g, b)
}
