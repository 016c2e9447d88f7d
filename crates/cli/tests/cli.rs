use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

fn configs(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../configs")
        .join(name)
}

#[test]
fn flight_with_coordinates_prints_summary_and_sidecar() {
    let dir = tempfile::tempdir().expect("tempdir");
    let json_path = dir.path().join("summary.json");
    let csv_path = dir.path().join("samples.csv");

    Command::cargo_bin("flight")
        .expect("flight bin")
        .args([
            "--from",
            "40.6413,-73.7781",
            "--to",
            "51.47,-0.4543",
            "--depart",
            "2024-06-21T00:00:00Z",
            "--samples",
            "200",
            "--summary-json",
            json_path.to_str().unwrap(),
            "--samples-csv",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flight Summary"))
        .stdout(predicate::str::contains("sunset"));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("json")).expect("parse");
    let duration = value["duration_ms"].as_f64().expect("duration");
    let daylight = value["daylight_ms"].as_i64().expect("daylight");
    let darkness = value["darkness_ms"].as_i64().expect("darkness");
    assert_eq!(daylight + darkness, duration.round() as i64);
    assert_eq!(value["sample_count"], 200);

    let csv = fs::read_to_string(&csv_path).expect("csv");
    assert_eq!(csv.lines().count(), 201);
    assert!(csv.starts_with("fraction,latitude,longitude"));
}

#[test]
fn flight_resolves_airport_codes() {
    Command::cargo_bin("flight")
        .expect("flight bin")
        .args([
            "--from",
            "jfk",
            "--to",
            "LHR",
            "--depart",
            "2024-12-21 18:00",
            "--samples",
            "100",
            "--airports",
            configs("airports.yaml").to_str().unwrap(),
            "--timezones",
            configs("timezones.yaml").to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("JFK (New York John F. Kennedy)"))
        .stdout(predicate::str::contains("UTC-05"));
}

#[test]
fn flight_accepts_negative_coordinates() {
    Command::cargo_bin("flight")
        .expect("flight bin")
        .args([
            "--from",
            "-33.9399,151.1753",
            "--to",
            "-37.0082,174.785",
            "--depart",
            "2024-03-01T00:00:00Z",
            "--samples",
            "50",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("-33.9399,151.1753"));
}

#[test]
fn flight_rejects_unknown_airport() {
    Command::cargo_bin("flight")
        .expect("flight bin")
        .args([
            "--from",
            "ZZZ",
            "--to",
            "LHR",
            "--airports",
            configs("airports.yaml").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ZZZ"));
}

#[test]
fn terminator_writes_boundary_json() {
    let output = Command::cargo_bin("terminator")
        .expect("terminator bin")
        .args(["--at", "2024-06-21T12:00:00Z", "--points", "36"])
        .output()
        .expect("run terminator");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let curves = value["curves"].as_array().expect("curves");
    assert_eq!(curves.len(), 8);
    assert!(
        curves
            .iter()
            .all(|c| c["points"].as_array().map(Vec::len) == Some(36))
    );
    let subsolar_lat = value["subsolar"][0].as_f64().expect("subsolar lat");
    assert!((subsolar_lat - 23.44).abs() < 0.1);
}

#[test]
fn sweep_writes_one_row_per_departure() {
    let output = Command::cargo_bin("sweep")
        .expect("sweep bin")
        .args([
            "--from",
            "40.6413,-73.7781",
            "--to",
            "51.47,-0.4543",
            "--start",
            "2024-06-21T00:00:00Z",
            "--end",
            "2024-06-21T03:00:00Z",
            "--step-minutes",
            "60",
            "--samples",
            "100",
        ])
        .output()
        .expect("run sweep");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("depart_utc,arrive_utc,daylight_min,darkness_min,daylight_fraction,sunrises,sunsets")
    );
    assert_eq!(lines.count(), 4);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Brightest"));
}

#[test]
fn sweep_rejects_out_of_range_step() {
    Command::cargo_bin("sweep")
        .expect("sweep bin")
        .args([
            "--from",
            "40.6413,-73.7781",
            "--to",
            "51.47,-0.4543",
            "--start",
            "2024-06-21T00:00:00Z",
            "--end",
            "2024-06-21T03:00:00Z",
            "--step-minutes",
            "9223372036854775807",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

fn dejavu_installed() -> bool {
    if !cfg!(target_os = "linux") {
        return true;
    }
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    ]
    .iter()
    .any(|p| std::path::Path::new(p).exists())
}

fn write_csv(path: &std::path::Path, header: &str, rows: &[String]) {
    let mut file = File::create(path).expect("csv create");
    writeln!(file, "{header}").expect("header");
    for row in rows {
        writeln!(file, "{row}").expect("row");
    }
}

#[test]
fn profile_plot_renders_png() {
    if !dejavu_installed() {
        eprintln!("skipping profile_plot_renders_png: DejaVu Sans not installed");
        return;
    }
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("samples.csv");
    let png_path = dir.path().join("nested").join("profile.png");

    let rows: Vec<String> = (0..20)
        .map(|i| {
            let fraction = (i as f64 + 0.5) / 20.0;
            let angle = 60.0 + 3.0 * i as f64;
            format!(
                "{fraction:.6},45.0,-30.0,2024-06-21T00:00:00Z,{angle:.4},day,{}",
                angle < 90.0
            )
        })
        .collect();
    write_csv(
        &csv_path,
        "fraction,latitude,longitude,instant_utc,sun_angle_deg,band,daylight",
        &rows,
    );

    Command::cargo_bin("profile_plot")
        .expect("profile_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
            "--width",
            "400",
            "--height",
            "300",
        ])
        .assert()
        .success();

    let metadata = fs::metadata(png_path).expect("png metadata");
    assert!(metadata.len() > 0, "PNG output should not be empty");
}

#[test]
fn profile_plot_rejects_empty_samples() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("empty.csv");
    let png_path = dir.path().join("empty.png");
    write_csv(
        &csv_path,
        "fraction,latitude,longitude,instant_utc,sun_angle_deg,band,daylight",
        &[],
    );

    Command::cargo_bin("profile_plot")
        .expect("profile_plot bin")
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No samples"));
    assert!(!png_path.exists());
}

#[test]
fn profile_plot_requires_fraction_and_sun_angle_columns() {
    let dir = tempfile::tempdir().expect("tempdir");
    let png_path = dir.path().join("out.png");

    let no_fraction = dir.path().join("no_fraction.csv");
    write_csv(&no_fraction, "progress,sun_angle_deg", &["0.5,80.0".to_string()]);
    Command::cargo_bin("profile_plot")
        .expect("profile_plot bin")
        .args([
            "--input",
            no_fraction.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'fraction'"));

    let no_angle = dir.path().join("no_angle.csv");
    write_csv(&no_angle, "fraction,elevation", &["0.5,10.0".to_string()]);
    Command::cargo_bin("profile_plot")
        .expect("profile_plot bin")
        .args([
            "--input",
            no_angle.to_str().unwrap(),
            "--output",
            png_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'sun_angle_deg'"));
}
