use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use daylight_route::flight::{
    DepartureWindow, FlightError, FlightOptions, MAX_SWEEP_DEPARTURES, brightest, darkest,
    sweep_departures,
};
use daylight_route::geo::GeoPoint;

const SYD: GeoPoint = GeoPoint::new_unchecked(-33.9399, 151.1753);
const SCL: GeoPoint = GeoPoint::new_unchecked(-33.393, -70.7858);

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid instant")
}

fn options() -> FlightOptions {
    FlightOptions {
        sample_count: 200,
        ..FlightOptions::default()
    }
}

#[test]
fn window_is_inclusive() {
    let window = DepartureWindow {
        start: utc(2024, 3, 1, 0, 0),
        end: utc(2024, 3, 1, 6, 0),
        step: TimeDelta::hours(1),
    };
    let instants = window.instants().expect("instants");
    assert_eq!(instants.len(), 7);
    assert_eq!(instants[0], window.start);
    assert_eq!(instants[6], window.end);

    let single = DepartureWindow {
        end: window.start,
        ..window
    };
    assert_eq!(single.instants().expect("single").len(), 1);
}

#[test]
fn invalid_windows_are_rejected() {
    let start = utc(2024, 3, 1, 0, 0);
    let backwards = DepartureWindow {
        start,
        end: start - TimeDelta::hours(1),
        step: TimeDelta::hours(1),
    };
    assert!(matches!(
        backwards.instants(),
        Err(FlightError::InvalidWindow(_))
    ));

    let no_step = DepartureWindow {
        start,
        end: start + TimeDelta::hours(1),
        step: TimeDelta::zero(),
    };
    assert!(no_step.instants().is_err());

    let sub_millisecond = DepartureWindow {
        start,
        end: start + TimeDelta::hours(1),
        step: TimeDelta::microseconds(500),
    };
    assert!(matches!(
        sub_millisecond.instants(),
        Err(FlightError::InvalidWindow(_))
    ));

    let too_many = DepartureWindow {
        start,
        end: start + TimeDelta::minutes(MAX_SWEEP_DEPARTURES as i64),
        step: TimeDelta::minutes(1),
    };
    assert!(too_many.instants().is_err());
}

#[test]
fn sweep_covers_a_day_of_departures() {
    let window = DepartureWindow {
        start: utc(2024, 3, 1, 0, 0),
        end: utc(2024, 3, 2, 0, 0),
        step: TimeDelta::hours(3),
    };
    let points = sweep_departures(SYD, SCL, 900.0, &window, &options()).expect("sweep");
    assert_eq!(points.len(), 9);

    let span = points[0].arrival_instant - points[0].departure_instant;
    for p in &points {
        assert_eq!(p.arrival_instant - p.departure_instant, span);
        assert!((0.0..=1.0).contains(&p.daylight_fraction));
        assert!((p.sunrises as i64 - p.sunsets as i64).abs() <= 1);
    }

    let best = brightest(&points).expect("brightest");
    let worst = darkest(&points).expect("darkest");
    assert!(best.daylight_fraction >= worst.daylight_fraction);
    assert!(points.iter().all(|p| p.daylight_fraction <= best.daylight_fraction));
    assert!(points.iter().all(|p| p.daylight_fraction >= worst.daylight_fraction));
}

#[test]
fn sweep_rejects_bad_speed() {
    let window = DepartureWindow {
        start: utc(2024, 3, 1, 0, 0),
        end: utc(2024, 3, 1, 1, 0),
        step: TimeDelta::hours(1),
    };
    assert!(matches!(
        sweep_departures(SYD, SCL, -5.0, &window, &options()),
        Err(FlightError::InvalidCruiseSpeed(_))
    ));
    assert!(brightest(&[]).is_none());
}
