use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use daylight_route::flight::{
    GreatCircleRoute, build_route, distance_km, duration_ms, great_circle_distance_km,
    instant_at_fraction,
};
use daylight_route::geo::{GeoPoint, angular_distance, to_unit_vector};

const JFK: GeoPoint = GeoPoint::new_unchecked(40.6413, -73.7781);
const LHR: GeoPoint = GeoPoint::new_unchecked(51.47, -0.4543);

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid instant")
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[test]
fn waypoints_include_both_endpoints() {
    let points = build_route(JFK, LHR, 10);
    assert_eq!(points.len(), 11);
    assert_eq!(points[0], JFK);
    assert_eq!(points[10], LHR);

    // Zero samples still yields one segment.
    assert_eq!(build_route(JFK, LHR, 0).len(), 2);
}

#[test]
fn waypoints_are_evenly_spaced() {
    let route = GreatCircleRoute::new(JFK, LHR);
    let points = route.waypoints(20);
    let step = route.arc_angle_deg() / 20.0;
    for pair in points.windows(2) {
        assert!((angular_distance(pair[0], pair[1]) - step).abs() < 1e-8);
    }
}

#[test]
fn tangent_is_horizontal_unit_and_points_forward() {
    let route = GreatCircleRoute::new(JFK, LHR);
    let start = to_unit_vector(JFK).as_array();
    let end = to_unit_vector(LHR).as_array();
    let chord = [end[0] - start[0], end[1] - start[1], end[2] - start[2]];
    for fraction in [0.0, 0.25, 0.5, 0.75, 1.0] {
        let tangent = route.tangent_at(fraction).expect("tangent").as_array();
        let position = to_unit_vector(route.point_at(fraction)).as_array();
        assert!((dot(tangent, tangent) - 1.0).abs() < 1e-12);
        assert!(dot(tangent, position).abs() < 1e-9, "fraction {}", fraction);
        assert!(dot(tangent, chord) > 0.0, "fraction {}", fraction);
    }
}

#[test]
fn equatorial_tangent_points_east() {
    let route = GreatCircleRoute::new(
        GeoPoint::new_unchecked(0.0, 0.0),
        GeoPoint::new_unchecked(0.0, 90.0),
    );
    let tangent = route.tangent_at(0.5).expect("tangent");
    let expected = [-(0.5f64).sqrt(), 0.0, -(0.5f64).sqrt()];
    for (got, want) in tangent.as_array().iter().zip(expected) {
        assert!((got - want).abs() < 1e-6, "{:?}", tangent);
    }
}

#[test]
fn marker_frame_is_orthonormal() {
    let route = GreatCircleRoute::new(JFK, LHR);
    let frame = route.frame_at(0.3).expect("frame");
    let t = frame.tangent.as_array();
    let n = frame.normal.as_array();
    let b = frame.binormal.as_array();
    assert_eq!(frame.position, frame.normal);
    assert!(dot(t, n).abs() < 1e-9);
    assert!(dot(t, b).abs() < 1e-9);
    assert!(dot(n, b).abs() < 1e-9);
    assert!((dot(b, b) - 1.0).abs() < 1e-12);
}

#[test]
fn coincident_endpoints_have_no_direction() {
    let route = GreatCircleRoute::new(JFK, JFK);
    assert!(route.is_degenerate());
    assert_eq!(route.arc_angle_deg(), 0.0);
    assert_eq!(route.point_at(0.6), JFK);
    assert!(route.tangent_at(0.5).is_none());
    assert!(route.frame_at(0.5).is_none());
    assert!(route.waypoints(4).iter().all(|p| *p == JFK));
}

#[test]
fn transatlantic_distance() {
    let km = distance_km(JFK, LHR);
    assert!((5520.0..5560.0).contains(&km), "distance {}", km);
    assert_eq!(great_circle_distance_km(JFK, JFK, 6371.0), 0.0);
    let scaled = great_circle_distance_km(JFK, LHR, 2.0 * 6371.0);
    assert!((scaled - 2.0 * km).abs() < 1e-6);
}

#[test]
fn duration_at_cruise_speed() {
    assert_eq!(duration_ms(7500.0, 750.0), 36_000_000.0);
    let hours = duration_ms(distance_km(JFK, LHR), 750.0) / 3_600_000.0;
    assert!((7.35..7.45).contains(&hours), "hours {}", hours);
}

#[test]
fn instant_at_fraction_rounds_and_extrapolates() {
    let depart = utc(2024, 6, 21, 0, 0);
    let duration = 3_600_000.0;
    assert_eq!(instant_at_fraction(depart, duration, 0.0), depart);
    assert_eq!(
        instant_at_fraction(depart, duration, 0.5),
        depart + TimeDelta::minutes(30)
    );
    assert_eq!(
        instant_at_fraction(depart, duration, 1.5),
        depart + TimeDelta::minutes(90)
    );
    assert_eq!(
        instant_at_fraction(depart, duration, -0.25),
        depart - TimeDelta::minutes(15)
    );
    assert_eq!(
        instant_at_fraction(depart, 1000.4, 1.0),
        depart + TimeDelta::milliseconds(1000)
    );
}

#[test]
fn instant_at_fraction_saturates_outside_the_calendar() {
    let depart = utc(2024, 6, 21, 12, 0);
    let duration = 26_600_000.0;
    assert_eq!(
        instant_at_fraction(depart, duration, 1e9),
        DateTime::<Utc>::MAX_UTC
    );
    assert_eq!(
        instant_at_fraction(depart, duration, f64::INFINITY),
        DateTime::<Utc>::MAX_UTC
    );
    assert_eq!(
        instant_at_fraction(depart, duration, -1e9),
        DateTime::<Utc>::MIN_UTC
    );
    assert_eq!(
        instant_at_fraction(depart, duration, f64::NEG_INFINITY),
        DateTime::<Utc>::MIN_UTC
    );
    assert_eq!(instant_at_fraction(depart, duration, f64::NAN), depart);
}
