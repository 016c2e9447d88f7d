use chrono::{DateTime, TimeZone, Utc};
use daylight_route::ephem::{antisolar_point, subsolar_point};
use daylight_route::flight::{
    DaylightSplit, FlightError, FlightOptions, FlightPlan, FlightProfile, Rgb, TransitionKind,
    aggregate_daylight_darkness, find_transitions, plan_flight, sample_route,
};
use daylight_route::geo::{GeoPoint, destination_point};

const JFK: GeoPoint = GeoPoint::new_unchecked(40.6413, -73.7781);
const LHR: GeoPoint = GeoPoint::new_unchecked(51.47, -0.4543);

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid instant")
}

fn jfk_lhr(depart: DateTime<Utc>, sample_count: usize) -> FlightProfile {
    let plan = FlightPlan::new(JFK, LHR, depart, 750.0).expect("plan");
    let options = FlightOptions {
        sample_count,
        ..FlightOptions::default()
    };
    plan_flight(plan, &options).expect("profile")
}

#[test]
fn split_sums_to_rounded_duration() {
    for hour in [0, 5, 11, 17, 23] {
        let profile = jfk_lhr(utc(2024, 6, 21, hour, 0), 1000);
        let summary = &profile.summary;
        assert_eq!(
            summary.daylight_ms + summary.darkness_ms,
            summary.duration_ms.round() as i64,
            "hour {}",
            hour
        );
        assert!(summary.daylight_ms >= 0 && summary.darkness_ms >= 0);
        let (day_min, dark_min) = summary.split().minutes();
        assert_eq!(
            day_min + dark_min,
            (summary.duration_ms / 60_000.0).round() as i64
        );
    }
}

#[test]
fn samples_sit_at_segment_midpoints() {
    let profile = jfk_lhr(utc(2024, 6, 21, 0, 0), 1000);
    let samples = profile.samples.samples();
    assert_eq!(samples.len(), 1000);
    assert!((samples[0].fraction - 0.0005).abs() < 1e-12);
    assert!((samples[999].fraction - 0.9995).abs() < 1e-12);
    for pair in samples.windows(2) {
        assert!(pair[1].fraction > pair[0].fraction);
        assert!(pair[1].instant >= pair[0].instant);
    }

    let set = &profile.samples;
    assert_eq!(set.sample_at(0.0).map(|s| s.fraction), Some(samples[0].fraction));
    assert_eq!(set.sample_at(0.4205).map(|s| s.fraction), Some(samples[420].fraction));
    assert_eq!(set.sample_at(1.5).map(|s| s.fraction), Some(samples[999].fraction));
}

#[test]
fn evening_departure_crosses_the_night() {
    let profile = jfk_lhr(utc(2024, 6, 21, 0, 0), 1000);
    let threshold = profile.options.daylight_threshold_deg;
    let samples = profile.samples.samples();
    assert!(samples[0].is_daylight(threshold), "departure should be lit");
    assert!(samples[999].is_daylight(threshold), "arrival should be lit");
    assert!(samples.iter().any(|s| !s.is_daylight(threshold)));

    let transitions = &profile.summary.transitions;
    assert!(transitions.len() >= 2);
    assert_eq!(transitions[0].kind, TransitionKind::Sunset);
    assert_eq!(transitions[transitions.len() - 1].kind, TransitionKind::Sunrise);
    assert_eq!(
        profile.summary.count(TransitionKind::Sunrise),
        profile.summary.count(TransitionKind::Sunset)
    );
    assert!(profile.summary.daylight_ms > 0 && profile.summary.darkness_ms > 0);
}

#[test]
fn transitions_alternate_and_sit_on_the_later_sample() {
    for hour in [0, 6, 12, 18, 21] {
        let profile = jfk_lhr(utc(2024, 3, 20, hour, 0), 400);
        let threshold = profile.options.daylight_threshold_deg;
        let samples = profile.samples.samples();
        let transitions = &profile.summary.transitions;
        for pair in transitions.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind, "hour {}", hour);
        }
        for t in transitions {
            let idx = samples
                .iter()
                .position(|s| s.fraction == t.fraction)
                .expect("transition fraction matches a sample");
            assert!(idx > 0);
            assert_eq!(samples[idx].instant, t.instant);
            let after = samples[idx].is_daylight(threshold);
            assert_ne!(samples[idx - 1].is_daylight(threshold), after);
            assert_eq!(after, t.kind == TransitionKind::Sunrise);
        }
        let sunrises = profile.summary.count(TransitionKind::Sunrise) as i64;
        let sunsets = profile.summary.count(TransitionKind::Sunset) as i64;
        assert!((sunrises - sunsets).abs() <= 1);
    }
}

#[test]
fn flight_under_the_sun_is_all_daylight() {
    let depart = utc(2024, 6, 21, 12, 0);
    let start = subsolar_point(depart);
    let end = destination_point(start, 90.0, 1.0);
    let plan = FlightPlan::new(start, end, depart, 750.0).expect("plan");
    let profile = plan_flight(plan, &FlightOptions::default()).expect("profile");
    assert_eq!(profile.summary.darkness_ms, 0);
    assert_eq!(
        profile.summary.daylight_ms,
        profile.summary.duration_ms.round() as i64
    );
    assert!(profile.summary.transitions.is_empty());
}

#[test]
fn flight_at_the_antisolar_point_is_all_darkness() {
    let depart = utc(2024, 12, 21, 3, 0);
    let start = antisolar_point(depart);
    let end = destination_point(start, 180.0, 1.0);
    let plan = FlightPlan::new(start, end, depart, 750.0).expect("plan");
    let profile = plan_flight(plan, &FlightOptions::default()).expect("profile");
    assert_eq!(profile.summary.daylight_ms, 0);
    assert!(profile.summary.transitions.is_empty());
    assert_eq!(profile.summary.split().daylight_fraction(), 0.0);
}

#[test]
fn coincident_endpoints_plan_a_zero_length_flight() {
    let plan = FlightPlan::new(JFK, JFK, utc(2024, 1, 1, 0, 0), 750.0).expect("plan");
    let profile = plan_flight(plan, &FlightOptions::default()).expect("profile");
    assert_eq!(profile.summary.distance_km, 0.0);
    assert_eq!(profile.summary.duration_ms, 0.0);
    assert_eq!(profile.summary.daylight_ms + profile.summary.darkness_ms, 0);
    assert!(profile.samples.iter().all(|s| s.point == JFK));
    assert!(profile.frame_at(0.5).is_none());
}

#[test]
fn position_at_clamps_progress() {
    let profile = jfk_lhr(utc(2024, 6, 21, 0, 0), 200);
    let before = profile.position_at(-0.5);
    assert_eq!(before.fraction, 0.0);
    assert_eq!(before.point, JFK);
    assert_eq!(before.instant, profile.plan.departure_instant);

    let after = profile.position_at(1.7);
    assert_eq!(after.fraction, 1.0);
    assert_eq!(after.point, LHR);
    assert_eq!(after.instant, profile.arrival_instant());
    assert!(after.daylight);

    let mid = profile.position_at(0.5);
    assert!(mid.instant > before.instant && mid.instant < after.instant);
    assert!(profile.frame_at(0.5).is_some());
}

#[test]
fn sample_colors_follow_samples() {
    let profile = jfk_lhr(utc(2024, 6, 21, 0, 0), 250);
    let colors = profile.sample_colors(Rgb::DAYLIGHT, Rgb::NIGHT);
    assert_eq!(colors.len(), 250);
    // Arrival in London on a June morning is full daylight.
    assert_eq!(colors[249], Rgb::DAYLIGHT);
}

#[test]
fn sample_route_uses_requested_count() {
    let plan = FlightPlan::new(JFK, LHR, utc(2024, 6, 21, 0, 0), 750.0).expect("plan");
    assert_eq!(sample_route(&plan, 37).len(), 37);
    assert!(sample_route(&plan, 0).is_empty());
}

#[test]
fn aggregation_of_empty_samples_is_all_darkness() {
    let split = aggregate_daylight_darkness(&[], 1234.6, 90.0);
    assert_eq!(
        split,
        DaylightSplit {
            daylight_ms: 0,
            darkness_ms: 1235
        }
    );
    assert!(find_transitions(&[], 90.0).is_empty());
}

#[test]
fn split_minutes_round_total_once() {
    let split = DaylightSplit {
        daylight_ms: 90_000,
        darkness_ms: 30_000,
    };
    assert_eq!(split.total_ms(), 120_000);
    assert_eq!(split.minutes(), (2, 0));

    let even = DaylightSplit {
        daylight_ms: 3_600_000,
        darkness_ms: 1_800_000,
    };
    assert_eq!(even.minutes(), (60, 30));
}

#[test]
fn invalid_plans_are_rejected() {
    let depart = utc(2024, 6, 21, 0, 0);
    assert!(matches!(
        FlightPlan::new(JFK, LHR, depart, 0.0),
        Err(FlightError::InvalidCruiseSpeed(_))
    ));
    assert!(matches!(
        FlightPlan::new(JFK, LHR, depart, f64::NAN),
        Err(FlightError::InvalidCruiseSpeed(_))
    ));
    assert!(matches!(
        FlightPlan::new(GeoPoint::new_unchecked(95.0, 0.0), LHR, depart, 750.0),
        Err(FlightError::Coordinate(_))
    ));

    let plan = FlightPlan::new(JFK, LHR, depart, 750.0).expect("plan");
    let options = FlightOptions {
        sample_count: 0,
        ..FlightOptions::default()
    };
    assert!(matches!(
        plan_flight(plan, &options),
        Err(FlightError::NoSamples)
    ));

    let options = FlightOptions {
        daylight_threshold_deg: f64::NAN,
        ..FlightOptions::default()
    };
    assert!(matches!(
        plan_flight(plan, &options),
        Err(FlightError::InvalidThreshold(_))
    ));
}
