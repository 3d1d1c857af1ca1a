use approx::assert_relative_eq;
use test_case::test_case;

use cartsim::configuration::config::ScenarioConfig;
use cartsim::measurement::grading::{grade, grade_input, grade_values, Verdict};
use cartsim::measurement::ledger::Ledger;
use cartsim::measurement::record::{fmt_num, MeasurementRecord};
use cartsim::simulation::integrator::{euler_step, integrate};
use cartsim::simulation::jitter::Jitter;
use cartsim::simulation::params::{SimulationConfig, Track};
use cartsim::simulation::scenario::Scenario;
use cartsim::simulation::states::KinematicState;
use cartsim::visualization::cart_vis2d::{cart_scale, force_arrow_width};
use cartsim::SimError;

/// Cart config on the default 1 m track
pub fn cart(mass: f64, force: f64) -> SimulationConfig {
    SimulationConfig::new(mass, force, 1.0).unwrap()
}

/// Three distinct rows for ledger tests
pub fn three_rows() -> Ledger {
    let mut ledger = Ledger::new();
    ledger.record_experiment(MeasurementRecord::new(1.0, 1.0, 1.41, 1.41));
    ledger.record_experiment(MeasurementRecord::new(2.0, 1.0, 2.00, 1.00));
    ledger.record_experiment(MeasurementRecord::new(3.0, 1.5, 2.00, 1.00));
    ledger
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn step_updates_velocity_before_position() {
    let s = euler_step(KinematicState::at_rest(), &cart(2.0, 4.0), 1.0);

    assert_eq!(s.v, 2.0);
    assert_eq!(s.x, 2.0, "position must use the updated velocity");
    assert_eq!(s.t, 1.0);
}

#[test]
fn zero_mass_gives_zero_acceleration() {
    let cfg = cart(0.0, 5.0);
    assert_eq!(cfg.acceleration(), 0.0);

    let s = euler_step(KinematicState::at_rest(), &cfg, 0.5);
    assert!(s.x.is_finite() && s.v.is_finite());
    assert_eq!(s.v, 0.0);
    assert_eq!(s.x, 0.0);
}

#[test]
fn negative_mass_gives_zero_acceleration() {
    assert_eq!(cart(-1.0, 5.0).acceleration(), 0.0);
}

#[test]
fn negative_dt_is_a_no_op() {
    let start = KinematicState { x: 0.3, v: 0.2, t: 1.0 };
    let s = euler_step(start, &cart(1.0, 1.0), -0.5);
    assert_eq!(s, start);
}

#[test]
fn negative_force_moves_backwards() {
    let s = euler_step(KinematicState::at_rest(), &cart(1.0, -1.0), 0.1);
    assert!(s.v < 0.0);
    assert!(s.x < 0.0);
}

#[test]
fn integration_is_deterministic() {
    let cfg = cart(1.7, 0.9);
    let dts = [0.016, 0.017, 0.0165, 0.033, 0.001, 0.016];

    assert_eq!(integrate(&cfg, &dts), integrate(&cfg, &dts));
}

#[test]
fn velocity_over_time_equals_acceleration() {
    // constant force: v = a * t regardless of the dt sequence
    let cfg = cart(4.0, 3.0);
    let dts = [0.016, 0.017, 0.0165, 0.033, 0.016];
    let last = *integrate(&cfg, &dts).last().unwrap();

    assert_relative_eq!(last.v / last.t, 0.75, epsilon = 1e-12);
}

#[test]
fn config_rejects_non_finite_values() {
    assert!(matches!(
        SimulationConfig::new(f64::NAN, 1.0, 1.0),
        Err(SimError::InvalidInput { what: "mass", .. })
    ));
    assert!(SimulationConfig::new(1.0, f64::INFINITY, 1.0).is_err());
    assert!(SimulationConfig::new(1.0, 1.0, 0.0).is_err());
}

// ==================================================================================
// Track / jitter tests
// ==================================================================================

#[test]
fn visual_position_is_clamped_to_track() {
    let track = Track::new(500.0, 1.0);

    assert_eq!(track.pixels_per_meter, 500.0);
    assert_eq!(track.visual_position(0.5), 250.0);
    assert_eq!(track.visual_position(1.3), 500.0);
}

#[test]
fn jitter_stays_within_five_percent() {
    let mut jitter = Jitter::new(0.05, Some(42));

    for i in 1..2000 {
        let value = i as f64 * 0.37;
        let shown = jitter.apply(value);
        assert!((shown - value).abs() <= 0.05 * value + 1e-12, "{shown} vs {value}");
    }
}

#[test]
fn jitter_is_reproducible_with_a_seed() {
    let mut a = Jitter::new(0.05, Some(7));
    let mut b = Jitter::new(0.05, Some(7));
    let state = KinematicState { x: 0.4, v: 0.9, t: 1.2 };

    for _ in 0..10 {
        assert_eq!(a.display(&state), b.display(&state));
    }
}

#[test]
fn disabled_jitter_is_identity() {
    let mut jitter = Jitter::disabled();
    let state = KinematicState { x: 0.4, v: 0.9, t: 1.2 };
    let shown = jitter.display(&state);

    assert!(!jitter.is_enabled());
    assert_eq!(shown.time, 1.2);
    assert_eq!(shown.velocity, 0.9);
}

// ==================================================================================
// Grading tests
// ==================================================================================

#[test_case(2.0, 2.0, true; "exact")]
#[test_case(2.1, 2.0, true; "upper edge of five percent")]
#[test_case(1.9, 2.0, true; "lower edge of five percent")]
#[test_case(2.2, 2.0, false; "ten percent over")]
#[test_case(0.0009, 0.0, true; "absolute floor near zero")]
#[test_case(0.002, 0.0, false; "past absolute floor")]
#[test_case(-0.51, -0.5, true; "negative reference")]
fn grading_boundaries(user: f64, reference: f64, pass: bool) {
    let verdict = grade_values(user, Some(reference), None);
    assert_eq!(verdict.is_pass(), pass, "{verdict}");
    assert_eq!(verdict.expected(), Some(reference));
}

#[test]
fn measured_acceleration_takes_priority() {
    let verdict = grade_values(2.5, Some(2.0), Some(2.5));
    assert!(matches!(verdict, Verdict::Pass { expected } if expected == 2.5));
}

#[test]
fn theoretical_is_the_fallback() {
    let verdict = grade_values(2.0, Some(2.0), None);
    assert!(verdict.is_pass());

    let verdict = grade_values(2.0, Some(2.0), Some(f64::NAN));
    assert!(verdict.is_pass());
}

#[test]
fn no_reference_is_reported() {
    let verdict = grade_values(1.0, None, None);
    assert!(matches!(verdict, Verdict::Invalid(SimError::NoReference)));
    assert_eq!(verdict.to_string(), "No reference available");
}

#[test]
fn non_numeric_input_asks_for_a_number() {
    let record = MeasurementRecord::new(2.0, 4.0, 1.0, 2.0);

    for raw in ["", "  ", "abc", "NaN"] {
        let verdict = grade_input(raw, &record);
        assert!(matches!(verdict, Verdict::Invalid(SimError::NotANumber)), "{raw:?}");
        assert_eq!(verdict.to_string(), "Enter a number");
    }
    assert!(grade_input(" 2.02 ", &record).is_pass());
}

#[test]
fn verdict_text() {
    assert_eq!(grade_values(2.0, Some(2.0), None).to_string(), "Correct ✓ (a=2.000 m/s²)");
    assert_eq!(grade_values(3.0, Some(2.0), None).to_string(), "Not quite ✗ Expected ≈ 2.000 m/s²");
}

#[test]
fn record_accelerations() {
    let r = MeasurementRecord::new(2.0, 4.0, 1.25, 2.5);
    assert_eq!(r.theoretical_acceleration(), Some(2.0));
    assert_eq!(r.measured_acceleration(), Some(2.0));

    let r = MeasurementRecord::new(0.0, 4.0, 0.0, 2.5);
    assert_eq!(r.theoretical_acceleration(), None);
    assert_eq!(r.measured_acceleration(), None);
    assert!(matches!(grade(1.0, &r), Verdict::Invalid(SimError::NoReference)));
}

// ==================================================================================
// Ledger tests
// ==================================================================================

#[test]
fn delete_renumbers_rows() {
    let mut ledger = three_rows();
    let third = *ledger.get(3).unwrap();

    let removed = ledger.delete(2).unwrap();
    assert_eq!(removed.mass, 2.0);

    let rows: Vec<(usize, MeasurementRecord)> = ledger.rows().map(|(n, r)| (n, *r)).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].0, 1);
    assert_eq!(rows[0].1.mass, 1.0);
    assert_eq!(rows[1].0, 2);
    assert_eq!(rows[1].1, third);
}

#[test_case(0; "zero is not a row")]
#[test_case(4; "past the end")]
fn delete_out_of_range(index: usize) {
    let mut ledger = three_rows();
    assert!(matches!(ledger.delete(index), Err(SimError::NoSuchEntry(i)) if i == index));
    assert_eq!(ledger.len(), 3);
}

#[test]
fn clear_resets_counter() {
    let mut ledger = three_rows();
    assert_eq!(ledger.experiment_count(), 3);

    ledger.delete(1).unwrap();
    assert_eq!(ledger.experiment_count(), 3, "deleting does not rewind the counter");

    ledger.clear();
    assert!(ledger.is_empty());
    assert_eq!(ledger.experiment_count(), 0);
}

#[test]
fn table_formatting() {
    let ledger = three_rows();
    let table = ledger.to_string();

    assert!(table.lines().next().unwrap().contains("Final Velocity (m/s)"));
    assert!(table.contains("1.41"));
    assert_eq!(table.lines().count(), 4);
    assert_eq!(fmt_num(f64::NAN, 3), "-");
    assert_eq!(fmt_num(2.0, 1), "2.0");
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn empty_scenario_uses_defaults() {
    let cfg = ScenarioConfig::from_yaml_str("").unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();

    assert_eq!(scenario.config, SimulationConfig::default());
    assert_eq!(scenario.config.mass, 2.0);
    assert_eq!(scenario.config.force, 0.0);
    assert_eq!(scenario.config.track_length, 1.0);
    assert_eq!(scenario.simulation_speed, 1.0);
    assert_relative_eq!(scenario.jitter.factor(), 0.05);
}

#[test]
fn partial_scenario_overrides_fields() {
    let yaml = "
cart:
  force: 1.5
track:
  pixel_length: 300.0
engine:
  jitter:
    enabled: false
";
    let scenario = Scenario::build_scenario(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap();

    assert_eq!(scenario.config.mass, 2.0);
    assert_eq!(scenario.config.force, 1.5);
    assert_eq!(scenario.track.pixel_length, 300.0);
    assert!(!scenario.jitter.is_enabled());
}

#[test_case("track:\n  length: 0.0\n"; "zero track")]
#[test_case("track:\n  pixel_length: -5.0\n"; "negative pixels")]
#[test_case("engine:\n  simulation_speed: 0.0\n"; "zero speed")]
#[test_case("engine:\n  jitter:\n    factor: 1.5\n"; "jitter too large")]
fn invalid_scenarios_are_rejected(yaml: &str) {
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    assert!(matches!(Scenario::build_scenario(cfg), Err(SimError::InvalidInput { .. })));
}

#[test]
fn malformed_yaml_is_an_error() {
    assert!(matches!(ScenarioConfig::from_yaml_str("cart: [1, 2"), Err(SimError::Yaml(_))));
}

#[test]
fn bundled_scenarios_load() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for name in ["default.yaml", "heavy_cart.yaml", "exact.yaml"] {
        let cfg = ScenarioConfig::from_path(&dir.join(name)).unwrap();
        assert!(Scenario::build_scenario(cfg).is_ok(), "{name}");
    }
}

// ==================================================================================
// Viewer helpers
// ==================================================================================

#[test]
fn cart_and_arrow_sizes() {
    assert_eq!(cart_scale(1.0), 1.0);
    assert_relative_eq!(cart_scale(3.0), 1.2);
    assert_eq!(force_arrow_width(0.0), 10.0);
    assert_eq!(force_arrow_width(1.0), 40.0);
    assert_eq!(force_arrow_width(-1.0), 6.0);
}
