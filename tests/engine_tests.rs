//! Full-pipeline engine tests
//!
//! Sweeps every plant kind against every controller kind at default
//! parameters and checks that the complete analysis stays finite and well
//! formed, that repeated runs are bit-identical, and that the raw-input
//! boundary validates kinds and arities with usable error messages.

use approx::assert_relative_eq;
use linsys::frequency::FREQUENCY_POINTS;
use linsys::prelude::*;
use linsys::response::RESPONSE_SAMPLES;

/// Every value the analysis produces must be a real number; poles, samples
/// and Bode data included.
fn assert_analysis_finite(analysis: &Analysis) {
    assert!(analysis.step.t.iter().all(|v| v.is_finite()));
    assert!(analysis.step.y.iter().all(|v| v.is_finite()));
    assert!(analysis.impulse.y.iter().all(|v| v.is_finite()));
    assert!(analysis.frequency.magnitude_db.iter().all(|v| v.is_finite()));
    assert!(analysis.frequency.phase_deg.iter().all(|v| v.is_finite()));
    assert!(analysis
        .closed_loop
        .poles
        .iter()
        .all(|p| p.re.is_finite() && p.im.is_finite()));
    assert!(analysis.metrics.omega_n.is_finite());
    assert!(analysis.metrics.zeta.is_finite());
    if let Some(v) = analysis.metrics.overshoot_pct {
        assert!(v.is_finite());
    }
    if let Some(v) = analysis.metrics.settling_time {
        assert!(v.is_finite());
    }
}

#[test]
fn test_every_kind_combination_analyzes_cleanly() {
    for plant_kind in PlantKind::ALL {
        for controller_kind in ControllerKind::ALL {
            let plant = plant_kind.defaults();
            let controller = controller_kind.defaults();
            let analysis = analyze(&plant, &controller);

            assert_eq!(analysis.step.t.len(), RESPONSE_SAMPLES);
            assert_eq!(analysis.step.y.len(), RESPONSE_SAMPLES);
            assert_eq!(analysis.impulse.y.len(), RESPONSE_SAMPLES);
            assert_eq!(analysis.frequency.omega.len(), FREQUENCY_POINTS);
            assert_analysis_finite(&analysis);
        }
    }
}

#[test]
fn test_loop_cancelling_gains_analyze_cleanly() {
    // Negative gains outside the suggested ranges can cancel the open loop
    // exactly. Kp = Kd = -1 against 1/(s + 1) zeroes the whole closed-loop
    // denominator: the clamp replaces it with [1,1], whose pole at -1 drives
    // the metrics and the grid, and the leftover length-3 numerator has no
    // realization, so the responses fall back to the placeholder
    let analysis = analyze(
        &Plant::TimeConstant { tau: 1.0, gain: 1.0 },
        &Controller::Pid { kp: -1.0, ki: 0.0, kd: -1.0 },
    );
    assert_eq!(analysis.closed_loop.tf.den, vec![1.0, 1.0]);
    assert!(analysis.metrics.is_stable);
    assert_relative_eq!(analysis.metrics.omega_n, 1.0, epsilon = 1e-9);
    assert_relative_eq!(analysis.metrics.settling_time.unwrap(), 4.0, epsilon = 1e-9);
    assert_relative_eq!(*analysis.step.t.last().unwrap(), 16.0, epsilon = 1e-12);
    assert!(analysis.step.y.iter().all(|y| y.abs() <= 1e-11));
    assert_analysis_finite(&analysis);

    // Kd = -1 alone zeroes only the leading denominator coefficient; the
    // remaining [0,1,0] keeps its origin root and the fallback horizon
    let analysis = analyze(
        &Plant::TimeConstant { tau: 1.0, gain: 1.0 },
        &Controller::Pid { kp: 0.0, ki: 0.0, kd: -1.0 },
    );
    assert_eq!(analysis.closed_loop.tf.den, vec![0.0, 1.0, 0.0]);
    assert!(!analysis.metrics.is_stable);
    assert_eq!(analysis.metrics.overshoot_pct, None);
    assert_relative_eq!(*analysis.step.t.last().unwrap(), 40.0, epsilon = 1e-12);
    assert_analysis_finite(&analysis);
}

#[test]
fn test_repeated_runs_are_bit_identical() {
    let plant = Plant::OdeCoeffs { a2: 1.0, a1: 7.0, a0: 25.0, b: 25.0 };
    let controller = Controller::Pid { kp: 2.0, ki: 1.0, kd: 0.1 };

    let first = analyze(&plant, &controller);
    let second = analyze(&plant, &controller);
    assert_eq!(first, second);
}

#[test]
fn test_default_second_order_report() {
    // The default Natural Frequency plant, uncontrolled: ωn = 5, ζ = 0.7,
    // about 4.6% overshoot and a 1.14 s settling time
    let analysis = analyze(
        &PlantKind::NaturalFrequency.defaults(),
        &ControllerKind::None.defaults(),
    );

    assert!(analysis.metrics.is_stable);
    assert_relative_eq!(analysis.metrics.omega_n, 5.0, epsilon = 1e-9);
    assert_relative_eq!(analysis.metrics.zeta, 0.7, epsilon = 1e-9);

    let overshoot = analysis.metrics.overshoot_pct.unwrap();
    assert!((overshoot - 4.6).abs() < 0.1, "overshoot {}", overshoot);
    assert_relative_eq!(
        analysis.metrics.settling_time.unwrap(),
        4.0 / 3.5,
        epsilon = 1e-9
    );
}

#[test]
fn test_plant_metadata_is_consistent() {
    let expected_names = [
        "Time Constant (1st Order)",
        "Natural Frequency & Damping",
        "ODE Coefficients",
        "Laplace Transfer Function",
        "State Space Matrix",
    ];

    for (i, kind) in PlantKind::ALL.into_iter().enumerate() {
        assert_eq!(kind.index(), i);
        assert_eq!(PlantKind::from_index(i), Some(kind));
        assert_eq!(kind.name(), expected_names[i]);

        // Defaults must obey the declared specs
        let defaults = kind.defaults();
        let values = defaults.values();
        let specs = kind.param_specs();
        assert_eq!(values.len(), specs.len());
        for (value, spec) in values.iter().zip(specs) {
            assert_eq!(*value, spec.default);
            assert!(spec.min <= *value && *value <= spec.max, "{}", spec.name);
            assert!(spec.step > 0.0);
        }

        // And rebuilding from those values is lossless
        assert_eq!(Plant::from_values(kind, &values), Ok(defaults));
    }
    assert_eq!(PlantKind::from_index(5), None);
}

#[test]
fn test_controller_metadata_is_consistent() {
    let expected_names = ["None", "PID Controller", "State Feedback"];

    for (i, kind) in ControllerKind::ALL.into_iter().enumerate() {
        assert_eq!(kind.index(), i);
        assert_eq!(ControllerKind::from_index(i), Some(kind));
        assert_eq!(kind.name(), expected_names[i]);

        let defaults = kind.defaults();
        let values = defaults.values();
        assert_eq!(values.len(), kind.param_specs().len());
        assert_eq!(Controller::from_values(kind, &values), Ok(defaults));
    }
    assert_eq!(ControllerKind::from_index(3), None);
}

#[test]
fn test_raw_boundary_error_messages() {
    let err = analyze_raw(9, &[], 0, &[]).unwrap_err();
    assert_eq!(err.to_string(), "Unknown plant kind index 9 (expected 0..=4)");

    let err = analyze_raw(0, &[1.0, 1.0], 5, &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown controller kind index 5 (expected 0..=2)"
    );

    let err = analyze_raw(4, &[1.0], 0, &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "State Space Matrix takes 4 parameters, got 1"
    );
}

#[test]
fn test_analysis_serializes_with_full_structure() {
    let analysis = analyze_raw(2, &[1.0, 7.0, 25.0, 25.0], 1, &[2.0, 1.0, 0.1]).unwrap();
    let json = serde_json::to_value(&analysis).unwrap();

    let top = json.as_object().unwrap();
    for key in [
        "plant_tf",
        "plant_characteristics",
        "closed_loop",
        "step",
        "impulse",
        "frequency",
        "crossovers",
        "metrics",
    ] {
        assert!(top.contains_key(key), "missing key {}", key);
    }

    // Complex poles serialize with explicit re/im parts
    let pole = &json["closed_loop"]["poles"][0];
    assert!(pole["re"].is_number() && pole["im"].is_number());

    // Absent crossovers serialize as null, present ones as numbers
    assert!(json["crossovers"]["bandwidth_3db"].is_number());
}
