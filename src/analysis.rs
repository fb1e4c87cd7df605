//! One-call analysis pipeline
//!
//! Runs the full chain for a plant/controller pair: plant modeling,
//! closed-loop synthesis, step and impulse simulation, Bode sweep with
//! crossover extraction, and pole-based stability metrics. The result is a
//! single serializable [`Analysis`] record.
//!
//! [`analyze`] takes typed [`Plant`] and [`Controller`] values and cannot
//! fail; [`analyze_raw`] accepts kind indices and flat parameter vectors,
//! validating them first. The raw form is the natural entry point for
//! callers driven by configuration data rather than Rust types.

use serde::Serialize;

use crate::closed_loop::ClosedLoopSystem;
use crate::controller::{Controller, ControllerKind};
use crate::error::EngineError;
use crate::frequency::{self, CrossoverFrequencies, FrequencyResponse};
use crate::metrics::{self, StabilityMetrics};
use crate::plant::{Plant, PlantCharacteristics, PlantKind};
use crate::response::{self, TimeResponse};
use crate::transfer_function::TransferFunction;

/// Everything the engine computes for one plant/controller pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis {
    /// Open-loop plant transfer function
    pub plant_tf: TransferFunction,
    /// ωn, ζ and DC gain of the plant alone
    pub plant_characteristics: PlantCharacteristics,
    /// Synthesized closed loop with its poles and zeros
    pub closed_loop: ClosedLoopSystem,
    /// Closed-loop unit step response
    pub step: TimeResponse,
    /// Closed-loop unit impulse response
    pub impulse: TimeResponse,
    /// Closed-loop Bode data
    pub frequency: FrequencyResponse,
    /// Bandwidth and phase crossovers read off the Bode data
    pub crossovers: CrossoverFrequencies,
    /// Pole-based stability summary
    pub metrics: StabilityMetrics,
}

/// Run the complete analysis for a typed plant/controller pair.
pub fn analyze(plant: &Plant, controller: &Controller) -> Analysis {
    let model = plant.model();
    let closed_loop = ClosedLoopSystem::synthesize(plant, controller);
    let (step, impulse) = response::step_and_impulse(&closed_loop.tf);
    let frequency = frequency::frequency_response(&closed_loop.tf);
    let crossovers = frequency::crossover_frequencies(&frequency);
    let metrics = metrics::stability_metrics(&closed_loop.poles);

    Analysis {
        plant_tf: model.tf,
        plant_characteristics: model.characteristics,
        closed_loop,
        step,
        impulse,
        frequency,
        crossovers,
        metrics,
    }
}

/// Run the complete analysis from kind indices and flat parameter vectors.
///
/// Plant kinds are indexed 0..=4 and controller kinds 0..=2, in the order
/// of [`PlantKind::ALL`] and [`ControllerKind::ALL`]. Parameter vectors
/// must match the arity of the corresponding `param_specs`.
pub fn analyze_raw(
    plant_kind: usize,
    plant_params: &[f64],
    controller_kind: usize,
    controller_params: &[f64],
) -> Result<Analysis, EngineError> {
    let plant_kind =
        PlantKind::from_index(plant_kind).ok_or(EngineError::UnknownPlantKind(plant_kind))?;
    let controller_kind = ControllerKind::from_index(controller_kind)
        .ok_or(EngineError::UnknownControllerKind(controller_kind))?;

    let plant = Plant::from_values(plant_kind, plant_params)?;
    let controller = Controller::from_values(controller_kind, controller_params)?;
    Ok(analyze(&plant, &controller))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FREQUENCY_POINTS;
    use crate::response::RESPONSE_SAMPLES;
    use approx::assert_relative_eq;

    #[test]
    fn test_uncontrolled_second_order_plant() {
        let plant = Plant::NaturalFrequency {
            omega_n: 5.0,
            zeta: 0.7,
            gain: 1.0,
        };
        let analysis = analyze(&plant, &Controller::None);

        // No controller: the closed loop is the plant itself
        assert_eq!(analysis.closed_loop.tf, analysis.plant_tf);
        assert_eq!(analysis.plant_tf.num, vec![25.0]);
        assert_eq!(analysis.plant_tf.den, vec![1.0, 7.0, 25.0]);

        assert_relative_eq!(analysis.plant_characteristics.omega_n, 5.0);
        assert_relative_eq!(analysis.plant_characteristics.zeta, 0.7);
        assert!(analysis.metrics.is_stable);
        assert_relative_eq!(analysis.metrics.omega_n, 5.0, epsilon = 1e-9);
        assert_relative_eq!(analysis.metrics.zeta, 0.7, epsilon = 1e-9);

        assert_eq!(analysis.step.t.len(), RESPONSE_SAMPLES);
        assert_eq!(analysis.impulse.y.len(), RESPONSE_SAMPLES);
        assert_eq!(analysis.frequency.omega.len(), FREQUENCY_POINTS);

        // Unit DC gain: the step settles at 1
        assert_relative_eq!(*analysis.step.y.last().unwrap(), 1.0, epsilon = 1e-6);
        assert!(analysis.crossovers.bandwidth_3db.is_some());
    }

    #[test]
    fn test_raw_entry_point_matches_typed_call() {
        let typed = analyze(
            &Plant::TimeConstant {
                tau: 2.0,
                gain: 3.0,
            },
            &Controller::Pid {
                kp: 4.0,
                ki: 1.0,
                kd: 0.0,
            },
        );
        let raw = analyze_raw(0, &[2.0, 3.0], 1, &[4.0, 1.0, 0.0]).unwrap();
        assert_eq!(typed, raw);
    }

    #[test]
    fn test_raw_entry_point_rejects_bad_kinds() {
        assert_eq!(
            analyze_raw(9, &[], 0, &[]),
            Err(EngineError::UnknownPlantKind(9))
        );
        assert_eq!(
            analyze_raw(0, &[1.0, 1.0], 7, &[]),
            Err(EngineError::UnknownControllerKind(7))
        );
    }

    #[test]
    fn test_raw_entry_point_rejects_bad_arity() {
        let err = analyze_raw(0, &[1.0], 0, &[]).unwrap_err();
        assert_eq!(
            err,
            EngineError::ParameterCount {
                kind: "Time Constant (1st Order)",
                expected: 2,
                got: 1,
            }
        );
    }

    #[test]
    fn test_metrics_use_closed_loop_poles() {
        let analysis = analyze_raw(4, &[0.0, 1.0, -25.0, -7.0], 2, &[1.0, 1.0]).unwrap();
        let recomputed = metrics::stability_metrics(&analysis.closed_loop.poles);
        assert_eq!(analysis.metrics, recomputed);
    }

    #[test]
    fn test_analysis_serializes_to_json() {
        let analysis = analyze_raw(1, &[5.0, 0.7, 1.0], 0, &[]).unwrap();
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["plant_tf"]["den"][1], 7.0);
        assert_eq!(json["metrics"]["is_stable"], true);
        assert!(json["closed_loop"]["poles"][0]["re"].is_number());
        assert!(json["crossovers"]["bandwidth_3db"].is_number());
        assert_eq!(json["step"]["t"][0], 0.0);
    }
}
