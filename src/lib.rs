//! linsys - Linear control-system analysis engine
//!
//! Models a small family of first- and second-order plants, closes the loop
//! with PID or state-feedback controllers, and computes everything a
//! classical analysis needs: poles and zeros, step and impulse responses,
//! Bode data with crossover frequencies, and pole-based stability metrics.
//!
//! # Architecture
//!
//! The engine is a pure function pipeline with no internal state:
//! - Plants and controllers are plain enums, buildable from kind indices
//!   and flat parameter vectors
//! - Closed loops are synthesized by polynomial algebra over coefficient
//!   vectors in descending powers of s
//! - Time responses come from an exact zero-order-hold discretization of
//!   the controllable canonical realization
//! - All results land in one serializable [`Analysis`] record
//!
//! # Example
//!
//! ```rust,ignore
//! use linsys::prelude::*;
//!
//! // Second-order plant with ωn = 5 rad/s and ζ = 0.7, under PID control
//! let plant = Plant::NaturalFrequency { omega_n: 5.0, zeta: 0.7, gain: 1.0 };
//! let controller = Controller::Pid { kp: 2.0, ki: 1.0, kd: 0.1 };
//! let analysis = analyze(&plant, &controller);
//!
//! assert!(analysis.metrics.is_stable);
//! println!("bandwidth: {:?} rad/s", analysis.crossovers.bandwidth_3db);
//! ```

// Engine modules
pub mod analysis;
pub mod closed_loop;
pub mod controller;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod params;
pub mod plant;
pub mod polynomial;
pub mod response;
pub mod state_space;
pub mod transfer_function;

pub use analysis::{analyze, analyze_raw, Analysis};
pub use closed_loop::ClosedLoopSystem;
pub use controller::{Controller, ControllerKind};
pub use error::EngineError;
pub use frequency::{CrossoverFrequencies, FrequencyResponse};
pub use metrics::StabilityMetrics;
pub use params::ParamSpec;
pub use plant::{Plant, PlantCharacteristics, PlantKind, PlantModel};
pub use response::TimeResponse;
pub use state_space::StateSpace;
pub use transfer_function::TransferFunction;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analysis::{analyze, analyze_raw, Analysis};
    pub use crate::closed_loop::ClosedLoopSystem;
    pub use crate::controller::{Controller, ControllerKind};
    pub use crate::error::EngineError;
    pub use crate::frequency::{
        crossover_frequencies, frequency_response, CrossoverFrequencies, FrequencyResponse,
    };
    pub use crate::metrics::{stability_metrics, StabilityMetrics};
    pub use crate::params::ParamSpec;
    pub use crate::plant::{Plant, PlantCharacteristics, PlantKind, PlantModel};
    pub use crate::response::{step_and_impulse, TimeResponse};
    pub use crate::state_space::StateSpace;
    pub use crate::transfer_function::TransferFunction;
}
