//! Plant models: five parameterizations of a low-order linear plant
//!
//! Each variant carries the raw parameters of one input convention and maps
//! them to the same canonical form, a transfer function in descending-power
//! coefficients plus the descriptive scalars (ωn, ζ, DC gain):
//!
//! ```text
//! TimeConstant      K/(τs + 1)
//! NaturalFrequency  K·ωn² / (s² + 2ζωn·s + ωn²)
//! OdeCoeffs         a2·y″ + a1·y′ + a0·y = b·u
//! LaplaceTf         b0 / (a2·s² + a1·s + a0)
//! StateSpace        C(sI - A)⁻¹B  with  B = [0;1], C = [1,0], D = 0
//! ```
//!
//! Parameters that would put a zero in a denominator are floored away from
//! zero rather than rejected, so the conversion is total.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::params::ParamSpec;
use crate::transfer_function::{TransferFunction, COEFF_EPSILON};

/// Smallest admissible magnitude for parameters that end up in a denominator.
const PARAM_FLOOR: f64 = 1e-6;

/// Identifies one of the five plant parameterizations, in selection order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantKind {
    TimeConstant,
    NaturalFrequency,
    OdeCoeffs,
    LaplaceTf,
    StateSpace,
}

const TIME_CONSTANT_PARAMS: [ParamSpec; 2] = [
    ParamSpec { name: "Time Constant", symbol: "τ", default: 1.0, min: 0.1, max: 10.0, step: 0.1 },
    ParamSpec { name: "DC Gain", symbol: "K", default: 1.0, min: 0.1, max: 10.0, step: 0.1 },
];

const NATURAL_FREQUENCY_PARAMS: [ParamSpec; 3] = [
    ParamSpec { name: "Natural Frequency", symbol: "ωn", default: 5.0, min: 0.1, max: 50.0, step: 0.5 },
    ParamSpec { name: "Damping Ratio", symbol: "ζ", default: 0.7, min: 0.01, max: 2.0, step: 0.05 },
    ParamSpec { name: "DC Gain", symbol: "K", default: 1.0, min: 0.1, max: 10.0, step: 0.1 },
];

const ODE_COEFFS_PARAMS: [ParamSpec; 4] = [
    ParamSpec { name: "Coefficient of y″", symbol: "a2", default: 1.0, min: 0.0, max: 10.0, step: 0.1 },
    ParamSpec { name: "Coefficient of y′", symbol: "a1", default: 7.0, min: 0.0, max: 50.0, step: 0.1 },
    ParamSpec { name: "Coefficient of y", symbol: "a0", default: 25.0, min: 0.0, max: 500.0, step: 0.5 },
    ParamSpec { name: "Coefficient of u", symbol: "b", default: 25.0, min: 0.0, max: 100.0, step: 0.5 },
];

const LAPLACE_TF_PARAMS: [ParamSpec; 4] = [
    ParamSpec { name: "Numerator", symbol: "b0", default: 25.0, min: 0.0, max: 100.0, step: 0.5 },
    ParamSpec { name: "Denominator s²", symbol: "a2", default: 1.0, min: 0.01, max: 10.0, step: 0.1 },
    ParamSpec { name: "Denominator s", symbol: "a1", default: 7.0, min: 0.0, max: 50.0, step: 0.1 },
    ParamSpec { name: "Denominator 1", symbol: "a0", default: 25.0, min: 0.0, max: 500.0, step: 0.5 },
];

const STATE_SPACE_PARAMS: [ParamSpec; 4] = [
    ParamSpec { name: "State Matrix Entry", symbol: "A11", default: 0.0, min: -50.0, max: 50.0, step: 0.5 },
    ParamSpec { name: "State Matrix Entry", symbol: "A12", default: 1.0, min: -50.0, max: 50.0, step: 0.5 },
    ParamSpec { name: "State Matrix Entry", symbol: "A21", default: -25.0, min: -50.0, max: 50.0, step: 0.5 },
    ParamSpec { name: "State Matrix Entry", symbol: "A22", default: -7.0, min: -50.0, max: 50.0, step: 0.5 },
];

impl PlantKind {
    /// All kinds, in index order.
    pub const ALL: [PlantKind; 5] = [
        PlantKind::TimeConstant,
        PlantKind::NaturalFrequency,
        PlantKind::OdeCoeffs,
        PlantKind::LaplaceTf,
        PlantKind::StateSpace,
    ];

    /// Resolve a raw kind index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this kind in the selection order.
    pub fn index(self) -> usize {
        match self {
            PlantKind::TimeConstant => 0,
            PlantKind::NaturalFrequency => 1,
            PlantKind::OdeCoeffs => 2,
            PlantKind::LaplaceTf => 3,
            PlantKind::StateSpace => 4,
        }
    }

    /// Display name of the parameterization.
    pub fn name(self) -> &'static str {
        match self {
            PlantKind::TimeConstant => "Time Constant (1st Order)",
            PlantKind::NaturalFrequency => "Natural Frequency & Damping",
            PlantKind::OdeCoeffs => "ODE Coefficients",
            PlantKind::LaplaceTf => "Laplace Transfer Function",
            PlantKind::StateSpace => "State Space Matrix",
        }
    }

    /// Parameter descriptors, one per raw-vector slot.
    pub fn param_specs(self) -> &'static [ParamSpec] {
        match self {
            PlantKind::TimeConstant => &TIME_CONSTANT_PARAMS,
            PlantKind::NaturalFrequency => &NATURAL_FREQUENCY_PARAMS,
            PlantKind::OdeCoeffs => &ODE_COEFFS_PARAMS,
            PlantKind::LaplaceTf => &LAPLACE_TF_PARAMS,
            PlantKind::StateSpace => &STATE_SPACE_PARAMS,
        }
    }

    /// Plant of this kind with all parameters at their defaults.
    pub fn defaults(self) -> Plant {
        match self {
            PlantKind::TimeConstant => Plant::TimeConstant { tau: 1.0, gain: 1.0 },
            PlantKind::NaturalFrequency => Plant::NaturalFrequency {
                omega_n: 5.0,
                zeta: 0.7,
                gain: 1.0,
            },
            PlantKind::OdeCoeffs => Plant::OdeCoeffs { a2: 1.0, a1: 7.0, a0: 25.0, b: 25.0 },
            PlantKind::LaplaceTf => Plant::LaplaceTf { b0: 25.0, a2: 1.0, a1: 7.0, a0: 25.0 },
            PlantKind::StateSpace => Plant::StateSpace {
                a11: 0.0,
                a12: 1.0,
                a21: -25.0,
                a22: -7.0,
            },
        }
    }
}

/// A plant in one of the five parameterizations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Plant {
    /// First-order lag K/(τs + 1)
    TimeConstant { tau: f64, gain: f64 },
    /// Standard second-order form K·ωn²/(s² + 2ζωn·s + ωn²)
    NaturalFrequency { omega_n: f64, zeta: f64, gain: f64 },
    /// Scalar ODE a2·y″ + a1·y′ + a0·y = b·u
    OdeCoeffs { a2: f64, a1: f64, a0: f64, b: f64 },
    /// Second-order Laplace-domain ratio b0/(a2·s² + a1·s + a0)
    LaplaceTf { b0: f64, a2: f64, a1: f64, a0: f64 },
    /// Two-state system with fixed B = [0;1], C = [1,0], D = 0
    StateSpace { a11: f64, a12: f64, a21: f64, a22: f64 },
}

/// Descriptive scalars computed alongside the plant transfer function.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlantCharacteristics {
    /// Natural frequency ωn in rad/s
    pub omega_n: f64,
    /// Damping ratio ζ
    pub zeta: f64,
    /// Steady-state gain
    pub dc_gain: f64,
}

/// Canonical plant representation: transfer function plus characteristics.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlantModel {
    pub tf: TransferFunction,
    pub characteristics: PlantCharacteristics,
}

impl Plant {
    /// The kind tag of this plant.
    pub fn kind(&self) -> PlantKind {
        match self {
            Plant::TimeConstant { .. } => PlantKind::TimeConstant,
            Plant::NaturalFrequency { .. } => PlantKind::NaturalFrequency,
            Plant::OdeCoeffs { .. } => PlantKind::OdeCoeffs,
            Plant::LaplaceTf { .. } => PlantKind::LaplaceTf,
            Plant::StateSpace { .. } => PlantKind::StateSpace,
        }
    }

    /// Build a plant from a kind and its ordered parameter vector.
    pub fn from_values(kind: PlantKind, values: &[f64]) -> Result<Self, EngineError> {
        let expected = kind.param_specs().len();
        if values.len() != expected {
            return Err(EngineError::ParameterCount {
                kind: kind.name(),
                expected,
                got: values.len(),
            });
        }
        Ok(match kind {
            PlantKind::TimeConstant => Plant::TimeConstant { tau: values[0], gain: values[1] },
            PlantKind::NaturalFrequency => Plant::NaturalFrequency {
                omega_n: values[0],
                zeta: values[1],
                gain: values[2],
            },
            PlantKind::OdeCoeffs => Plant::OdeCoeffs {
                a2: values[0],
                a1: values[1],
                a0: values[2],
                b: values[3],
            },
            PlantKind::LaplaceTf => Plant::LaplaceTf {
                b0: values[0],
                a2: values[1],
                a1: values[2],
                a0: values[3],
            },
            PlantKind::StateSpace => Plant::StateSpace {
                a11: values[0],
                a12: values[1],
                a21: values[2],
                a22: values[3],
            },
        })
    }

    /// The ordered parameter vector of this plant (inverse of `from_values`).
    pub fn values(&self) -> Vec<f64> {
        match *self {
            Plant::TimeConstant { tau, gain } => vec![tau, gain],
            Plant::NaturalFrequency { omega_n, zeta, gain } => vec![omega_n, zeta, gain],
            Plant::OdeCoeffs { a2, a1, a0, b } => vec![a2, a1, a0, b],
            Plant::LaplaceTf { b0, a2, a1, a0 } => vec![b0, a2, a1, a0],
            Plant::StateSpace { a11, a12, a21, a22 } => vec![a11, a12, a21, a22],
        }
    }

    /// Convert to the canonical transfer function plus characteristics.
    pub fn model(&self) -> PlantModel {
        match *self {
            Plant::TimeConstant { tau, gain } => {
                // Prevent a zero denominator
                let tau = tau.max(PARAM_FLOOR);
                PlantModel {
                    tf: TransferFunction::new(vec![gain], vec![tau, 1.0]),
                    characteristics: PlantCharacteristics {
                        omega_n: 1.0 / tau,
                        zeta: 1.0,
                        dc_gain: gain,
                    },
                }
            }
            Plant::NaturalFrequency { omega_n, zeta, gain } => PlantModel {
                tf: TransferFunction::new(
                    vec![gain * omega_n * omega_n],
                    vec![1.0, 2.0 * zeta * omega_n, omega_n * omega_n],
                ),
                characteristics: PlantCharacteristics { omega_n, zeta, dc_gain: gain },
            },
            Plant::OdeCoeffs { a2, a1, a0, b } => ode_model(a2, a1, a0, b),
            // Same formulas with (b0, a2, a1, a0) in place of (b, a2, a1, a0)
            Plant::LaplaceTf { b0, a2, a1, a0 } => ode_model(a2, a1, a0, b0),
            Plant::StateSpace { a11, a12, a21, a22 } => {
                // H(s) = C(sI - A)⁻¹B = A12 / (s² - tr(A)·s + det(A))
                let det = a11 * a22 - a12 * a21;
                let trace = a11 + a22;
                let tf = TransferFunction::new(vec![a12], vec![1.0, -trace, det]);
                let (omega_n, zeta) = if det > 0.0 {
                    let wn = det.sqrt();
                    (wn, -trace / (2.0 * wn))
                } else {
                    (1.0, 1.0)
                };
                let dc_gain = if det.abs() > COEFF_EPSILON { a12 / det } else { 1.0 };
                PlantModel {
                    tf,
                    characteristics: PlantCharacteristics { omega_n, zeta, dc_gain },
                }
            }
        }
    }
}

impl Default for Plant {
    fn default() -> Self {
        PlantKind::TimeConstant.defaults()
    }
}

/// Shared conversion for the ODE and Laplace parameterizations, which
/// normalize to the same monic second-order form.
fn ode_model(a2: f64, a1: f64, a0: f64, b: f64) -> PlantModel {
    let a2 = a2.abs().max(PARAM_FLOOR);
    let a0 = a0.abs().max(PARAM_FLOOR);
    let tf = TransferFunction::new(
        vec![(b / a2).max(COEFF_EPSILON)],
        vec![1.0, a1 / a2, a0 / a2],
    );
    let omega_n = if a0 / a2 > 0.0 { (a0 / a2).sqrt() } else { 1.0 };
    let zeta = if a0 * a2 > 0.0 {
        a1 / (2.0 * (a0 * a2).sqrt())
    } else {
        1.0
    };
    let dc_gain = if a0.abs() > COEFF_EPSILON { b / a0 } else { 1.0 };
    PlantModel {
        tf,
        characteristics: PlantCharacteristics { omega_n, zeta, dc_gain },
    }
}
