//! Controller types composed with the plant
//!
//! Three controller laws:
//!
//! ```text
//! None           identity, the loop stays open
//! PID            C(s) = Kp + Ki/s + Kd·s = (Kd·s² + Kp·s + Ki)/s
//! StateFeedback  u = -K·x, gains K1 and K2 on the two plant states
//! ```
//!
//! State feedback is not a transfer function acting on the tracking error;
//! how it closes the loop depends on the plant parameterization (see the
//! closed-loop synthesis module).

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::params::ParamSpec;
use crate::transfer_function::TransferFunction;

/// Identifies one of the three controller types, in selection order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerKind {
    None,
    Pid,
    StateFeedback,
}

const NO_PARAMS: [ParamSpec; 0] = [];

const PID_PARAMS: [ParamSpec; 3] = [
    ParamSpec { name: "Proportional Gain", symbol: "Kp", default: 1.0, min: 0.0, max: 100.0, step: 0.1 },
    ParamSpec { name: "Integral Gain", symbol: "Ki", default: 0.0, min: 0.0, max: 50.0, step: 0.1 },
    ParamSpec { name: "Derivative Gain", symbol: "Kd", default: 0.0, min: 0.0, max: 20.0, step: 0.1 },
];

const STATE_FEEDBACK_PARAMS: [ParamSpec; 2] = [
    ParamSpec { name: "State Feedback Gain", symbol: "K1", default: 1.0, min: -100.0, max: 100.0, step: 0.5 },
    ParamSpec { name: "State Feedback Gain", symbol: "K2", default: 1.0, min: -100.0, max: 100.0, step: 0.5 },
];

impl ControllerKind {
    /// All kinds, in index order.
    pub const ALL: [ControllerKind; 3] = [
        ControllerKind::None,
        ControllerKind::Pid,
        ControllerKind::StateFeedback,
    ];

    /// Resolve a raw kind index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this kind in the selection order.
    pub fn index(self) -> usize {
        match self {
            ControllerKind::None => 0,
            ControllerKind::Pid => 1,
            ControllerKind::StateFeedback => 2,
        }
    }

    /// Display name of the controller type.
    pub fn name(self) -> &'static str {
        match self {
            ControllerKind::None => "None",
            ControllerKind::Pid => "PID Controller",
            ControllerKind::StateFeedback => "State Feedback",
        }
    }

    /// Parameter descriptors, one per raw-vector slot.
    pub fn param_specs(self) -> &'static [ParamSpec] {
        match self {
            ControllerKind::None => &NO_PARAMS,
            ControllerKind::Pid => &PID_PARAMS,
            ControllerKind::StateFeedback => &STATE_FEEDBACK_PARAMS,
        }
    }

    /// Controller of this kind with all gains at their defaults.
    pub fn defaults(self) -> Controller {
        match self {
            ControllerKind::None => Controller::None,
            ControllerKind::Pid => Controller::Pid { kp: 1.0, ki: 0.0, kd: 0.0 },
            ControllerKind::StateFeedback => Controller::StateFeedback { k1: 1.0, k2: 1.0 },
        }
    }
}

/// A controller in one of the three laws.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    /// No controller, the plant runs open loop
    None,
    /// PID gains applied to the tracking error
    Pid { kp: f64, ki: f64, kd: f64 },
    /// Feedback gains on the two plant states
    StateFeedback { k1: f64, k2: f64 },
}

impl Controller {
    /// The kind tag of this controller.
    pub fn kind(&self) -> ControllerKind {
        match self {
            Controller::None => ControllerKind::None,
            Controller::Pid { .. } => ControllerKind::Pid,
            Controller::StateFeedback { .. } => ControllerKind::StateFeedback,
        }
    }

    /// Build a controller from a kind and its ordered parameter vector.
    pub fn from_values(kind: ControllerKind, values: &[f64]) -> Result<Self, EngineError> {
        let expected = kind.param_specs().len();
        if values.len() != expected {
            return Err(EngineError::ParameterCount {
                kind: kind.name(),
                expected,
                got: values.len(),
            });
        }
        Ok(match kind {
            ControllerKind::None => Controller::None,
            ControllerKind::Pid => Controller::Pid {
                kp: values[0],
                ki: values[1],
                kd: values[2],
            },
            ControllerKind::StateFeedback => Controller::StateFeedback {
                k1: values[0],
                k2: values[1],
            },
        })
    }

    /// The ordered parameter vector of this controller.
    pub fn values(&self) -> Vec<f64> {
        match *self {
            Controller::None => Vec::new(),
            Controller::Pid { kp, ki, kd } => vec![kp, ki, kd],
            Controller::StateFeedback { k1, k2 } => vec![k1, k2],
        }
    }

    /// The controller's own transfer function, when it has one.
    ///
    /// `None` is the identity. State feedback acts on the plant state rather
    /// than the tracking error and has no transfer function of its own.
    pub fn transfer_function(&self) -> Option<TransferFunction> {
        match *self {
            Controller::None => Some(TransferFunction::new(vec![1.0], vec![1.0])),
            Controller::Pid { kp, ki, kd } => {
                Some(TransferFunction::new(vec![kd, kp, ki], vec![1.0, 0.0]))
            }
            Controller::StateFeedback { .. } => None,
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Controller::None
    }
}
