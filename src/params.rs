//! Parameter metadata shared by plant and controller kinds
//!
//! Every kind publishes one [`ParamSpec`] per raw-vector slot, in slot
//! order. UI layers use these to build their input widgets; the engine uses
//! them to validate vector arity and to supply default values.

use serde::Serialize;

/// Describes one scalar parameter slot of a plant or controller kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ParamSpec {
    /// Human-readable parameter name, e.g. "Natural Frequency"
    pub name: &'static str,
    /// Short symbol used in labels and reports, e.g. "ωn"
    pub symbol: &'static str,
    /// Default value
    pub default: f64,
    /// Lower bound suggested to input widgets
    pub min: f64,
    /// Upper bound suggested to input widgets
    pub max: f64,
    /// Suggested widget increment
    pub step: f64,
}
