//! Engine error types

use thiserror::Error;

/// Errors raised at the raw-input boundary, where kind indices and parameter
/// vectors arrive untyped.
///
/// The numeric pipeline itself never fails: degenerate parameter values are
/// clamped to safe defaults instead of being rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown plant kind index {0} (expected 0..=4)")]
    UnknownPlantKind(usize),

    #[error("Unknown controller kind index {0} (expected 0..=2)")]
    UnknownControllerKind(usize),

    #[error("{kind} takes {expected} parameters, got {got}")]
    ParameterCount {
        kind: &'static str,
        expected: usize,
        got: usize,
    },
}
