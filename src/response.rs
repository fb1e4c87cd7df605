//! Time-domain response analysis
//!
//! The simulation horizon follows the slowest-decaying pole: for a strictly
//! stable pole set `T_settle = max(4/|max Re|, 1)`, otherwise a fixed 10 s
//! fallback. Step and impulse responses are then sampled on one shared grid
//! of 1000 evenly spaced points over `[0, 4·T_settle]`.

use num_complex::Complex64;
use serde::Serialize;

use crate::state_space::StateSpace;
use crate::transfer_function::{TransferFunction, COEFF_EPSILON};

/// Number of samples in a time response grid.
pub const RESPONSE_SAMPLES: usize = 1000;

/// A sampled time response.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeResponse {
    /// Sample times, ascending
    pub t: Vec<f64>,
    /// Response values, one per sample time
    pub y: Vec<f64>,
}

/// Settling-time estimate that drives the simulation horizon.
///
/// Reads the largest pole real part; only a strictly negative, finite value
/// gives a pole-derived horizon (clamped below at one second). Anything
/// else, including an empty pole set, falls back to 10 s.
pub fn settling_horizon(poles: &[Complex64]) -> f64 {
    let max_real = poles
        .iter()
        .map(|p| p.re)
        .fold(f64::NEG_INFINITY, f64::max);
    if max_real < 0.0 && max_real.is_finite() {
        (4.0 / max_real.abs()).max(1.0)
    } else {
        10.0
    }
}

/// Evenly spaced grid of `n` points over `[0, end]`, both ends included.
pub fn time_grid(end: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![0.0; n];
    }
    (0..n)
        .map(|i| end * i as f64 / (n - 1) as f64)
        .collect()
}

/// Unit step and unit impulse responses of a transfer function, evaluated
/// on the same automatically chosen time grid.
pub fn step_and_impulse(tf: &TransferFunction) -> (TimeResponse, TimeResponse) {
    let t_settle = settling_horizon(&tf.poles());
    let t = time_grid(4.0 * t_settle, RESPONSE_SAMPLES);

    // Exact cancellation in the loop can leave the clamped pair improper or
    // with a zero leading denominator coefficient; neither has a companion
    // realization, so the degenerate placeholder is simulated instead.
    let ss = StateSpace::try_from_transfer_function(tf).unwrap_or_else(|| {
        StateSpace::from_transfer_function(&TransferFunction::new(
            vec![COEFF_EPSILON],
            vec![1.0, 1.0],
        ))
    });
    let step = ss.step_response(&t);
    let impulse = ss.impulse_response(&t);

    (
        TimeResponse { t: t.clone(), y: step },
        TimeResponse { t, y: impulse },
    )
}
