//! Frequency-domain analysis
//!
//! Evaluates a transfer function along the imaginary axis on a fixed
//! logarithmic grid of 300 points from 1e-2 to 1e2 rad/s. Magnitude is
//! reported in dB and clipped to ±200 dB; phase is the unwrapped argument
//! in degrees, so higher-order systems descend through the crossover
//! targets monotonically instead of wrapping at ±180°.
//!
//! Named crossovers (the −3 dB bandwidth and the −45°/−90°/−135° phase
//! points) are located at the first grid sample at or below the target and
//! refined by linear interpolation against the preceding sample.

use num_complex::Complex64;
use serde::Serialize;
use std::f64::consts::TAU;

use crate::transfer_function::TransferFunction;

/// Number of points in the frequency grid.
pub const FREQUENCY_POINTS: usize = 300;
/// Lower edge of the frequency grid, rad/s.
pub const OMEGA_MIN: f64 = 1e-2;
/// Upper edge of the frequency grid, rad/s.
pub const OMEGA_MAX: f64 = 1e2;
/// Magnitude clip bound, dB.
pub const MAG_CLIP_DB: f64 = 200.0;

/// Bode data sampled on the standard grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrequencyResponse {
    /// Grid frequencies in rad/s, ascending and log-spaced
    pub omega: Vec<f64>,
    /// Magnitude in dB, clipped to ±[`MAG_CLIP_DB`]
    pub magnitude_db: Vec<f64>,
    /// Unwrapped phase in degrees
    pub phase_deg: Vec<f64>,
}

/// Interpolated crossover frequencies, each absent when the response never
/// reaches the target inside the grid (or already starts beyond it).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CrossoverFrequencies {
    /// First frequency where the magnitude falls to −3 dB
    pub bandwidth_3db: Option<f64>,
    /// First frequency where the phase falls to −45°
    pub phase_45: Option<f64>,
    /// First frequency where the phase falls to −90°
    pub phase_90: Option<f64>,
    /// First frequency where the phase falls to −135°
    pub phase_135: Option<f64>,
}

/// The standard logarithmic grid: [`FREQUENCY_POINTS`] frequencies from
/// [`OMEGA_MIN`] to [`OMEGA_MAX`].
pub fn frequency_grid() -> Vec<f64> {
    let lo = OMEGA_MIN.log10();
    let hi = OMEGA_MAX.log10();
    (0..FREQUENCY_POINTS)
        .map(|i| {
            let exponent = lo + (hi - lo) * i as f64 / (FREQUENCY_POINTS - 1) as f64;
            10f64.powf(exponent)
        })
        .collect()
}

/// Magnitude and unwrapped phase of H(jω) over the standard grid.
pub fn frequency_response(tf: &TransferFunction) -> FrequencyResponse {
    let omega = frequency_grid();
    let mut magnitude_db = Vec::with_capacity(omega.len());
    let mut phase = Vec::with_capacity(omega.len());

    for &w in &omega {
        let h = tf.eval(Complex64::new(0.0, w));
        let mag = 20.0 * h.norm().log10();
        magnitude_db.push(mag.clamp(-MAG_CLIP_DB, MAG_CLIP_DB));
        phase.push(h.arg());
    }

    unwrap_phase(&mut phase);
    let phase_deg = phase.iter().map(|p| p.to_degrees()).collect();

    FrequencyResponse {
        omega,
        magnitude_db,
        phase_deg,
    }
}

/// Locate all named crossovers in a computed response.
pub fn crossover_frequencies(resp: &FrequencyResponse) -> CrossoverFrequencies {
    CrossoverFrequencies {
        bandwidth_3db: first_crossing(&resp.omega, &resp.magnitude_db, -3.0),
        phase_45: first_crossing(&resp.omega, &resp.phase_deg, -45.0),
        phase_90: first_crossing(&resp.omega, &resp.phase_deg, -90.0),
        phase_135: first_crossing(&resp.omega, &resp.phase_deg, -135.0),
    }
}

/// In-place phase unwrap: each sample is shifted by the multiple of 2π that
/// keeps the jump from its predecessor within ±π.
fn unwrap_phase(phase: &mut [f64]) {
    for i in 1..phase.len() {
        let jump = phase[i] - phase[i - 1];
        phase[i] -= TAU * (jump / TAU).round();
    }
}

/// Frequency of the first sample at or below `target`, refined by linear
/// interpolation on the value axis. `None` when the series never reaches
/// the target, or when the very first sample is already past it.
fn first_crossing(omega: &[f64], values: &[f64], target: f64) -> Option<f64> {
    let idx = values.iter().position(|&v| v <= target)?;
    if idx == 0 {
        return None;
    }
    // values[idx-1] > target >= values[idx], so the segment slope is nonzero
    let (w0, w1) = (omega[idx - 1], omega[idx]);
    let (v0, v1) = (values[idx - 1], values[idx]);
    Some(w0 + (w1 - w0) * (target - v0) / (v1 - v0))
}
