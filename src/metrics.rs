//! Stability metrics from closed-loop pole locations
//!
//! The dominant-pole approximation reads the closed-loop natural frequency
//! and damping ratio off the first computed pole p:
//!
//! ```text
//! ωn = |p|
//! ζ  = -Re(p) / |p|    (complex pole; clamped below at 0)
//! ζ  = 1               (real pole)
//! ```
//!
//! and derives the classic second-order estimates
//!
//! ```text
//! Mp = 100·exp(-ζπ/√(1-ζ²))    percent overshoot,   0 < ζ < 1
//! Ts = 4/(ζωn)                 2% settling time
//! ```
//!
//! Overdamped systems overshoot by 0%; undamped or undefined cases report
//! no estimate at all rather than an infinite or NaN value.
//!
//! # References
//!
//! - Ogata, K. "Modern Control Engineering", 5th ed., Ch. 5.

use num_complex::Complex64;
use serde::Serialize;
use std::f64::consts::PI;

/// Poles with real part at or above this margin count as unstable.
pub const STABILITY_MARGIN: f64 = 1e-6;

/// Imaginary parts below this magnitude are treated as real poles.
const IMAG_TOLERANCE: f64 = 1e-6;

/// Pole-derived summary of the closed-loop dynamics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StabilityMetrics {
    /// True when every pole sits strictly left of -[`STABILITY_MARGIN`]
    pub is_stable: bool,
    /// Natural frequency of the first pole, rad/s
    pub omega_n: f64,
    /// Damping ratio of the first pole, in [0, 1]
    pub zeta: f64,
    /// Percent overshoot estimate, absent when undefined
    pub overshoot_pct: Option<f64>,
    /// 2% settling time estimate in seconds, absent when undefined
    pub settling_time: Option<f64>,
}

/// Compute [`StabilityMetrics`] from a pole set.
///
/// The first pole in the slice is taken as dominant; callers pass poles in
/// the order the eigenvalue solver produced them. An empty slice yields the
/// vacuous result: stable, ωn = 0, ζ = 1, no transient estimates.
pub fn stability_metrics(poles: &[Complex64]) -> StabilityMetrics {
    let is_stable = poles.iter().all(|p| p.re < -STABILITY_MARGIN);

    let (omega_n, zeta) = match poles.first() {
        Some(p) => {
            let omega_n = p.norm();
            let zeta = if p.im.abs() > IMAG_TOLERANCE {
                (-p.re / omega_n).max(0.0)
            } else {
                1.0
            };
            (omega_n, zeta)
        }
        None => (0.0, 1.0),
    };

    let (overshoot_pct, settling_time) = if zeta > 0.0 && zeta < 1.0 {
        let overshoot = 100.0 * (-zeta * PI / (1.0 - zeta * zeta).sqrt()).exp();
        let settling = if zeta * omega_n > 0.0 {
            Some(4.0 / (zeta * omega_n))
        } else {
            None
        };
        (Some(overshoot), settling)
    } else if zeta >= 1.0 && omega_n > 0.0 {
        (Some(0.0), Some(4.0 / (zeta * omega_n)))
    } else {
        (None, None)
    };

    StabilityMetrics {
        is_stable,
        omega_n,
        zeta,
        overshoot_pct,
        settling_time,
    }
}
