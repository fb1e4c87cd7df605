//! Closed-loop synthesis
//!
//! Composes a plant and a controller into a single closed-loop transfer
//! function:
//!
//! - **No controller**: the plant transfer function passes through
//!   unchanged, the loop stays open.
//! - **PID**: series connection C(s)·G(s) by polynomial convolution, then
//!   unity feedback: `num_cl = num_ol`, `den_cl = den_ol + num_ol` (the
//!   shorter polynomial zero-padded on the left before the addition).
//! - **State feedback, StateSpace plant**: exact closure on the state
//!   matrix, `A_cl = A - B·K` with `B = [0;1]`, characteristic polynomial
//!   `s² - tr(A_cl)·s + det(A_cl)`.
//! - **State feedback, any other plant**: the summed gain `K1 + K2` scales
//!   the plant numerator before unity-feedback closure.
//!
//! The last two branches intentionally disagree: only the StateSpace
//! parameterization carries the state matrix the exact closure needs, so
//! every other plant gets the scalar output-feedback approximation. Both
//! behaviors are kept as-is.
//!
//! After synthesis the degeneracy clamp replaces an all-negligible
//! numerator or denominator with a safe placeholder.

use nalgebra::Matrix2;
use num_complex::Complex64;
use serde::Serialize;

use crate::controller::Controller;
use crate::plant::Plant;
use crate::polynomial;
use crate::transfer_function::{TransferFunction, COEFF_EPSILON};

/// A synthesized closed loop with its cached pole and zero sets.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClosedLoopSystem {
    /// Closed-loop transfer function
    pub tf: TransferFunction,
    /// Roots of the denominator, in solver order
    pub poles: Vec<Complex64>,
    /// Roots of the numerator, in solver order
    pub zeros: Vec<Complex64>,
}

impl ClosedLoopSystem {
    /// Compose plant and controller into the closed-loop system.
    pub fn synthesize(plant: &Plant, controller: &Controller) -> Self {
        let plant_tf = plant.model().tf;
        let tf = match *controller {
            Controller::None => plant_tf,
            Controller::Pid { kp, ki, kd } => {
                // C(s) = (Kd·s² + Kp·s + Ki)/s in series with the plant
                let num_ol = polynomial::convolve(&[kd, kp, ki], &plant_tf.num);
                let den_ol = polynomial::convolve(&[1.0, 0.0], &plant_tf.den);
                unity_feedback(num_ol, den_ol)
            }
            Controller::StateFeedback { k1, k2 } => match *plant {
                Plant::StateSpace { a11, a12, a21, a22 } => {
                    state_feedback_closure(a11, a12, a21, a22, k1, k2)
                }
                _ => {
                    // Only the StateSpace plant exposes its state matrix;
                    // everywhere else the gains collapse to output feedback
                    let k_eff = k1 + k2;
                    let num_ol: Vec<f64> = plant_tf.num.iter().map(|&c| k_eff * c).collect();
                    unity_feedback(num_ol, plant_tf.den.clone())
                }
            },
        }
        .clamp_degenerate();

        let poles = polynomial::roots(&tf.den);
        let zeros = polynomial::roots(&tf.num);
        Self { tf, poles, zeros }
    }

    /// Steady-state gain of the closed loop.
    pub fn dc_gain(&self) -> f64 {
        self.tf.dc_gain()
    }
}

/// Close the loop with unity feedback: H = G/(1 + G).
fn unity_feedback(num_ol: Vec<f64>, den_ol: Vec<f64>) -> TransferFunction {
    let den_cl = polynomial::add(&den_ol, &num_ol);
    TransferFunction::new(num_ol, den_cl)
}

/// Exact two-state closure: A_cl = A - B·K with B = [0;1], so feedback only
/// alters the second row of A.
fn state_feedback_closure(
    a11: f64,
    a12: f64,
    a21: f64,
    a22: f64,
    k1: f64,
    k2: f64,
) -> TransferFunction {
    let a_cl = Matrix2::new(a11, a12, a21 - k1, a22 - k2);
    let den = vec![1.0, -a_cl.trace(), a_cl.determinant()];
    // Numerator C·adj(sI - A_cl)·B with C = [1,0], B = [0;1]
    let b01 = if a_cl[(0, 1)].abs() < COEFF_EPSILON {
        1e-6
    } else {
        a_cl[(0, 1)]
    };
    TransferFunction::new(vec![0.0, 0.0, b01], den)
}
