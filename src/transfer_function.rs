//! Transfer function in numerator/denominator polynomial form
//!
//! Represents a SISO LTI system as a ratio of polynomials in the Laplace
//! variable s:
//!
//! ```text
//! H(s) = B(s) / A(s) = (b_n s^n + ... + b_0) / (a_m s^m + ... + a_0)
//! ```
//!
//! Coefficients are stored in **descending powers** of s, so
//! `num = [1.0], den = [1.0, 1.0]` is `1/(s + 1)`.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::polynomial;

/// Threshold below which a coefficient (or a derived scalar such as a DC
/// denominator) is treated as numerically zero.
pub const COEFF_EPSILON: f64 = 1e-12;

/// SISO transfer function as numerator/denominator coefficient vectors.
///
/// # Example
///
/// ```
/// use linsys::transfer_function::TransferFunction;
///
/// // H(s) = 2/(s + 1)
/// let tf = TransferFunction::new(vec![2.0], vec![1.0, 1.0]);
/// assert_eq!(tf.dc_gain(), 2.0);
/// assert_eq!(tf.poles().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransferFunction {
    /// Numerator coefficients, descending powers of s
    pub num: Vec<f64>,
    /// Denominator coefficients, descending powers of s
    pub den: Vec<f64>,
}

impl TransferFunction {
    /// Create a transfer function from raw coefficient vectors.
    pub fn new(num: Vec<f64>, den: Vec<f64>) -> Self {
        Self { num, den }
    }

    /// Replace a degenerate numerator or denominator with a safe placeholder.
    ///
    /// If every numerator coefficient is below [`COEFF_EPSILON`] in magnitude
    /// (or the numerator is empty) it becomes `[1e-12]`; a degenerate
    /// denominator becomes `[1, 1]`. This keeps downstream realization and
    /// root finding away from the identically-zero polynomial.
    pub fn clamp_degenerate(mut self) -> Self {
        if self.num.iter().all(|c| c.abs() < COEFF_EPSILON) {
            self.num = vec![COEFF_EPSILON];
        }
        if self.den.iter().all(|c| c.abs() < COEFF_EPSILON) {
            self.den = vec![1.0, 1.0];
        }
        self
    }

    /// Steady-state gain H(0).
    ///
    /// Falls back to 1 when the constant denominator coefficient is
    /// numerically zero (a pole at the origin has no finite DC gain).
    pub fn dc_gain(&self) -> f64 {
        let num0 = self.num.last().copied().unwrap_or(0.0);
        let den0 = self.den.last().copied().unwrap_or(0.0);
        if den0.abs() > COEFF_EPSILON {
            num0 / den0
        } else {
            1.0
        }
    }

    /// Evaluate H(s) at a complex point.
    pub fn eval(&self, s: Complex64) -> Complex64 {
        polynomial::eval_complex(&self.num, s) / polynomial::eval_complex(&self.den, s)
    }

    /// Roots of the denominator polynomial, in solver order.
    pub fn poles(&self) -> Vec<Complex64> {
        polynomial::roots(&self.den)
    }

    /// Roots of the numerator polynomial, in solver order.
    pub fn zeros(&self) -> Vec<Complex64> {
        polynomial::roots(&self.num)
    }
}

/// Write a coefficient vector as a polynomial in s, every coefficient
/// included in order (zeros as well, so the exact vector is recoverable).
fn fmt_poly(f: &mut fmt::Formatter<'_>, coeffs: &[f64]) -> fmt::Result {
    if coeffs.is_empty() {
        return write!(f, "0");
    }
    let degree = coeffs.len() - 1;
    for (i, &c) in coeffs.iter().enumerate() {
        if i == 0 {
            if c < 0.0 {
                write!(f, "-")?;
            }
        } else if c < 0.0 {
            write!(f, " - ")?;
        } else {
            write!(f, " + ")?;
        }
        write!(f, "{}", c.abs())?;
        match degree - i {
            0 => {}
            1 => write!(f, " s")?,
            p => write!(f, " s^{}", p)?,
        }
    }
    Ok(())
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        fmt_poly(f, &self.num)?;
        write!(f, ") / (")?;
        fmt_poly(f, &self.den)?;
        write!(f, ")")
    }
}
