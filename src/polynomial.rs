//! Polynomial algebra on real coefficient vectors
//!
//! Polynomials are represented as coefficient slices in **descending powers**
//! of s: `[c_n, c_{n-1}, ..., c_1, c_0]` represents
//! `c_n*s^n + c_{n-1}*s^{n-1} + ... + c_0`.
//!
//! Root finding follows the classical companion-matrix construction: for a
//! degree-n polynomial the n×n companion matrix has `-p[1..]/p[0]` as its
//! first row and ones on the first subdiagonal; its eigenvalues are the
//! polynomial's roots. Exactly-zero leading coefficients are ignored and
//! exactly-zero trailing coefficients contribute one root at the origin each.

use nalgebra::DMatrix;
use num_complex::Complex64;

/// Multiply two polynomials (discrete convolution of coefficient vectors).
///
/// The product of a degree-n and a degree-m polynomial has degree n+m, so
/// the result has `a.len() + b.len() - 1` coefficients.
pub fn convolve(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Add two polynomials of possibly different degree.
///
/// The shorter coefficient vector is zero-padded on the left (high-degree
/// side) to the longer one's length, then the vectors are summed
/// elementwise. The result always has `max(a.len(), b.len())` coefficients.
pub fn add(a: &[f64], b: &[f64]) -> Vec<f64> {
    let n = a.len().max(b.len());
    let mut out = vec![0.0; n];
    for (i, &c) in a.iter().rev().enumerate() {
        out[n - 1 - i] += c;
    }
    for (i, &c) in b.iter().rev().enumerate() {
        out[n - 1 - i] += c;
    }
    out
}

/// Evaluate a polynomial at a real point using Horner's method.
pub fn eval(coeffs: &[f64], s: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * s + c)
}

/// Evaluate a polynomial with real coefficients at a complex point.
pub fn eval_complex(coeffs: &[f64], s: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * s + c)
}

/// Compute all roots of a polynomial.
///
/// Leading coefficients that are exactly zero are stripped; trailing zero
/// coefficients are stripped and re-emitted as roots at the origin, appended
/// after the eigenvalue roots. The remaining core polynomial is solved
/// through the eigenvalues of its companion matrix.
///
/// The ordering of the eigenvalue roots is whatever the eigensolver
/// produces; callers must not rely on any particular order. An identically
/// zero (or empty) polynomial has no roots.
pub fn roots(coeffs: &[f64]) -> Vec<Complex64> {
    let first_nonzero = match coeffs.iter().position(|&c| c != 0.0) {
        Some(i) => i,
        None => return Vec::new(),
    };
    let trimmed = &coeffs[first_nonzero..];
    let trailing_zeros = trimmed.iter().rev().take_while(|&&c| c == 0.0).count();
    let core = &trimmed[..trimmed.len() - trailing_zeros];

    let n = core.len() - 1;
    let mut out = Vec::with_capacity(n + trailing_zeros);

    if n > 0 {
        let mut companion = DMatrix::<f64>::zeros(n, n);
        for j in 0..n {
            companion[(0, j)] = -core[j + 1] / core[0];
        }
        for i in 1..n {
            companion[(i, i - 1)] = 1.0;
        }
        out.extend(companion.complex_eigenvalues().iter().copied());
    }

    out.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(trailing_zeros));
    out
}
