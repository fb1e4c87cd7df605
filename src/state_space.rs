//! State-space realization and simulation of LTI transfer functions
//!
//! Converts a proper transfer function H(s) = B(s)/A(s) into the canonical
//! companion realization
//!
//! ```text
//! dx/dt = Ax + Bu        A = [-a_{n-1} -a_{n-2} ... -a_0]    B = [1]
//! y     = Cx + Du            [   1        0     ...   0 ]        [0]
//!                            [   ⋮        ⋱           ⋮ ]        [⋮]
//!                            [   0        ...    1    0 ]        [0]
//! ```
//!
//! with the denominator normalized to monic form, D taken from the leading
//! numerator coefficient when degrees are equal, and C from the strictly
//! proper remainder.
//!
//! Time responses are produced by exact zero-order-hold discretization: with
//! uniform step dt, the pair (Ad, Bd) is read out of the augmented matrix
//! exponential exp([[A,B],[0,0]]·dt), and the state is advanced as
//! x_{k+1} = Ad·x_k + Bd·u_k. For piecewise-constant inputs this matches the
//! continuous solution at the sample instants to solver precision, with no
//! step-size stability limit.
//!
//! References:
//! - Ogata, K. (2010). Modern Control Engineering (5th ed.). Section 5.6
//! - Franklin, Powell, Workman (1998). Digital Control of Dynamic Systems. Ch. 4

use nalgebra::{DMatrix, DVector};

use crate::transfer_function::TransferFunction;

/// Companion-form state-space realization of a SISO transfer function.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSpace {
    /// State matrix (n×n)
    a: DMatrix<f64>,
    /// Input vector (n×1)
    b: DVector<f64>,
    /// Output row, stored as a vector (n×1)
    c: DVector<f64>,
    /// Direct feedthrough
    d: f64,
}

impl StateSpace {
    /// Realize a proper transfer function in companion form.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is empty, its leading coefficient is zero,
    /// or the numerator degree exceeds the denominator degree (improper
    /// system). Use [`Self::try_from_transfer_function`] for inputs that may
    /// have these shapes.
    pub fn from_transfer_function(tf: &TransferFunction) -> Self {
        let num = &tf.num;
        let den = &tf.den;
        assert!(!den.is_empty(), "Denominator cannot be empty");
        assert!(
            den[0] != 0.0,
            "Leading coefficient of denominator cannot be zero"
        );
        assert!(
            num.len() <= den.len(),
            "Improper transfer function (numerator degree > denominator degree) not supported. \
             Got num.len()={}, den.len()={}",
            num.len(),
            den.len()
        );

        Self::realize(num, den)
    }

    /// Realize a transfer function that may have no companion form.
    ///
    /// Exact-zero leading denominator coefficients are stripped first, the
    /// same way the root finder strips them. Returns `None` when every
    /// denominator coefficient is zero, or when the numerator is longer than
    /// the stripped denominator (improper system).
    pub fn try_from_transfer_function(tf: &TransferFunction) -> Option<Self> {
        let first_nonzero = tf.den.iter().position(|&c| c != 0.0)?;
        let den = &tf.den[first_nonzero..];
        if tf.num.len() > den.len() {
            return None;
        }
        Some(Self::realize(&tf.num, den))
    }

    fn realize(num: &[f64], den: &[f64]) -> Self {
        // Normalize denominator to monic and pad numerator to equal length
        let leading_coeff = den[0];
        let den_norm: Vec<f64> = den.iter().map(|&x| x / leading_coeff).collect();
        let mut num_norm: Vec<f64> = num.iter().map(|&x| x / leading_coeff).collect();
        while num_norm.len() < den_norm.len() {
            num_norm.insert(0, 0.0);
        }

        let n = den_norm.len() - 1;

        // After padding, the top coefficient is the direct feedthrough
        let d = num_norm[0];

        // C comes from the strictly proper remainder num - D*den
        let mut c = DVector::zeros(n);
        for i in 0..n {
            c[i] = num_norm[i + 1] - d * den_norm[i + 1];
        }

        let mut a = DMatrix::zeros(n, n);
        let mut b = DVector::zeros(n);
        if n > 0 {
            for j in 0..n {
                a[(0, j)] = -den_norm[j + 1];
            }
            for i in 1..n {
                a[(i, i - 1)] = 1.0;
            }
            b[0] = 1.0;
        }

        Self { a, b, c, d }
    }

    /// Number of states.
    pub fn order(&self) -> usize {
        self.a.nrows()
    }

    /// State matrix A.
    pub fn a_matrix(&self) -> &DMatrix<f64> {
        &self.a
    }

    /// Input vector B.
    pub fn b_vector(&self) -> &DVector<f64> {
        &self.b
    }

    /// Output row C (as a vector).
    pub fn c_vector(&self) -> &DVector<f64> {
        &self.c
    }

    /// Direct feedthrough D.
    pub fn d_scalar(&self) -> f64 {
        self.d
    }

    /// Zero-order-hold discretization for step size `dt`.
    ///
    /// Returns (Ad, Bd) such that `x_{k+1} = Ad·x_k + Bd·u_k` reproduces the
    /// continuous state exactly when the input is constant over each step.
    pub fn discretize(&self, dt: f64) -> (DMatrix<f64>, DVector<f64>) {
        let n = self.order();
        let mut aug = DMatrix::<f64>::zeros(n + 1, n + 1);
        aug.view_mut((0, 0), (n, n)).copy_from(&self.a);
        aug.view_mut((0, n), (n, 1)).copy_from(&self.b);
        let phi = (aug * dt).exp();
        let ad = phi.view((0, 0), (n, n)).into_owned();
        let bd = phi.column(n).rows(0, n).into_owned();
        (ad, bd)
    }

    /// Propagate the system over a uniform time grid with constant input `u`
    /// from initial state `x`, sampling y = Cx + Du at each grid point.
    fn simulate_constant_input(&self, t: &[f64], u: f64, mut x: DVector<f64>) -> Vec<f64> {
        if t.is_empty() {
            return Vec::new();
        }
        if self.order() == 0 {
            // Pure gain, no dynamics
            return t.iter().map(|_| self.d * u).collect();
        }
        let dt = if t.len() > 1 { t[1] - t[0] } else { 0.0 };
        let (ad, bd) = self.discretize(dt);

        let mut y = Vec::with_capacity(t.len());
        for _ in t {
            y.push(self.c.dot(&x) + self.d * u);
            x = &ad * &x + &bd * u;
        }
        y
    }

    /// Unit step response sampled on a uniform time grid.
    pub fn step_response(&self, t: &[f64]) -> Vec<f64> {
        let x0 = DVector::zeros(self.order());
        self.simulate_constant_input(t, 1.0, x0)
    }

    /// Unit impulse response sampled on a uniform time grid.
    ///
    /// The impulse enters through the initial state, x(0) = B with zero
    /// input thereafter; a D·δ(t) feedthrough spike is not representable in
    /// sampled form and is omitted.
    pub fn impulse_response(&self, t: &[f64]) -> Vec<f64> {
        self.simulate_constant_input(t, 0.0, self.b.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn linspace(end: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| end * i as f64 / (n - 1) as f64).collect()
    }

    #[test]
    fn test_realization_first_order() {
        // H(s) = 1/(s + 1): A = [-1], B = [1], C = [1], D = 0
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 1.0]);
        let ss = StateSpace::from_transfer_function(&tf);
        assert_eq!(ss.order(), 1);
        assert_relative_eq!(ss.a_matrix()[(0, 0)], -1.0);
        assert_relative_eq!(ss.b_vector()[0], 1.0);
        assert_relative_eq!(ss.c_vector()[0], 1.0);
        assert_relative_eq!(ss.d_scalar(), 0.0);
    }

    #[test]
    fn test_realization_normalizes_denominator() {
        // H(s) = 2/(2s + 4) = 1/(s + 2)
        let tf = TransferFunction::new(vec![2.0], vec![2.0, 4.0]);
        let ss = StateSpace::from_transfer_function(&tf);
        assert_relative_eq!(ss.a_matrix()[(0, 0)], -2.0);
        assert_relative_eq!(ss.c_vector()[0], 1.0);
    }

    #[test]
    fn test_realization_second_order() {
        // H(s) = 1/(s² + 2s + 2)
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 2.0, 2.0]);
        let ss = StateSpace::from_transfer_function(&tf);
        assert_eq!(ss.order(), 2);
        assert_relative_eq!(ss.a_matrix()[(0, 0)], -2.0);
        assert_relative_eq!(ss.a_matrix()[(0, 1)], -2.0);
        assert_relative_eq!(ss.a_matrix()[(1, 0)], 1.0);
        assert_relative_eq!(ss.a_matrix()[(1, 1)], 0.0);
        assert_relative_eq!(ss.c_vector()[0], 0.0);
        assert_relative_eq!(ss.c_vector()[1], 1.0);
    }

    #[test]
    fn test_realization_with_feedthrough() {
        // H(s) = (s + 1)/(s + 2) = 1 - 1/(s + 2): D = 1, C = [-1]
        let tf = TransferFunction::new(vec![1.0, 1.0], vec![1.0, 2.0]);
        let ss = StateSpace::from_transfer_function(&tf);
        assert_relative_eq!(ss.d_scalar(), 1.0);
        assert_relative_eq!(ss.c_vector()[0], -1.0);
    }

    #[test]
    fn test_try_realization_matches_assertive_path() {
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 2.0, 2.0]);
        let ss = StateSpace::try_from_transfer_function(&tf);
        assert_eq!(ss, Some(StateSpace::from_transfer_function(&tf)));
    }

    #[test]
    fn test_try_realization_strips_leading_denominator_zeros() {
        // [0,1,1] carries the same dynamics as [1,1]: H(s) = 5/(s + 1)
        let tf = TransferFunction::new(vec![5.0], vec![0.0, 1.0, 1.0]);
        let ss = StateSpace::try_from_transfer_function(&tf).unwrap();
        assert_eq!(ss.order(), 1);
        assert_relative_eq!(ss.a_matrix()[(0, 0)], -1.0);
        assert_relative_eq!(ss.c_vector()[0], 5.0);
    }

    #[test]
    fn test_try_realization_rejects_improper_pairs() {
        // num longer than den
        let tf = TransferFunction::new(vec![-1.0, -1.0, 0.0], vec![1.0, 1.0]);
        assert!(StateSpace::try_from_transfer_function(&tf).is_none());
        // num longer than den once the leading zero is stripped
        let tf = TransferFunction::new(vec![-1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]);
        assert!(StateSpace::try_from_transfer_function(&tf).is_none());
        // den identically zero
        let tf = TransferFunction::new(vec![1.0], vec![0.0, 0.0]);
        assert!(StateSpace::try_from_transfer_function(&tf).is_none());
    }

    #[test]
    fn test_discretize_integrator() {
        // Integrator 1/s: Ad = [1], Bd = [dt]
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 0.0]);
        let ss = StateSpace::from_transfer_function(&tf);
        let (ad, bd) = ss.discretize(0.25);
        assert_relative_eq!(ad[(0, 0)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(bd[0], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_discretize_first_order_exact() {
        // dx/dt = -x + u: Ad = e^{-dt}, Bd = 1 - e^{-dt}
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 1.0]);
        let ss = StateSpace::from_transfer_function(&tf);
        let dt = 0.1;
        let (ad, bd) = ss.discretize(dt);
        assert_relative_eq!(ad[(0, 0)], (-dt).exp(), epsilon = 1e-12);
        assert_relative_eq!(bd[0], 1.0 - (-dt).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_step_response_matches_analytic_first_order() {
        // Step of 1/(s + 1) is 1 - e^{-t}
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 1.0]);
        let ss = StateSpace::from_transfer_function(&tf);
        let t = linspace(5.0, 101);
        let y = ss.step_response(&t);
        for (ti, yi) in t.iter().zip(&y) {
            assert_relative_eq!(*yi, 1.0 - (-ti).exp(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_impulse_response_matches_analytic_first_order() {
        // Impulse of 1/(s + 1) is e^{-t}
        let tf = TransferFunction::new(vec![1.0], vec![1.0, 1.0]);
        let ss = StateSpace::from_transfer_function(&tf);
        let t = linspace(5.0, 101);
        let y = ss.impulse_response(&t);
        for (ti, yi) in t.iter().zip(&y) {
            assert_relative_eq!(*yi, (-ti).exp(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_step_response_with_feedthrough_starts_at_high_frequency_gain() {
        // H(s) = (s + 1)/(s + 2): step is 0.5 + 0.5 e^{-2t}, so y(0) = 1
        let tf = TransferFunction::new(vec![1.0, 1.0], vec![1.0, 2.0]);
        let ss = StateSpace::from_transfer_function(&tf);
        let t = linspace(4.0, 81);
        let y = ss.step_response(&t);
        for (ti, yi) in t.iter().zip(&y) {
            assert_relative_eq!(*yi, 0.5 + 0.5 * (-2.0 * ti).exp(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_step_response_underdamped_second_order() {
        // H(s) = 25/(s² + 7s + 25): wn = 5, zeta = 0.7
        let tf = TransferFunction::new(vec![25.0], vec![1.0, 7.0, 25.0]);
        let ss = StateSpace::from_transfer_function(&tf);
        let t = linspace(3.0, 301);
        let y = ss.step_response(&t);

        let zeta: f64 = 0.7;
        let wn: f64 = 5.0;
        let wd = wn * (1.0 - zeta * zeta).sqrt();
        let phi = (1.0 - zeta * zeta).sqrt().atan2(zeta);
        for (ti, yi) in t.iter().zip(&y) {
            let expected = 1.0
                - (-zeta * wn * ti).exp() / (1.0 - zeta * zeta).sqrt() * (wd * ti + phi).sin();
            assert_relative_eq!(*yi, expected, epsilon = 1e-8, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_stiff_system_stays_bounded() {
        // Widely separated poles: den = (s + 1)(s + 5000)
        let tf = TransferFunction::new(vec![5000.0], vec![1.0, 5001.0, 5000.0]);
        let ss = StateSpace::from_transfer_function(&tf);
        let t = linspace(20.0, 1000);
        let y = ss.step_response(&t);
        for yi in &y {
            assert!(yi.is_finite() && yi.abs() < 2.0, "response diverged: {}", yi);
        }
        // Settles to the DC gain
        assert_relative_eq!(*y.last().unwrap(), 1.0, epsilon = 1e-6);
    }
}
