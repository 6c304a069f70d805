// src/core/state.rs

use super::error::Result;
use crate::operations::{self, Matrix2};
use crate::validation;
use num_complex::Complex64;
use num_traits::{One, Zero};
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// A single, unentangled qubit α|0> + β|1>.
///
/// Unlike [`QuantumRegister`](crate::QuantumRegister), a `QubitState` is a
/// plain value: gate methods return a new state and leave `self` untouched.
/// Use [`QuantumRegister::from_qubits`](crate::QuantumRegister::from_qubits)
/// to lift a set of qubits into a joint register.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QubitState {
    alpha: Complex64,
    beta: Complex64,
}

impl QubitState {
    /// Creates α|0> + β|1>.
    ///
    /// # Errors
    /// `NotNormalized` unless |α|² + |β|² = 1 within tolerance.
    pub fn new(alpha: Complex64, beta: Complex64) -> Result<Self> {
        validation::check_normalization(&[alpha, beta], None)?;
        Ok(Self { alpha, beta })
    }

    /// |0>
    pub fn zero() -> Self {
        Self { alpha: Complex64::one(), beta: Complex64::zero() }
    }

    /// |1>
    pub fn one() -> Self {
        Self { alpha: Complex64::zero(), beta: Complex64::one() }
    }

    /// (|0> + |1>)/√2
    pub fn plus() -> Self {
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        Self { alpha: h, beta: h }
    }

    /// (|0> - |1>)/√2
    pub fn minus() -> Self {
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        Self { alpha: h, beta: -h }
    }

    /// cos(θ/2)|0> + e^(iφ) sin(θ/2)|1>
    pub fn from_bloch(theta: f64, phi: f64) -> Self {
        let (sin, cos) = (theta / 2.0).sin_cos();
        Self {
            alpha: Complex64::new(cos, 0.0),
            beta: Complex64::from_polar(sin, phi),
        }
    }

    pub fn alpha(&self) -> Complex64 {
        self.alpha
    }

    pub fn beta(&self) -> Complex64 {
        self.beta
    }

    /// |α|²
    pub fn probability_zero(&self) -> f64 {
        self.alpha.norm_sqr()
    }

    /// |β|²
    pub fn probability_one(&self) -> f64 {
        self.beta.norm_sqr()
    }

    /// Polar and azimuthal Bloch-sphere angles `(θ, φ)`, global phase removed.
    pub fn bloch_angles(&self) -> (f64, f64) {
        let theta = 2.0 * self.alpha.norm().clamp(0.0, 1.0).acos();
        let phi = if self.alpha.is_zero() || self.beta.is_zero() {
            0.0
        } else {
            self.beta.arg() - self.alpha.arg()
        };
        (theta, phi)
    }

    /// Returns `matrix · (α, β)`.
    pub fn apply(&self, matrix: &Matrix2) -> Self {
        Self {
            alpha: matrix[0][0] * self.alpha + matrix[0][1] * self.beta,
            beta: matrix[1][0] * self.alpha + matrix[1][1] * self.beta,
        }
    }

    pub fn hadamard(&self) -> Self {
        self.apply(&operations::hadamard_matrix())
    }

    pub fn pauli_x(&self) -> Self {
        self.apply(&operations::pauli_x_matrix())
    }

    pub fn pauli_y(&self) -> Self {
        self.apply(&operations::pauli_y_matrix())
    }

    pub fn pauli_z(&self) -> Self {
        self.apply(&operations::pauli_z_matrix())
    }

    pub fn rotate_x(&self, theta: f64) -> Self {
        self.apply(&operations::rotate_x_matrix(theta))
    }

    pub fn rotate_y(&self, theta: f64) -> Self {
        self.apply(&operations::rotate_y_matrix(theta))
    }

    pub fn rotate_z(&self, theta: f64) -> Self {
        self.apply(&operations::rotate_z_matrix(theta))
    }

    pub fn phase(&self, theta: f64) -> Self {
        self.apply(&operations::phase_matrix(theta))
    }

    /// Samples an outcome and returns it together with the collapsed state.
    pub fn measure<R>(&self, rng: &mut R) -> (u8, QubitState)
    where
        R: Rng + ?Sized,
    {
        let p0 = self.probability_zero();
        let sample: f64 = StandardUniform.sample(rng);
        if sample * (p0 + self.probability_one()) < p0 {
            (0, Self::zero())
        } else {
            (1, Self::one())
        }
    }
}

impl Default for QubitState {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for QubitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4})|0> + ({:.4})|1>", self.alpha, self.beta)
    }
}
