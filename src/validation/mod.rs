// src/validation/mod.rs

//! Provides functions to validate amplitude vectors and gate matrices.

use crate::core::constants::{NORM_TOLERANCE, UNITARY_TOLERANCE};
use crate::core::{QentlError, QuantumRegister, Result};
use crate::operations::Matrix2;
use num_complex::Complex64;
use num_traits::{One, Zero};
use tracing::warn;

/// Checks that Σ|c_i|² ≈ 1.
///
/// # Arguments
/// * `amplitudes` - The amplitudes to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to [`NORM_TOLERANCE`].
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QentlError::NotNormalized)` otherwise.
pub fn check_normalization(amplitudes: &[Complex64], tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sqr: f64 = amplitudes.iter().map(|c| c.norm_sqr()).sum();
    // Written so that a NaN norm fails the check.
    if !((norm_sqr - 1.0).abs() <= effective_tolerance) {
        warn!(norm_sqr, effective_tolerance, "normalization check failed");
        return Err(QentlError::NotNormalized { norm_sqr });
    }
    Ok(())
}

/// Checks that `matrix` is unitary: every entry of U†U - I is within tolerance.
///
/// # Arguments
/// * `matrix` - Row-major 2x2 matrix.
/// * `tolerance` - Defaults to [`UNITARY_TOLERANCE`].
pub fn check_unitary(matrix: &Matrix2, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(UNITARY_TOLERANCE);
    if matrix.iter().flatten().any(|c| !c.is_finite()) {
        warn!("gate matrix has non-finite entries");
        return Err(QentlError::NotUnitary { deviation: f64::NAN });
    }
    let mut deviation: f64 = 0.0;
    for row in 0..2 {
        for col in 0..2 {
            // (U†U)[row][col] = Σ_k conj(U[k][row]) · U[k][col]
            let product: Complex64 = (0..2).map(|k| matrix[k][row].conj() * matrix[k][col]).sum();
            let identity = if row == col { Complex64::one() } else { Complex64::zero() };
            let d = (product - identity).norm();
            // f64::max would drop a NaN here
            if d.is_nan() || d > deviation {
                deviation = d;
            }
        }
    }
    if !(deviation <= effective_tolerance) {
        return Err(QentlError::NotUnitary { deviation });
    }
    Ok(())
}

/// Performs basic validation checks on a register.
/// Currently only checks normalization.
pub fn validate_register(register: &QuantumRegister, norm_tolerance: Option<f64>) -> Result<()> {
    check_normalization(register.amplitudes(), norm_tolerance)
}
