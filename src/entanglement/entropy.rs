// src/entanglement/entropy.rs

//! Entanglement computed from the amplitude vector.

use crate::core::constants::PROBABILITY_EPSILON;
use crate::core::{QentlError, QuantumRegister, Result};
use num_complex::Complex64;
use num_traits::Zero;

/// Row-major 4x4 complex matrix over the local basis |a b>.
pub type Matrix4 = [[Complex64; 4]; 4];

fn check_pair(register: &QuantumRegister, a: usize, b: usize) -> Result<()> {
    register.check_qubit(a)?;
    register.check_qubit(b)?;
    if a == b {
        return Err(QentlError::DuplicateQubit { qubit: a });
    }
    Ok(())
}

/// Two-qubit reduced density matrix ρ_ab, tracing out every other qubit.
///
/// Local index `2·bit_a + bit_b`, so entry `[1][2]` is <a=0,b=1|ρ|a=1,b=0>.
pub fn reduced_density_matrix(register: &QuantumRegister, a: usize, b: usize) -> Result<Matrix4> {
    check_pair(register, a, b)?;
    let mask_a = 1usize << a;
    let mask_b = 1usize << b;
    let local_bits = |local: usize| -> usize {
        (if local & 2 != 0 { mask_a } else { 0 }) | (if local & 1 != 0 { mask_b } else { 0 })
    };

    let amplitudes = register.amplitudes();
    let mut rho = [[Complex64::zero(); 4]; 4];
    for base in (0..amplitudes.len()).filter(|i| i & (mask_a | mask_b) == 0) {
        for (row, rho_row) in rho.iter_mut().enumerate() {
            let psi_row = amplitudes[base | local_bits(row)];
            if psi_row.is_zero() {
                continue;
            }
            for (col, entry) in rho_row.iter_mut().enumerate() {
                *entry += psi_row * amplitudes[base | local_bits(col)].conj();
            }
        }
    }
    Ok(rho)
}

/// Von Neumann entropy (base 2) of qubit `a`'s reduced state, obtained by
/// tracing `b` out of ρ_ab. Ranges over [0, 1]: 0 for product states, 1 for
/// a Bell pair.
///
/// For a pure two-qubit state this is the entanglement entropy of the pair.
/// When other qubits also carry correlations with `a` the value is an upper
/// bound on the pairwise entanglement.
pub fn calculate_entanglement(register: &QuantumRegister, a: usize, b: usize) -> Result<f64> {
    let rho = reduced_density_matrix(register, a, b)?;

    // ρ_a[x][y] = Σ_k ρ_ab[2x+k][2y+k]
    let p = (rho[0][0] + rho[1][1]).re;
    let s = (rho[2][2] + rho[3][3]).re;
    let q = rho[0][2] + rho[1][3];

    let trace = p + s;
    if trace <= PROBABILITY_EPSILON {
        return Ok(0.0);
    }
    let half_gap = (((p - s) / 2.0).powi(2) + q.norm_sqr()).sqrt();
    let eigenvalues = [(trace / 2.0 + half_gap) / trace, (trace / 2.0 - half_gap) / trace];

    let entropy: f64 = eigenvalues
        .iter()
        .filter(|&&lambda| lambda > PROBABILITY_EPSILON)
        .map(|&lambda| -lambda * lambda.log2())
        .sum();
    Ok(entropy.clamp(0.0, 1.0))
}
