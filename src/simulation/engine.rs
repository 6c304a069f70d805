// src/simulation/engine.rs

//! In-place kernels over a 2^n amplitude slice.
//!
//! Qubit `q` is bit `q` of the basis index. The kernels assume their qubit
//! arguments were validated by the caller (see
//! [`QuantumRegister`](crate::QuantumRegister)); they never allocate.

use crate::operations::{Gate, Matrix2};
use num_complex::Complex64;
use num_traits::Zero;
use tracing::trace;

/// Applies a 2x2 matrix to qubit `target`.
///
/// Enumerates the dim/2 pairs `(i0, i0 | mask)` by inserting a zero bit at
/// position `target` into every counter value.
pub(crate) fn apply_single_qubit(amplitudes: &mut [Complex64], target: usize, matrix: &Matrix2) {
    let mask = 1usize << target;
    let lower_mask = mask - 1;
    let upper_mask = !lower_mask;

    for k in 0..amplitudes.len() / 2 {
        let i0 = ((k & upper_mask) << 1) | (k & lower_mask);
        let i1 = i0 | mask;

        let psi_0 = amplitudes[i0];
        let psi_1 = amplitudes[i1];
        amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
        amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
    }
}

/// Swaps the target bit's pair wherever every bit of `control_mask` is set
/// (CNOT for one control bit, Toffoli for two).
pub(crate) fn apply_controlled_x(amplitudes: &mut [Complex64], control_mask: usize, target: usize) {
    let mask = 1usize << target;
    for i in 0..amplitudes.len() {
        if i & mask == 0 && i & control_mask == control_mask {
            amplitudes.swap(i, i | mask);
        }
    }
}

/// Multiplies every amplitude whose index has all bits of `mask` set by `phase`.
/// CZ is `phase = -1` on a two-bit mask.
pub(crate) fn apply_phase_on_mask(amplitudes: &mut [Complex64], mask: usize, phase: Complex64) {
    for (i, amplitude) in amplitudes.iter_mut().enumerate() {
        if i & mask == mask {
            *amplitude *= phase;
        }
    }
}

/// Exchanges qubits `a` and `b`. Each pair of indices differing in exactly
/// those two bits is visited once, from the side with bit `a` clear.
pub(crate) fn apply_swap(amplitudes: &mut [Complex64], a: usize, b: usize) {
    let mask_a = 1usize << a;
    let mask_b = 1usize << b;
    for i in 0..amplitudes.len() {
        if i & mask_a == 0 && i & mask_b != 0 {
            let j = i ^ (mask_a | mask_b);
            amplitudes.swap(i, j);
        }
    }
}

/// Dispatches a validated gate to the matching kernel.
pub(crate) fn apply_gate(amplitudes: &mut [Complex64], gate: &Gate) {
    trace!(gate = %gate, "applying gate");
    if let Some((target, matrix)) = gate.single_qubit_matrix() {
        apply_single_qubit(amplitudes, target, &matrix);
        return;
    }
    match gate {
        Gate::Cnot { control, target } => apply_controlled_x(amplitudes, 1usize << *control, *target),
        Gate::Cz { control, target } => {
            apply_phase_on_mask(amplitudes, (1usize << *control) | (1usize << *target), Complex64::new(-1.0, 0.0))
        }
        Gate::ControlledPhase { control, target, theta } => apply_phase_on_mask(
            amplitudes,
            (1usize << *control) | (1usize << *target),
            Complex64::from_polar(1.0, *theta),
        ),
        Gate::Toffoli { control_a, control_b, target } => {
            apply_controlled_x(amplitudes, (1usize << *control_a) | (1usize << *control_b), *target)
        }
        Gate::Swap { qubit_a, qubit_b } => apply_swap(amplitudes, *qubit_a, *qubit_b),
        // Single-qubit gates were handled above.
        _ => {}
    }
}

/// Marginal probabilities `(p0, p1)` of qubit `target`.
pub(crate) fn qubit_probabilities(amplitudes: &[Complex64], target: usize) -> (f64, f64) {
    let mask = 1usize << target;
    amplitudes
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(p0, p1), (i, amplitude)| {
            if i & mask == 0 {
                (p0 + amplitude.norm_sqr(), p1)
            } else {
                (p0, p1 + amplitude.norm_sqr())
            }
        })
}

/// Projects qubit `target` onto `outcome` and rescales the survivors by `scale`.
pub(crate) fn collapse(amplitudes: &mut [Complex64], target: usize, outcome: u8, scale: f64) {
    let mask = 1usize << target;
    let keep_set = outcome == 1;
    for (i, amplitude) in amplitudes.iter_mut().enumerate() {
        if (i & mask != 0) == keep_set {
            *amplitude *= scale;
        } else {
            *amplitude = Complex64::zero();
        }
    }
}
