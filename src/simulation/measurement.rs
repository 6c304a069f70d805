// src/simulation/measurement.rs

//! Computational-basis measurement of a single qubit with projective collapse.

use crate::core::constants::PROBABILITY_EPSILON;
use crate::core::{QentlError, QuantumRegister, Result};
use crate::simulation::engine;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use std::fmt;
use tracing::{debug, warn};

/// Outcome of measuring one qubit. Not retained by the register.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementResult {
    /// The measured qubit.
    pub qubit: usize,
    /// Observed bit (0 or 1).
    pub result: u8,
    /// Probability of observing `result` before the collapse.
    pub probability: f64,
}

impl fmt::Display for MeasurementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{} -> {} (p={:.4})", self.qubit, self.result, self.probability)
    }
}

/// Measures `qubit` in the computational basis.
///
/// 1. Computes the marginal probabilities p0 and p1 of the qubit.
/// 2. If one branch carries no probability (≤ [`PROBABILITY_EPSILON`]) the
///    other is selected without drawing from `rng`, so measuring an already
///    collapsed qubit always repeats its result.
/// 3. Otherwise draws u ∈ [0, 1) and selects 0 iff u·(p0+p1) < p0.
/// 4. Zeroes the amplitudes of the rejected branch and rescales the
///    survivors by 1/√p.
///
/// # Errors
/// * `InvalidQubitIndex` for `qubit >= n`.
/// * `DegenerateMeasurement` if the register carries no probability mass,
///   or the mass is not finite, instead of producing a NaN probability.
pub fn measure_qubit_in_register<R>(
    register: &mut QuantumRegister,
    qubit: usize,
    rng: &mut R,
) -> Result<MeasurementResult>
where
    R: Rng + ?Sized,
{
    register.check_qubit(qubit)?;
    let (p0, p1) = engine::qubit_probabilities(register.amplitudes(), qubit);
    let total = p0 + p1;

    // Also catches NaN or infinite mass from a corrupted amplitude buffer.
    if !(total > PROBABILITY_EPSILON && total.is_finite()) {
        warn!(qubit, total, "measurement on a register with no probability mass");
        return Err(QentlError::DegenerateMeasurement { qubit, total_probability: total });
    }

    let result: u8 = if p1 <= PROBABILITY_EPSILON {
        0
    } else if p0 <= PROBABILITY_EPSILON {
        1
    } else {
        let sample: f64 = StandardUniform.sample(rng);
        if sample * total < p0 { 0 } else { 1 }
    };

    let branch = if result == 0 { p0 } else { p1 };
    engine::collapse(register.amplitudes_mut(), qubit, result, 1.0 / branch.sqrt());

    let measured = MeasurementResult { qubit, result, probability: branch / total };
    debug!(qubit, result, probability = measured.probability, "measured qubit");
    Ok(measured)
}
