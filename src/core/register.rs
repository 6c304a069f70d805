// src/core/register.rs

use super::constants::{MAX_QUBITS, PROBABILITY_EPSILON};
use super::error::{QentlError, Result};
use super::state::QubitState;
use crate::operations::{Gate, Matrix2};
use crate::simulation::engine;
use crate::simulation::measurement::{self, MeasurementResult};
use crate::validation;
use num_complex::Complex64;
use num_traits::{One, Zero};
use rand::Rng;
use std::fmt;
use tracing::debug;

/// The joint state of `n` qubits as 2^n complex amplitudes.
///
/// Qubit `q` is bit `q` of a basis index: for two qubits, index 1 is
/// |q1=0, q0=1>. The register owns its amplitude buffer; duplicating it is
/// an explicit [`Clone`].
///
/// Every mutating method validates its qubit arguments first and returns an
/// error without touching the amplitudes if they are out of range or repeated.
/// On success the squared norm stays at 1 (gates are unitary, measurement
/// renormalizes the surviving branch).
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumRegister {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl QuantumRegister {
    /// Allocates a register of `num_qubits` qubits in |0...0>.
    ///
    /// # Errors
    /// `InvalidQubitCount` if `num_qubits` is zero or above [`MAX_QUBITS`].
    pub fn new(num_qubits: usize) -> Result<Self> {
        let dim = Self::dimension_for(num_qubits)?;
        let mut amplitudes = vec![Complex64::zero(); dim];
        amplitudes[0] = Complex64::one();
        debug!(num_qubits, dim, "allocated quantum register");
        Ok(Self { num_qubits, amplitudes })
    }

    /// Builds a register from an explicit amplitude vector.
    ///
    /// # Errors
    /// * `DimensionMismatch` if `amplitudes.len() != 2^num_qubits`.
    /// * `NotNormalized` if the squared norm is not 1 within tolerance.
    pub fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex64>) -> Result<Self> {
        let dim = Self::dimension_for(num_qubits)?;
        if amplitudes.len() != dim {
            return Err(QentlError::DimensionMismatch { expected: dim, actual: amplitudes.len() });
        }
        validation::check_normalization(&amplitudes, None)?;
        Ok(Self { num_qubits, amplitudes })
    }

    /// Builds the product state of the given qubits; `qubits[q]` becomes qubit `q`.
    pub fn from_qubits(qubits: &[QubitState]) -> Result<Self> {
        let dim = Self::dimension_for(qubits.len())?;
        let amplitudes = (0..dim)
            .map(|index| {
                qubits.iter().enumerate().fold(Complex64::one(), |acc, (q, state)| {
                    if index & (1 << q) == 0 { acc * state.alpha() } else { acc * state.beta() }
                })
            })
            .collect();
        Ok(Self { num_qubits: qubits.len(), amplitudes })
    }

    fn dimension_for(num_qubits: usize) -> Result<usize> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(QentlError::InvalidQubitCount { requested: num_qubits, max: MAX_QUBITS });
        }
        Ok(1usize << num_qubits)
    }

    /// Number of qubits (n).
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Length of the amplitude vector (2^n).
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Read-only view of the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Amplitude of basis state `index`, if it exists.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Probability of observing basis state `index` when measuring every qubit.
    pub fn probability(&self, index: usize) -> Option<f64> {
        self.amplitudes.get(index).map(|c| c.norm_sqr())
    }

    /// Probabilities of every basis state, in index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Σ|amplitude|². 1 for every valid register.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Returns the register to |0...0>.
    pub fn reset(&mut self) {
        self.amplitudes.fill(Complex64::zero());
        self.amplitudes[0] = Complex64::one();
    }

    /// Fails with `InvalidQubitIndex` if `qubit >= n`.
    pub fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(QentlError::InvalidQubitIndex { index: qubit, num_qubits: self.num_qubits });
        }
        Ok(())
    }

    /// Checks every qubit is in range and no qubit is repeated.
    fn check_distinct(&self, qubits: &[usize]) -> Result<()> {
        for (i, &qubit) in qubits.iter().enumerate() {
            self.check_qubit(qubit)?;
            if qubits[..i].contains(&qubit) {
                return Err(QentlError::DuplicateQubit { qubit });
            }
        }
        Ok(())
    }

    /// Verifies `gate` can be applied to this register: qubits in range and
    /// distinct, angles finite, custom matrices unitary.
    pub fn validate_gate(&self, gate: &Gate) -> Result<()> {
        self.check_distinct(&gate.qubits())?;
        if let Some(theta) = gate.angle().filter(|theta| !theta.is_finite()) {
            return Err(QentlError::NonFiniteAngle { gate: gate.name(), theta });
        }
        if let Gate::Unitary { matrix, .. } = gate {
            validation::check_unitary(matrix, None)?;
        }
        Ok(())
    }

    /// Applies `gate` in place.
    pub fn apply_gate(&mut self, gate: &Gate) -> Result<()> {
        self.validate_gate(gate)?;
        engine::apply_gate(&mut self.amplitudes, gate);
        Ok(())
    }

    pub fn hadamard(&mut self, target: usize) -> Result<()> {
        self.apply_gate(&Gate::Hadamard { target })
    }

    pub fn pauli_x(&mut self, target: usize) -> Result<()> {
        self.apply_gate(&Gate::PauliX { target })
    }

    pub fn pauli_y(&mut self, target: usize) -> Result<()> {
        self.apply_gate(&Gate::PauliY { target })
    }

    pub fn pauli_z(&mut self, target: usize) -> Result<()> {
        self.apply_gate(&Gate::PauliZ { target })
    }

    pub fn rotate_x(&mut self, target: usize, theta: f64) -> Result<()> {
        self.apply_gate(&Gate::RotateX { target, theta })
    }

    pub fn rotate_y(&mut self, target: usize, theta: f64) -> Result<()> {
        self.apply_gate(&Gate::RotateY { target, theta })
    }

    pub fn rotate_z(&mut self, target: usize, theta: f64) -> Result<()> {
        self.apply_gate(&Gate::RotateZ { target, theta })
    }

    /// diag(1, e^(iθ)) on `target`.
    pub fn phase(&mut self, target: usize, theta: f64) -> Result<()> {
        self.apply_gate(&Gate::Phase { target, theta })
    }

    pub fn s(&mut self, target: usize) -> Result<()> {
        self.apply_gate(&Gate::S { target })
    }

    pub fn t(&mut self, target: usize) -> Result<()> {
        self.apply_gate(&Gate::T { target })
    }

    /// Applies a caller-supplied 2x2 matrix; fails with `NotUnitary` unless U†U = I.
    pub fn apply_single_qubit_unitary(&mut self, target: usize, matrix: Matrix2) -> Result<()> {
        self.apply_gate(&Gate::Unitary { target, matrix })
    }

    pub fn cnot(&mut self, control: usize, target: usize) -> Result<()> {
        self.apply_gate(&Gate::Cnot { control, target })
    }

    pub fn cz(&mut self, control: usize, target: usize) -> Result<()> {
        self.apply_gate(&Gate::Cz { control, target })
    }

    pub fn controlled_phase(&mut self, control: usize, target: usize, theta: f64) -> Result<()> {
        self.apply_gate(&Gate::ControlledPhase { control, target, theta })
    }

    pub fn toffoli(&mut self, control_a: usize, control_b: usize, target: usize) -> Result<()> {
        self.apply_gate(&Gate::Toffoli { control_a, control_b, target })
    }

    pub fn swap(&mut self, qubit_a: usize, qubit_b: usize) -> Result<()> {
        self.apply_gate(&Gate::Swap { qubit_a, qubit_b })
    }

    /// Probability that measuring `qubit` yields 1.
    pub fn probability_of_one(&self, qubit: usize) -> Result<f64> {
        self.check_qubit(qubit)?;
        let (p0, p1) = engine::qubit_probabilities(&self.amplitudes, qubit);
        let total = p0 + p1;
        if !(total > PROBABILITY_EPSILON && total.is_finite()) {
            return Err(QentlError::DegenerateMeasurement { qubit, total_probability: total });
        }
        Ok(p1 / total)
    }

    /// Measures `qubit` in the computational basis and collapses the register.
    /// See [`measure_qubit_in_register`](crate::simulation::measure_qubit_in_register).
    pub fn measure_qubit<R>(&mut self, qubit: usize, rng: &mut R) -> Result<MeasurementResult>
    where
        R: Rng + ?Sized,
    {
        measurement::measure_qubit_in_register(self, qubit, rng)
    }

    /// Measures every qubit from 0 upwards and returns the observed basis index.
    /// The register ends in that basis state.
    pub fn measure_all<R>(&mut self, rng: &mut R) -> Result<u64>
    where
        R: Rng + ?Sized,
    {
        let mut outcome = 0u64;
        for qubit in 0..self.num_qubits {
            let result = self.measure_qubit(qubit, rng)?;
            outcome |= u64::from(result.result) << qubit;
        }
        debug!(outcome, "measured full register");
        Ok(outcome)
    }
}

impl fmt::Display for QuantumRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "QuantumRegister({} qubits):", self.num_qubits)?;
        for (index, amplitude) in self.amplitudes.iter().enumerate() {
            if amplitude.norm_sqr() > 0.0 {
                writeln!(
                    f,
                    "  |{:0width$b}>: {:.4} (p={:.4})",
                    index,
                    amplitude,
                    amplitude.norm_sqr(),
                    width = self.num_qubits
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    const TEST_TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_new_register_is_ground_state() -> Result<()> {
        for n in 1..=5 {
            let reg = QuantumRegister::new(n)?;
            assert_eq!(reg.dimension(), 1 << n);
            assert_eq!(reg.amplitude(0), Some(Complex64::one()));
            assert!(reg.amplitudes()[1..].iter().all(|c| c.is_zero()));
            assert_abs_diff_eq!(reg.norm_sqr(), 1.0, epsilon = TEST_TOLERANCE);
        }
        Ok(())
    }

    #[test]
    fn test_new_rejects_zero_and_oversized() {
        assert_eq!(
            QuantumRegister::new(0),
            Err(QentlError::InvalidQubitCount { requested: 0, max: MAX_QUBITS })
        );
        assert!(QuantumRegister::new(MAX_QUBITS + 1).is_err());
    }

    #[test]
    fn test_from_amplitudes_checks_length_and_norm() {
        let half = Complex64::new(0.5, 0.0);
        assert_eq!(
            QuantumRegister::from_amplitudes(2, vec![half; 3]),
            Err(QentlError::DimensionMismatch { expected: 4, actual: 3 })
        );
        assert!(matches!(
            QuantumRegister::from_amplitudes(2, vec![Complex64::one(); 4]),
            Err(QentlError::NotNormalized { .. })
        ));
        assert!(QuantumRegister::from_amplitudes(2, vec![half; 4]).is_ok());
    }

    #[test]
    fn test_from_qubits_builds_product_state() -> Result<()> {
        // qubit 0 = |1>, qubit 1 = |+>  ->  (|01> + |11>)/√2 = indices 1 and 3
        let reg = QuantumRegister::from_qubits(&[QubitState::one(), QubitState::plus()])?;
        assert_abs_diff_eq!(reg.probability(1).unwrap_or(0.0), 0.5, epsilon = TEST_TOLERANCE);
        assert_abs_diff_eq!(reg.probability(3).unwrap_or(0.0), 0.5, epsilon = TEST_TOLERANCE);
        assert_abs_diff_eq!(reg.probability(0).unwrap_or(1.0), 0.0, epsilon = TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_invalid_index_leaves_state_untouched() -> Result<()> {
        let mut reg = QuantumRegister::new(2)?;
        reg.hadamard(0)?;
        let before = reg.clone();

        assert_eq!(reg.hadamard(2), Err(QentlError::InvalidQubitIndex { index: 2, num_qubits: 2 }));
        assert_eq!(reg.cnot(1, 1), Err(QentlError::DuplicateQubit { qubit: 1 }));
        assert_eq!(reg.toffoli(0, 1, 5), Err(QentlError::InvalidQubitIndex { index: 5, num_qubits: 2 }));
        assert_eq!(reg, before);
        Ok(())
    }

    #[test]
    fn test_pauli_x_flips_requested_qubit() -> Result<()> {
        let mut reg = QuantumRegister::new(3)?;
        reg.pauli_x(2)?;
        assert_abs_diff_eq!(reg.probability(0b100).unwrap_or(0.0), 1.0, epsilon = TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_pauli_y_on_zero_gives_i_one() -> Result<()> {
        let mut reg = QuantumRegister::new(1)?;
        reg.pauli_y(0)?;
        let amp = reg.amplitude(1).unwrap_or_default();
        assert_abs_diff_eq!(amp.re, 0.0, epsilon = TEST_TOLERANCE);
        assert_abs_diff_eq!(amp.im, 1.0, epsilon = TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_s_twice_equals_z() -> Result<()> {
        let mut with_s = QuantumRegister::new(1)?;
        with_s.hadamard(0)?;
        with_s.s(0)?;
        with_s.s(0)?;

        let mut with_z = QuantumRegister::new(1)?;
        with_z.hadamard(0)?;
        with_z.pauli_z(0)?;

        for (a, b) in with_s.amplitudes().iter().zip(with_z.amplitudes()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = TEST_TOLERANCE);
            assert_abs_diff_eq!(a.im, b.im, epsilon = TEST_TOLERANCE);
        }
        Ok(())
    }

    #[test]
    fn test_ry_pi_over_two_gives_equal_split() -> Result<()> {
        let mut reg = QuantumRegister::new(1)?;
        reg.rotate_y(0, PI / 2.0)?;
        assert_abs_diff_eq!(reg.probability_of_one(0)?, 0.5, epsilon = TEST_TOLERANCE);
        assert_abs_diff_eq!(reg.amplitudes()[1].re, FRAC_1_SQRT_2, epsilon = TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_custom_unitary_is_checked() -> Result<()> {
        let mut reg = QuantumRegister::new(1)?;
        let not_unitary = [
            [Complex64::one(), Complex64::one()],
            [Complex64::zero(), Complex64::one()],
        ];
        assert!(matches!(
            reg.apply_single_qubit_unitary(0, not_unitary),
            Err(QentlError::NotUnitary { .. })
        ));
        reg.apply_single_qubit_unitary(0, crate::operations::pauli_x_matrix())?;
        assert_abs_diff_eq!(reg.probability(1).unwrap_or(0.0), 1.0, epsilon = TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_nan_matrix_is_rejected() -> Result<()> {
        let mut reg = QuantumRegister::new(1)?;
        let nan_matrix = [[Complex64::new(f64::NAN, 0.0); 2]; 2];
        assert!(matches!(
            reg.apply_single_qubit_unitary(0, nan_matrix),
            Err(QentlError::NotUnitary { .. })
        ));
        assert_eq!(reg, QuantumRegister::new(1)?);
        Ok(())
    }

    #[test]
    fn test_non_finite_angles_are_rejected() -> Result<()> {
        let mut reg = QuantumRegister::new(2)?;
        reg.hadamard(0)?;
        let before = reg.clone();

        for theta in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(reg.rotate_x(0, theta), Err(QentlError::NonFiniteAngle { gate: "Rx", .. })));
            assert!(matches!(reg.rotate_y(0, theta), Err(QentlError::NonFiniteAngle { gate: "Ry", .. })));
            assert!(matches!(reg.rotate_z(1, theta), Err(QentlError::NonFiniteAngle { gate: "Rz", .. })));
            assert!(matches!(reg.phase(1, theta), Err(QentlError::NonFiniteAngle { gate: "P", .. })));
            assert!(matches!(
                reg.controlled_phase(0, 1, theta),
                Err(QentlError::NonFiniteAngle { gate: "CP", .. })
            ));
        }
        assert_eq!(reg, before);
        assert_abs_diff_eq!(reg.norm_sqr(), 1.0, epsilon = TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_probability_of_one_on_corrupted_register() -> Result<()> {
        let mut reg = QuantumRegister::new(1)?;
        reg.amplitudes_mut().fill(Complex64::new(f64::NAN, 0.0));
        assert!(matches!(
            reg.probability_of_one(0),
            Err(QentlError::DegenerateMeasurement { qubit: 0, .. })
        ));
        reg.amplitudes_mut().fill(Complex64::zero());
        assert!(reg.probability_of_one(0).is_err());
        Ok(())
    }

    #[test]
    fn test_reset_restores_ground_state() -> Result<()> {
        let mut reg = QuantumRegister::new(2)?;
        reg.hadamard(0)?;
        reg.cnot(0, 1)?;
        reg.reset();
        assert_eq!(reg, QuantumRegister::new(2)?);
        Ok(())
    }
}
