// tests/simulation_tests.rs

use qentl::{
    CircuitBuilder, Gate, Operation, QentlError, QuantumRegister, SimulationResult, Simulator, SimulatorConfig,
};
use std::f64::consts::PI;

// Simulator with a fixed seed and per-step norm checks
fn seeded_simulator(seed: u64) -> Simulator {
    Simulator::with_config(SimulatorConfig::new().with_seed(seed).with_validation(true))
}

// Helper function to check the last measured bit of a qubit
fn check_outcome(result: &SimulationResult, qubit: usize, expected: u8) {
    match result.last_outcome(qubit) {
        Some(bit) => assert_eq!(bit, expected, "Mismatch for qubit {}", qubit),
        None => panic!("qubit {} was never measured", qubit),
    }
}

#[test]
fn test_empty_circuit() -> Result<(), QentlError> {
    let circuit = CircuitBuilder::new().build();
    let result = Simulator::new().run(&circuit)?;
    assert!(result.measurements().is_empty());
    assert_eq!(result.gates_applied(), 0);
    Ok(())
}

#[test]
fn test_measure_fresh_register() -> Result<(), QentlError> {
    let circuit = CircuitBuilder::new().with_qubits(2).measure([0, 1]).build();
    let result = seeded_simulator(1).run(&circuit)?;

    assert_eq!(result.measurements().len(), 2);
    check_outcome(&result, 0, 0);
    check_outcome(&result, 1, 0);
    Ok(())
}

#[test]
fn test_pauli_x_flips_outcome() -> Result<(), QentlError> {
    let circuit = CircuitBuilder::new()
        .gate(Gate::PauliX { target: 1 })
        .measure([0, 1])
        .build();
    let result = seeded_simulator(2).run(&circuit)?;

    check_outcome(&result, 0, 0);
    check_outcome(&result, 1, 1);
    Ok(())
}

#[test]
fn test_phase_does_not_change_outcome() -> Result<(), QentlError> {
    // Phase only rotates the |1> amplitude, which is zero here
    let circuit = CircuitBuilder::new()
        .gate(Gate::Phase { target: 0, theta: PI / 2.0 })
        .measure([0])
        .build();
    let result = seeded_simulator(3).run(&circuit)?;
    check_outcome(&result, 0, 0);
    Ok(())
}

#[test]
fn test_ghz_outcomes_are_correlated() -> Result<(), QentlError> {
    let circuit = CircuitBuilder::new()
        .gate(Gate::Hadamard { target: 0 })
        .gate(Gate::Cnot { control: 0, target: 1 })
        .gate(Gate::Cnot { control: 1, target: 2 })
        .measure([0, 1, 2])
        .build();

    let mut ones = 0;
    for seed in 0..64 {
        let result = seeded_simulator(seed).run(&circuit)?;
        let bit = result.last_outcome(0).expect("q0 measured");
        check_outcome(&result, 1, bit);
        check_outcome(&result, 2, bit);
        ones += usize::from(bit);
    }
    // Both branches should show up over 64 seeds
    assert!(ones > 0 && ones < 64, "saw {} ones out of 64", ones);
    Ok(())
}

#[test]
fn test_repeated_measurement_is_stable() -> Result<(), QentlError> {
    let circuit = CircuitBuilder::new()
        .gate(Gate::Hadamard { target: 0 })
        .measure([0])
        .measure([0])
        .measure([0])
        .build();

    for seed in 0..16 {
        let result = seeded_simulator(seed).run(&circuit)?;
        let bits: Vec<u8> = result.measurements().iter().map(|m| m.result).collect();
        assert_eq!(bits.len(), 3);
        assert!(bits.iter().all(|&b| b == bits[0]), "seed {}: {:?}", seed, bits);
        // After the first collapse, later measurements are certain
        assert!((result.measurements()[2].probability - 1.0).abs() < 1e-12);
    }
    Ok(())
}

#[test]
fn test_same_seed_same_results() -> Result<(), QentlError> {
    let circuit = CircuitBuilder::new()
        .add_ops((0..4).map(|q| Operation::Apply(Gate::Hadamard { target: q })))
        .measure(0..4)
        .build();

    let first = seeded_simulator(99).run(&circuit)?;
    let second = seeded_simulator(99).run(&circuit)?;
    assert_eq!(first.outcomes(), second.outcomes());
    assert_eq!(first.final_register(), second.final_register());
    Ok(())
}

#[test]
fn test_reset_returns_to_ground_state() -> Result<(), QentlError> {
    let circuit = CircuitBuilder::new()
        .gate(Gate::PauliX { target: 0 })
        .gate(Gate::Hadamard { target: 1 })
        .add_op(Operation::Reset)
        .measure([0, 1])
        .build();
    let result = seeded_simulator(4).run(&circuit)?;

    check_outcome(&result, 0, 0);
    check_outcome(&result, 1, 0);
    Ok(())
}

#[test]
fn test_swap_and_toffoli() -> Result<(), QentlError> {
    let circuit = CircuitBuilder::new()
        .gate(Gate::PauliX { target: 0 })
        .gate(Gate::Swap { qubit_a: 0, qubit_b: 1 }) // |010>
        .gate(Gate::PauliX { target: 0 }) // |011>
        .gate(Gate::Toffoli { control_a: 0, control_b: 1, target: 2 }) // |111>
        .measure([0, 1, 2])
        .build();
    let result = seeded_simulator(5).run(&circuit)?;

    check_outcome(&result, 0, 1);
    check_outcome(&result, 1, 1);
    check_outcome(&result, 2, 1);
    Ok(())
}

#[test]
fn test_duplicate_qubit_aborts_run() {
    let circuit = CircuitBuilder::new()
        .gate(Gate::PauliX { target: 0 })
        .gate(Gate::Cnot { control: 1, target: 1 })
        .measure([0])
        .build();
    let err = seeded_simulator(6).run(&circuit).unwrap_err();
    assert_eq!(err, QentlError::DuplicateQubit { qubit: 1 });
}

#[test]
fn test_run_on_prepared_register() -> Result<(), QentlError> {
    let mut register = QuantumRegister::new(2)?;
    register.pauli_x(0)?;
    register.pauli_x(1)?;

    let circuit = CircuitBuilder::new().gate(Gate::Cnot { control: 0, target: 1 }).measure([0, 1]).build();
    let result = seeded_simulator(7).run_on_register(&circuit, register)?;

    check_outcome(&result, 0, 1);
    check_outcome(&result, 1, 0);
    Ok(())
}

#[test]
fn test_oversized_qubit_index_is_an_error() {
    let circuit = CircuitBuilder::new().gate(Gate::PauliX { target: usize::MAX }).build();
    assert!(matches!(
        Simulator::new().run(&circuit),
        Err(QentlError::InvalidQubitCount { requested: usize::MAX, .. })
    ));
}

#[test]
fn test_nan_angle_aborts_run() {
    let circuit = CircuitBuilder::new()
        .gate(Gate::RotateY { target: 0, theta: f64::NAN })
        .measure([0])
        .build();
    assert!(matches!(
        seeded_simulator(9).run(&circuit),
        Err(QentlError::NonFiniteAngle { .. })
    ));
}
