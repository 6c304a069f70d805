//! Builds a Bell pair, checks its entanglement, and samples it a few times.

use qentl::{
    CircuitBuilder, Gate, QentlError, QuantumRegister, Simulator, SimulatorConfig, calculate_entanglement,
};
use std::collections::BTreeMap;

fn main() -> Result<(), QentlError> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    // --- Direct register manipulation ---
    let mut reg = QuantumRegister::new(2)?;
    reg.hadamard(0)?;
    reg.cnot(0, 1)?;
    println!("{}", reg);
    println!("Entanglement entropy of (q0, q1): {:.6}\n", calculate_entanglement(&reg, 0, 1)?);

    // --- Same state as a circuit, sampled with different seeds ---
    let circuit = CircuitBuilder::new()
        .gate(Gate::Hadamard { target: 0 })
        .gate(Gate::Cnot { control: 0, target: 1 })
        .measure([0, 1])
        .build();
    println!("Bell Circuit:\n{}", circuit);

    let mut counts: BTreeMap<(u8, u8), usize> = BTreeMap::new();
    for seed in 0..100 {
        let simulator = Simulator::with_config(SimulatorConfig::new().with_seed(seed));
        let result = simulator.run(&circuit)?;
        let pair = (
            result.last_outcome(0).unwrap_or_default(),
            result.last_outcome(1).unwrap_or_default(),
        );
        *counts.entry(pair).or_default() += 1;
    }

    println!("Outcome counts over 100 seeds:");
    for ((q0, q1), count) in &counts {
        println!("  q0={} q1={}: {}", q0, q1, count);
    }
    Ok(())
}
