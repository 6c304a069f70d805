// src/core/mod.rs

//! Core data structures and types

pub mod constants;
pub mod error;
pub mod register;
pub mod state;

// Re-export public types for convenient access via `qentl::core::TypeName`
pub use error::{QentlError, Result};
pub use register::QuantumRegister;
pub use state::QubitState;
