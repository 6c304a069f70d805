//! Simulator configuration

use crate::core::constants::NORM_TOLERANCE;

/// Configuration for [`Simulator`](super::Simulator).
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Seed for the measurement RNG. `None` draws a fresh seed per run,
    /// which is logged and recorded in the result for replay.
    pub seed: Option<u64>,

    /// Check the register norm after every operation. Off by default.
    pub validate_each_step: bool,

    /// Allowed deviation of the squared norm from 1 when validating.
    pub norm_tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            validate_each_step: false,
            norm_tolerance: NORM_TOLERANCE,
        }
    }
}

impl SimulatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the measurement RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_validation(mut self, validate_each_step: bool) -> Self {
        self.validate_each_step = validate_each_step;
        self
    }

    pub fn with_norm_tolerance(mut self, norm_tolerance: f64) -> Self {
        self.norm_tolerance = norm_tolerance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulatorConfig::default();
        assert_eq!(config.seed, None);
        assert!(!config.validate_each_step);
        assert_eq!(config.norm_tolerance, NORM_TOLERANCE);
    }

    #[test]
    fn test_builder_methods() {
        let config = SimulatorConfig::new().with_seed(3).with_validation(true).with_norm_tolerance(1e-6);
        assert_eq!(config.seed, Some(3));
        assert!(config.validate_each_step);
        assert_eq!(config.norm_tolerance, 1e-6);
    }
}
