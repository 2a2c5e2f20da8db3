//! Solver configuration.

/// Conventional AHP consistency-ratio threshold.
pub const DEFAULT_CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Configuration for [`PriorityVectorSolver`](super::PriorityVectorSolver).
///
/// # Examples
///
/// ```
/// use u_ahp::priority::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_consistency_threshold(0.08)
///     .with_max_iterations(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Consistency ratios at or above this value raise a warning.
    pub consistency_threshold: f64,

    /// QR sweeps allowed per eigenvalue. 0 = `30 * max(10, n)`.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            consistency_threshold: DEFAULT_CONSISTENCY_THRESHOLD,
            max_iterations: 0,
        }
    }
}

impl SolverConfig {
    pub fn with_consistency_threshold(mut self, threshold: f64) -> Self {
        self.consistency_threshold = threshold;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.consistency_threshold.is_finite() && self.consistency_threshold > 0.0) {
            return Err(format!(
                "consistency_threshold must be positive and finite, got {}",
                self.consistency_threshold
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert!((config.consistency_threshold - 0.1).abs() < 1e-15);
        assert_eq!(config.max_iterations, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_threshold() {
        assert!(SolverConfig::default()
            .with_consistency_threshold(0.0)
            .validate()
            .is_err());
        assert!(SolverConfig::default()
            .with_consistency_threshold(f64::NAN)
            .validate()
            .is_err());
    }
}
