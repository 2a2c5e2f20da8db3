//! Engine configuration.

use crate::priority::SolverConfig;

/// How per-criterion alternative weights are combined into the final
/// score of each alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AggregationMode {
    /// `score[j] = Σ_i criteria_weight[i] × alternative_weight[i][j]`.
    #[default]
    WeightedSum,

    /// Rank by the last criterion's alternative weights alone, ignoring
    /// the criteria weights. Reproduces single-criterion spreadsheets
    /// that chart only the final table; not a valid AHP synthesis.
    LastCriterion,
}

/// Configuration for [`AhpEngine`](super::AhpEngine).
///
/// # Examples
///
/// ```
/// use u_ahp::engine::{AggregationMode, EngineConfig};
/// use u_ahp::priority::SolverConfig;
///
/// let config = EngineConfig::default()
///     .with_solver(SolverConfig::default().with_consistency_threshold(0.1))
///     .with_aggregation(AggregationMode::WeightedSum)
///     .with_parallel(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Settings passed to every matrix solve.
    pub solver: SolverConfig,

    /// Score synthesis rule.
    pub aggregation: AggregationMode,

    /// Composite scores closer than this are ranked as ties (input order).
    pub tie_epsilon: f64,

    /// Whether to solve alternative matrices in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            aggregation: AggregationMode::default(),
            tie_epsilon: 1e-9,
            parallel: false,
        }
    }
}

impl EngineConfig {
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_aggregation(mut self, aggregation: AggregationMode) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_tie_epsilon(mut self, eps: f64) -> Self {
        self.tie_epsilon = eps;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.solver.validate()?;
        if !(self.tie_epsilon.is_finite() && self.tie_epsilon > 0.0) {
            return Err(format!(
                "tie_epsilon must be positive and finite, got {}",
                self.tie_epsilon
            ));
        }
        Ok(())
    }
}
