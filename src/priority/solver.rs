//! Principal-eigenvector priority extraction.

use super::config::SolverConfig;
use super::random_index::random_index;
use super::types::{ConsistencyReport, PriorityVector};
use crate::eigen::EigenDecomposition;
use crate::error::{AhpError, Result};
use crate::matrix::ReciprocalMatrix;

/// Rounding slack for normalized weights and for `lambda_max >= n`.
const ROUNDING_TOLERANCE: f64 = 1e-9;

/// Derives priority weights and consistency diagnostics from a
/// comparison matrix.
///
/// The weights are the principal eigenvector (eigenvalue with the largest
/// real part) scaled to sum to 1. If several eigenvalues share the largest
/// real part, the first in the eigensolver's deflation order is used.
///
/// A consistency ratio at or above the configured threshold does not fail
/// the solve: the weights are still returned and a `WARN` event is logged.
/// Callers inspect [`ConsistencyReport::is_consistent`] to surface it.
///
/// # Examples
///
/// ```
/// use u_ahp::matrix::ReciprocalMatrix;
/// use u_ahp::priority::PriorityVectorSolver;
///
/// let m = ReciprocalMatrix::complete(2, &[3.0]).unwrap();
/// let (weights, report) = PriorityVectorSolver::default().solve(&m).unwrap();
///
/// assert!((weights.as_slice()[0] - 0.75).abs() < 1e-9);
/// assert!((weights.as_slice()[1] - 0.25).abs() < 1e-9);
/// assert_eq!(report.consistency_ratio, 0.0);
/// ```
///
/// # References
///
/// Saaty (1977), "A scaling method for priorities in hierarchical structures"
#[derive(Debug, Clone, Default)]
pub struct PriorityVectorSolver {
    config: SolverConfig,
}

impl PriorityVectorSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves an anonymous matrix.
    pub fn solve(&self, matrix: &ReciprocalMatrix) -> Result<(PriorityVector, ConsistencyReport)> {
        self.solve_labeled(matrix, "comparison matrix")
    }

    /// Solves a matrix; `label` identifies it in log events.
    ///
    /// # Errors
    ///
    /// - [`AhpError::InvalidConfig`] if the solver config fails validation.
    /// - [`AhpError::UnsupportedSize`] if the matrix has more than 11 rows.
    /// - [`AhpError::DegenerateVector`] if the eigenvector sums to zero or a
    ///   non-finite value, has negative components, or if `lambda_max`
    ///   falls below `n` (impossible for a positive reciprocal matrix).
    /// - [`AhpError::NoConvergence`] if the eigensolver stalls.
    pub fn solve_labeled(
        &self,
        matrix: &ReciprocalMatrix,
        label: &str,
    ) -> Result<(PriorityVector, ConsistencyReport)> {
        self.config.validate().map_err(AhpError::InvalidConfig)?;
        let n = matrix.size();
        let ri = random_index(n)?;

        let eig = EigenDecomposition::new(matrix.rows(), self.config.max_iterations)?;
        let k = eig.dominant_index();
        let lambda_max = eig.real_eigenvalues()[k];
        let weights = normalize(eig.eigenvector_real(k))?;

        let nf = n as f64;
        if !lambda_max.is_finite() || lambda_max < nf - ROUNDING_TOLERANCE * nf {
            tracing::debug!(matrix = label, n, lambda_max, "principal eigenvalue below n");
            return Err(AhpError::degenerate_vector("principal eigenvalue", lambda_max));
        }
        let consistency_index = if n > 1 {
            (lambda_max - nf) / (nf - 1.0)
        } else {
            0.0
        };
        let consistency_ratio = if ri > 0.0 {
            consistency_index / ri
        } else {
            0.0
        };

        let report = ConsistencyReport {
            size: n,
            lambda_max,
            consistency_index,
            random_index: ri,
            consistency_ratio,
            threshold: self.config.consistency_threshold,
        };

        tracing::debug!(
            matrix = label,
            n,
            lambda_max,
            ci = consistency_index,
            cr = consistency_ratio,
            "solved priority vector"
        );
        if !report.is_consistent() {
            tracing::warn!(
                matrix = label,
                cr = consistency_ratio,
                threshold = self.config.consistency_threshold,
                "failed consistency check"
            );
        }

        Ok((weights, report))
    }
}

/// Scales a raw eigenvector to sum to 1.
///
/// Components below zero by no more than rounding slack are clamped to 0;
/// anything more negative means the eigenvector is not the Perron vector.
fn normalize(raw: Vec<f64>) -> Result<PriorityVector> {
    let sum: f64 = raw.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return Err(AhpError::degenerate_vector("component sum", sum));
    }
    let mut weights: Vec<f64> = raw.into_iter().map(|x| x / sum).collect();
    if let Some(&w) = weights
        .iter()
        .find(|w| !w.is_finite() || **w < -ROUNDING_TOLERANCE)
    {
        return Err(AhpError::degenerate_vector("normalized weight", w));
    }
    for w in weights.iter_mut().filter(|w| **w < 0.0) {
        *w = 0.0;
    }
    Ok(PriorityVector::new(weights))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::matrix::upper_len;
    use proptest::prelude::*;

    fn saaty_matrix() -> impl Strategy<Value = ReciprocalMatrix> {
        (1usize..=11).prop_flat_map(|n| {
            prop::collection::vec((1u8..=9, any::<bool>()), upper_len(n)).prop_map(move |v| {
                let upper: Vec<f64> = v
                    .into_iter()
                    .map(|(s, row)| if row { s as f64 } else { 1.0 / s as f64 })
                    .collect();
                ReciprocalMatrix::complete(n, &upper).unwrap()
            })
        })
    }

    fn weight_vector() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(0.05f64..10.0, 1..=11)
    }

    proptest! {
        /// Weights are non-negative and sum to 1.
        #[test]
        fn weights_are_normalized(m in saaty_matrix()) {
            let (v, report) = PriorityVectorSolver::default().solve(&m).unwrap();
            prop_assert_eq!(v.len(), m.size());
            prop_assert!((v.as_slice().iter().sum::<f64>() - 1.0).abs() < 1e-9);
            prop_assert!(v.as_slice().iter().all(|&x| x >= 0.0));
            prop_assert!(report.lambda_max >= m.size() as f64 - 1e-9);
        }

        /// Consistent matrices yield CR ~ 0 and weights proportional to the generator.
        #[test]
        fn consistent_matrix_recovered(w in weight_vector()) {
            let m = ReciprocalMatrix::from_weights(&w).unwrap();
            let (v, report) = PriorityVectorSolver::default().solve(&m).unwrap();
            let total: f64 = w.iter().sum();
            for (a, b) in v.as_slice().iter().zip(&w) {
                prop_assert!((a - b / total).abs() < 1e-8);
            }
            prop_assert!(report.consistency_ratio.abs() < 1e-8);
        }

        /// One- and two-item matrices are always consistent.
        #[test]
        fn small_matrices_have_zero_ratio(x in 1.0f64 / 9.0..=9.0) {
            let m = ReciprocalMatrix::complete(2, &[x]).unwrap();
            let (_, report) = PriorityVectorSolver::default().solve(&m).unwrap();
            prop_assert_eq!(report.consistency_ratio, 0.0);
        }
    }
}
