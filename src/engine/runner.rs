//! Two-level AHP evaluation.

use super::config::{AggregationMode, EngineConfig};
use super::types::{
    AlternativeScoreMatrix, CompositeScore, ConsistencyWarning, CriterionWeight,
    EvaluationResult, MatrixId,
};
use crate::error::{AhpError, Result};
use crate::matrix::ReciprocalMatrix;
use crate::priority::{ConsistencyReport, PriorityVector, PriorityVectorSolver};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluates a goal → criteria → alternatives hierarchy.
///
/// Each call is a pure function of its inputs; the engine holds only its
/// configuration and can be shared freely between threads.
///
/// # Examples
///
/// ```
/// use u_ahp::engine::AhpEngine;
/// use u_ahp::matrix::ReciprocalMatrix;
///
/// // Cost is 3x as important as Quality.
/// let criteria = ReciprocalMatrix::complete(2, &[3.0]).unwrap();
/// let by_cost = ReciprocalMatrix::complete(2, &[5.0]).unwrap();
/// let by_quality = ReciprocalMatrix::complete(2, &[1.0 / 2.0]).unwrap();
///
/// let result = AhpEngine::default()
///     .evaluate(
///         &criteria,
///         &[by_cost, by_quality],
///         &["Cost", "Quality"],
///         &["Supplier A", "Supplier B"],
///     )
///     .unwrap();
///
/// assert_eq!(result.recommended_alternative(), "Supplier A");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AhpEngine {
    config: EngineConfig,
    solver: PriorityVectorSolver,
}

impl AhpEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            solver: PriorityVectorSolver::new(config.solver),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the full evaluation.
    ///
    /// `alternative_matrices[i]` compares the alternatives under
    /// `criteria_names[i]`.
    ///
    /// # Errors
    ///
    /// - [`AhpError::InvalidConfig`] if the configuration is invalid.
    /// - [`AhpError::InvalidName`] if any name is empty.
    /// - [`AhpError::DimensionMismatch`] if counts or sizes disagree.
    /// - [`AhpError::UnsupportedSize`], [`AhpError::DegenerateVector`] or
    ///   [`AhpError::NoConvergence`] from any matrix solve.
    ///
    /// Consistency failures are reported in
    /// [`EvaluationResult::warnings`], not as errors.
    pub fn evaluate<C, A>(
        &self,
        criteria_matrix: &ReciprocalMatrix,
        alternative_matrices: &[ReciprocalMatrix],
        criteria_names: &[C],
        alternative_names: &[A],
    ) -> Result<EvaluationResult>
    where
        C: AsRef<str>,
        A: AsRef<str>,
    {
        self.config.validate().map_err(AhpError::InvalidConfig)?;
        check_names("criterion", criteria_names)?;
        check_names("alternative", alternative_names)?;

        let n = criteria_matrix.size();
        if criteria_names.len() != n {
            return Err(AhpError::dimension_mismatch(
                "criteria names",
                n,
                criteria_names.len(),
            ));
        }
        if alternative_matrices.len() != n {
            return Err(AhpError::dimension_mismatch(
                "alternative matrices",
                n,
                alternative_matrices.len(),
            ));
        }
        let m = alternative_names.len();
        for matrix in alternative_matrices {
            if matrix.size() != m {
                return Err(AhpError::dimension_mismatch(
                    "alternative matrix size",
                    m,
                    matrix.size(),
                ));
            }
        }

        // 1. Criteria weights
        let (criteria_vector, criteria_report) = self
            .solver
            .solve_labeled(criteria_matrix, &MatrixId::Criteria.to_string())?;

        // 2. Alternative weights per criterion
        let labels: Vec<String> = criteria_names
            .iter()
            .enumerate()
            .map(|(i, name)| alternatives_id(i, name.as_ref()).to_string())
            .collect();
        let solved = self.solve_alternatives(alternative_matrices, &labels)?;
        let (alt_vectors, alt_reports): (Vec<PriorityVector>, Vec<ConsistencyReport>) =
            solved.into_iter().unzip();

        // 3. Synthesis
        let scores = aggregate(self.config.aggregation, &criteria_vector, &alt_vectors, m);

        // 4. Ranking
        let ranking = rank(&scores, self.config.tie_epsilon);
        let recommended = ranking[0];

        let mut warnings = Vec::new();
        if !criteria_report.is_consistent() {
            warnings.push(warning(MatrixId::Criteria, &criteria_report));
        }
        for (i, report) in alt_reports.iter().enumerate() {
            if !report.is_consistent() {
                warnings.push(warning(
                    alternatives_id(i, criteria_names[i].as_ref()),
                    report,
                ));
            }
        }

        let mut composite_scores: Vec<CompositeScore> = alternative_names
            .iter()
            .zip(&scores)
            .map(|(name, &score)| CompositeScore {
                name: name.as_ref().to_string(),
                score,
                rank: 0,
            })
            .collect();
        for (position, &j) in ranking.iter().enumerate() {
            composite_scores[j].rank = position + 1;
        }

        let criteria_weights = criteria_names
            .iter()
            .zip(criteria_vector.as_slice())
            .map(|(name, &weight)| CriterionWeight {
                name: name.as_ref().to_string(),
                weight,
            })
            .collect();

        tracing::debug!(
            criteria = n,
            alternatives = m,
            recommended = alternative_names[recommended].as_ref(),
            warnings = warnings.len(),
            "evaluation complete"
        );

        Ok(EvaluationResult {
            criteria_weights,
            alternative_scores: AlternativeScoreMatrix::new(alt_vectors),
            composite_scores,
            ranking,
            criteria_report,
            alternative_reports: alt_reports,
            warnings,
            recommended,
            aggregation: self.config.aggregation,
        })
    }

    #[cfg(feature = "parallel")]
    fn solve_alternatives(
        &self,
        matrices: &[ReciprocalMatrix],
        labels: &[String],
    ) -> Result<Vec<(PriorityVector, ConsistencyReport)>> {
        if !self.config.parallel {
            return self.solve_sequential(matrices, labels);
        }
        matrices
            .par_iter()
            .zip(labels.par_iter())
            .map(|(matrix, label)| self.solver.solve_labeled(matrix, label))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn solve_alternatives(
        &self,
        matrices: &[ReciprocalMatrix],
        labels: &[String],
    ) -> Result<Vec<(PriorityVector, ConsistencyReport)>> {
        self.solve_sequential(matrices, labels)
    }

    fn solve_sequential(
        &self,
        matrices: &[ReciprocalMatrix],
        labels: &[String],
    ) -> Result<Vec<(PriorityVector, ConsistencyReport)>> {
        matrices
            .iter()
            .zip(labels)
            .map(|(matrix, label)| self.solver.solve_labeled(matrix, label))
            .collect()
    }
}

fn check_names<S: AsRef<str>>(kind: &'static str, names: &[S]) -> Result<()> {
    match names.iter().position(|s| s.as_ref().is_empty()) {
        Some(index) => Err(AhpError::InvalidName { kind, index }),
        None => Ok(()),
    }
}

fn alternatives_id(criterion: usize, name: &str) -> MatrixId {
    MatrixId::Alternatives {
        criterion,
        name: name.to_string(),
    }
}

fn warning(matrix: MatrixId, report: &ConsistencyReport) -> ConsistencyWarning {
    ConsistencyWarning {
        matrix,
        consistency_ratio: report.consistency_ratio,
        threshold: report.threshold,
    }
}

/// Combines per-criterion alternative weights into one score per alternative.
fn aggregate(
    mode: AggregationMode,
    criteria: &PriorityVector,
    alternatives: &[PriorityVector],
    m: usize,
) -> Vec<f64> {
    match mode {
        AggregationMode::WeightedSum => {
            let mut scores = vec![0.0; m];
            for (&cw, row) in criteria.as_slice().iter().zip(alternatives) {
                for (score, &aw) in scores.iter_mut().zip(row.as_slice()) {
                    *score += cw * aw;
                }
            }
            scores
        }
        AggregationMode::LastCriterion => alternatives
            .last()
            .map(|row| row.as_slice().to_vec())
            .unwrap_or_else(|| vec![0.0; m]),
    }
}

/// Indices sorted by descending score.
///
/// Runs of scores within `epsilon` of the highest score in the run are
/// treated as tied and keep their input order, so rounding noise never
/// reorders equal alternatives. The first index is always within
/// `epsilon` of the maximum.
fn rank(scores: &[f64], epsilon: f64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut start = 0;
    while start < order.len() {
        let leader = scores[order[start]];
        let end = order[start..]
            .iter()
            .position(|&j| leader - scores[j] > epsilon)
            .map_or(order.len(), |offset| start + offset);
        order[start..end].sort_unstable();
        start = end;
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Judgment, Preference};
    use crate::priority::SolverConfig;

    fn identity_inputs(n: usize, m: usize) -> (ReciprocalMatrix, Vec<ReciprocalMatrix>) {
        let criteria = ReciprocalMatrix::identity(n).unwrap();
        let alternatives = (0..n)
            .map(|_| ReciprocalMatrix::identity(m).unwrap())
            .collect();
        (criteria, alternatives)
    }

    fn names(prefix: &str, k: usize) -> Vec<String> {
        (0..k).map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn test_uniform_hierarchy() {
        let (n, m) = (3, 4);
        let (criteria, alternatives) = identity_inputs(n, m);
        let result = AhpEngine::default()
            .evaluate(&criteria, &alternatives, &names("C", n), &names("A", m))
            .unwrap();

        for cw in &result.criteria_weights {
            assert!((cw.weight - 1.0 / 3.0).abs() < 1e-9);
        }
        for row in result.alternative_scores.rows() {
            for &w in row.as_slice() {
                assert!((w - 0.25).abs() < 1e-9);
            }
        }
        for c in &result.composite_scores {
            assert!((c.score - 0.25).abs() < 1e-9);
        }
        assert_eq!(result.ranking, vec![0, 1, 2, 3]);
        assert_eq!(result.recommended, 0);
        assert_eq!(result.recommended_alternative(), "A0");
        assert!(result.is_consistent());
    }

    #[test]
    fn test_weighted_sum_synthesis() {
        // Cost:Quality = 3:1 -> weights 0.75 / 0.25.
        let criteria = ReciprocalMatrix::complete(2, &[3.0]).unwrap();
        // Under Cost, B dominates 4:1; under Quality, A dominates 9:1.
        let by_cost = ReciprocalMatrix::complete(2, &[0.25]).unwrap();
        let by_quality = ReciprocalMatrix::complete(2, &[9.0]).unwrap();

        let result = AhpEngine::default()
            .evaluate(
                &criteria,
                &[by_cost, by_quality],
                &["Cost", "Quality"],
                &["A", "B"],
            )
            .unwrap();

        // A = 0.75*0.2 + 0.25*0.9 = 0.375; B = 0.75*0.8 + 0.25*0.1 = 0.625
        assert!((result.composite_scores[0].score - 0.375).abs() < 1e-9);
        assert!((result.composite_scores[1].score - 0.625).abs() < 1e-9);
        assert_eq!(result.recommended_alternative(), "B");
        assert_eq!(result.ranked_alternatives(), vec!["B", "A"]);
        assert_eq!(result.composite_scores[1].rank, 1);
        assert_eq!(result.composite_scores[0].rank, 2);
    }

    #[test]
    fn test_last_criterion_mode() {
        let criteria = ReciprocalMatrix::complete(2, &[3.0]).unwrap();
        let by_cost = ReciprocalMatrix::complete(2, &[0.25]).unwrap();
        let by_quality = ReciprocalMatrix::complete(2, &[9.0]).unwrap();

        let engine =
            AhpEngine::new(EngineConfig::default().with_aggregation(AggregationMode::LastCriterion));
        let result = engine
            .evaluate(
                &criteria,
                &[by_cost, by_quality],
                &["Cost", "Quality"],
                &["A", "B"],
            )
            .unwrap();

        assert!((result.composite_scores[0].score - 0.9).abs() < 1e-9);
        assert_eq!(result.recommended_alternative(), "A");
        assert_eq!(result.aggregation, AggregationMode::LastCriterion);
    }

    #[test]
    fn test_composite_scores_sum_to_one() {
        let criteria = ReciprocalMatrix::complete(3, &[2.0, 4.0, 2.0]).unwrap();
        let alternatives = vec![
            ReciprocalMatrix::complete(3, &[3.0, 5.0, 2.0]).unwrap(),
            ReciprocalMatrix::complete(3, &[1.0 / 3.0, 1.0, 3.0]).unwrap(),
            ReciprocalMatrix::complete(3, &[1.0, 0.5, 0.5]).unwrap(),
        ];
        let result = AhpEngine::default()
            .evaluate(&criteria, &alternatives, &names("C", 3), &names("A", 3))
            .unwrap();
        let total: f64 = result.composite_scores.iter().map(|c| c.score).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_inconsistency_is_a_warning() {
        let criteria = ReciprocalMatrix::identity(2).unwrap();
        let cyclic = ReciprocalMatrix::complete(3, &[9.0, 1.0 / 9.0, 9.0]).unwrap();
        let fine = ReciprocalMatrix::identity(3).unwrap();
        let result = AhpEngine::default()
            .evaluate(
                &criteria,
                &[fine, cyclic],
                &["Price", "Comfort"],
                &["X", "Y", "Z"],
            )
            .unwrap();

        assert!(!result.is_consistent());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(
            result.warnings[0].matrix,
            MatrixId::Alternatives {
                criterion: 1,
                name: "Comfort".into()
            }
        );
        assert!(result.warnings[0].consistency_ratio >= 0.1);
    }

    #[test]
    fn test_unsupported_criteria_count_aborts() {
        let (criteria, alternatives) = identity_inputs(12, 2);
        let err = AhpEngine::default()
            .evaluate(&criteria, &alternatives, &names("C", 12), &names("A", 2))
            .unwrap_err();
        assert_eq!(err, AhpError::UnsupportedSize { size: 12, max: 11 });
    }

    #[test]
    fn test_unsupported_alternative_count_aborts() {
        let (criteria, alternatives) = identity_inputs(2, 12);
        let err = AhpEngine::default()
            .evaluate(&criteria, &alternatives, &names("C", 2), &names("A", 12))
            .unwrap_err();
        assert!(matches!(err, AhpError::UnsupportedSize { size: 12, .. }));
    }

    #[test]
    fn test_dimension_checks() {
        let (criteria, alternatives) = identity_inputs(2, 3);
        let engine = AhpEngine::default();

        let err = engine
            .evaluate(&criteria, &alternatives, &names("C", 3), &names("A", 3))
            .unwrap_err();
        assert_eq!(err, AhpError::dimension_mismatch("criteria names", 2, 3));

        let err = engine
            .evaluate(&criteria, &alternatives[..1], &names("C", 2), &names("A", 3))
            .unwrap_err();
        assert_eq!(err, AhpError::dimension_mismatch("alternative matrices", 2, 1));

        let err = engine
            .evaluate(&criteria, &alternatives, &names("C", 2), &names("A", 4))
            .unwrap_err();
        assert_eq!(
            err,
            AhpError::dimension_mismatch("alternative matrix size", 4, 3)
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let (criteria, alternatives) = identity_inputs(2, 2);
        let err = AhpEngine::default()
            .evaluate(&criteria, &alternatives, &["Cost", "Risk"], &["Si A", ""])
            .unwrap_err();
        assert_eq!(
            err,
            AhpError::InvalidName {
                kind: "alternative",
                index: 1
            }
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let (criteria, alternatives) = identity_inputs(2, 2);
        let engine = AhpEngine::new(EngineConfig::default().with_tie_epsilon(-1.0));
        let err = engine
            .evaluate(&criteria, &alternatives, &names("C", 2), &names("A", 2))
            .unwrap_err();
        assert!(matches!(err, AhpError::InvalidConfig(_)));
    }

    #[test]
    fn test_deterministic() {
        let criteria = ReciprocalMatrix::from_judgments(
            3,
            &[
                Judgment::new(5, Preference::Row),
                Judgment::new(3, Preference::Column),
                Judgment::new(7, Preference::Column),
            ],
        )
        .unwrap();
        let alternatives = vec![
            ReciprocalMatrix::complete(2, &[2.0]).unwrap(),
            ReciprocalMatrix::complete(2, &[0.2]).unwrap(),
            ReciprocalMatrix::complete(2, &[7.0]).unwrap(),
        ];
        let engine = AhpEngine::default();
        let a = engine
            .evaluate(&criteria, &alternatives, &names("C", 3), &names("A", 2))
            .unwrap();
        let b = engine
            .evaluate(&criteria, &alternatives, &names("C", 3), &names("A", 2))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_chart_series() {
        let criteria = ReciprocalMatrix::complete(2, &[3.0]).unwrap();
        let by_cost = ReciprocalMatrix::complete(2, &[0.25]).unwrap();
        let by_quality = ReciprocalMatrix::complete(2, &[9.0]).unwrap();
        let result = AhpEngine::default()
            .evaluate(
                &criteria,
                &[by_cost, by_quality],
                &["Cost", "Quality"],
                &["A", "B"],
            )
            .unwrap();

        let series = result.criteria_series();
        assert_eq!(series.labels, vec!["Cost", "Quality"]);
        assert!((series.values[0] - 0.75).abs() < 1e-9);

        let last = result.last_criterion_series();
        assert!(last.title.ends_with("Quality"));
        assert!((last.values[0] - 0.9).abs() < 1e-9);

        let composite = result.composite_series();
        assert_eq!(composite.labels, vec!["A", "B"]);
        assert!((composite.values[1] - 0.625).abs() < 1e-9);
    }

    #[test]
    fn test_reports_iterator_order() {
        let (criteria, alternatives) = identity_inputs(2, 2);
        let result = AhpEngine::default()
            .evaluate(&criteria, &alternatives, &["Cost", "Risk"], &["A", "B"])
            .unwrap();
        let ids: Vec<String> = result.reports().map(|(id, _)| id.to_string()).collect();
        assert_eq!(
            ids,
            vec![
                "Criteria Table",
                "Alternatives Table for Criterion Cost",
                "Alternatives Table for Criterion Risk"
            ]
        );
    }

    #[test]
    fn test_rank_is_stable_within_epsilon() {
        let scores = [0.3, 0.35 + 1e-12, 0.35, 0.0];
        assert_eq!(rank(&scores, 1e-9), vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_rank_ties_do_not_depend_on_grid_alignment() {
        // 2.49e-9 and 2.51e-9 sit on either side of a rounding boundary
        // at 1e-9 resolution but are only 2e-11 apart.
        assert_eq!(rank(&[2.5e-9 - 1e-11, 2.5e-9 + 1e-11], 1e-9), vec![0, 1]);
        assert_eq!(rank(&[0.5 - 4e-10, 0.5 + 4e-10], 1e-9), vec![0, 1]);
    }

    #[test]
    fn test_rank_separates_scores_beyond_epsilon() {
        assert_eq!(rank(&[0.5, 0.5 + 3e-9], 1e-9), vec![1, 0]);
        assert_eq!(rank(&[0.2, 0.5, 0.3], 1e-9), vec![1, 2, 0]);
    }

    #[test]
    fn test_rank_ties_are_anchored_to_leader() {
        // 0 is within epsilon of 1 but not of the leader 2.
        let scores = [0.5, 0.5 + 0.8e-9, 0.5 + 1.6e-9];
        assert_eq!(rank(&scores, 1e-9), vec![1, 2, 0]);
    }

    #[test]
    fn test_iteration_budget_error_passes_through() {
        let criteria = ReciprocalMatrix::identity(2).unwrap();
        let alternatives = vec![
            ReciprocalMatrix::complete(
                5,
                &[9.0, 1.0 / 7.0, 5.0, 1.0 / 3.0, 1.0 / 9.0, 7.0, 2.0, 1.0 / 5.0, 9.0, 1.0 / 8.0],
            )
            .unwrap(),
            ReciprocalMatrix::identity(5).unwrap(),
        ];
        let config = EngineConfig::default()
            .with_solver(SolverConfig::default().with_max_iterations(1));
        let err = AhpEngine::new(config)
            .evaluate(&criteria, &alternatives, &names("C", 2), &names("A", 5))
            .unwrap_err();
        assert!(matches!(err, AhpError::NoConvergence { .. }));

        let direct = PriorityVectorSolver::new(SolverConfig::default().with_max_iterations(1))
            .solve(&alternatives[0])
            .unwrap_err();
        assert_eq!(err, direct);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let criteria = ReciprocalMatrix::complete(3, &[2.0, 4.0, 2.0]).unwrap();
        let alternatives = vec![
            ReciprocalMatrix::complete(3, &[3.0, 5.0, 2.0]).unwrap(),
            ReciprocalMatrix::complete(3, &[1.0 / 3.0, 1.0, 3.0]).unwrap(),
            ReciprocalMatrix::complete(3, &[1.0, 0.5, 0.5]).unwrap(),
        ];
        let seq = AhpEngine::default()
            .evaluate(&criteria, &alternatives, &names("C", 3), &names("A", 3))
            .unwrap();
        let par = AhpEngine::new(EngineConfig::default().with_parallel(true))
            .evaluate(&criteria, &alternatives, &names("C", 3), &names("A", 3))
            .unwrap();
        assert_eq!(seq, par);
    }
}
