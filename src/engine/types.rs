//! Evaluation output types.

use super::config::AggregationMode;
use crate::priority::{ConsistencyReport, PriorityVector};
use std::fmt;

/// Identifies which comparison matrix a report or warning belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum MatrixId {
    /// The criteria-level matrix.
    Criteria,

    /// The alternatives matrix for one criterion.
    Alternatives {
        /// Criterion index.
        criterion: usize,
        /// Criterion name.
        name: String,
    },
}

impl fmt::Display for MatrixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixId::Criteria => write!(f, "Criteria Table"),
            MatrixId::Alternatives { name, .. } => {
                write!(f, "Alternatives Table for Criterion {name}")
            }
        }
    }
}

/// Non-fatal notice that a matrix failed the consistency check.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsistencyWarning {
    /// The flagged matrix.
    pub matrix: MatrixId,

    /// Its consistency ratio.
    pub consistency_ratio: f64,

    /// Threshold that was reached or exceeded.
    pub threshold: f64,
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed Consistency check of {} (CR = {:.4} >= {:.2})",
            self.matrix, self.consistency_ratio, self.threshold
        )
    }
}

/// A criterion name with its weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriterionWeight {
    pub name: String,
    pub weight: f64,
}

/// Final aggregate score of one alternative.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeScore {
    pub name: String,
    pub score: f64,
    /// 1-based position in the ranking.
    pub rank: usize,
}

/// Alternative weights per criterion: row `i` is the priority vector of
/// the alternatives under criterion `i`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlternativeScoreMatrix {
    rows: Vec<PriorityVector>,
}

impl AlternativeScoreMatrix {
    pub(crate) fn new(rows: Vec<PriorityVector>) -> Self {
        Self { rows }
    }

    /// Number of criteria (rows).
    pub fn criteria_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of alternatives (columns).
    pub fn alternative_count(&self) -> usize {
        self.rows.first().map_or(0, PriorityVector::len)
    }

    /// Weight of alternative `j` under criterion `i`.
    pub fn get(&self, criterion: usize, alternative: usize) -> Option<f64> {
        self.rows.get(criterion)?.get(alternative)
    }

    pub fn row(&self, criterion: usize) -> Option<&PriorityVector> {
        self.rows.get(criterion)
    }

    pub fn rows(&self) -> &[PriorityVector] {
        &self.rows
    }
}

/// A labeled series ready for a bar chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Everything produced by one [`AhpEngine::evaluate`](super::AhpEngine::evaluate) call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationResult {
    /// Criteria in input order with their weights.
    pub criteria_weights: Vec<CriterionWeight>,

    /// Per-criterion alternative weights.
    pub alternative_scores: AlternativeScoreMatrix,

    /// Composite score per alternative, in input order.
    pub composite_scores: Vec<CompositeScore>,

    /// Alternative indices from best to worst.
    pub ranking: Vec<usize>,

    /// Consistency of the criteria matrix.
    pub criteria_report: ConsistencyReport,

    /// Consistency of each alternatives matrix, aligned with the criteria.
    pub alternative_reports: Vec<ConsistencyReport>,

    /// Matrices that failed the consistency check.
    pub warnings: Vec<ConsistencyWarning>,

    /// Index of the top-ranked alternative.
    pub recommended: usize,

    /// Synthesis rule used for the composite scores.
    pub aggregation: AggregationMode,
}

impl EvaluationResult {
    /// Name of the top-ranked alternative.
    pub fn recommended_alternative(&self) -> &str {
        &self.composite_scores[self.recommended].name
    }

    /// Alternative names from best to worst.
    pub fn ranked_alternatives(&self) -> Vec<&str> {
        self.ranking
            .iter()
            .map(|&j| self.composite_scores[j].name.as_str())
            .collect()
    }

    /// `true` when every matrix passed the consistency check.
    pub fn is_consistent(&self) -> bool {
        self.warnings.is_empty()
    }

    /// All consistency reports, criteria first.
    pub fn reports(&self) -> impl Iterator<Item = (MatrixId, &ConsistencyReport)> + '_ {
        std::iter::once((MatrixId::Criteria, &self.criteria_report)).chain(
            self.alternative_reports
                .iter()
                .enumerate()
                .map(|(i, report)| {
                    (
                        MatrixId::Alternatives {
                            criterion: i,
                            name: self.criteria_weights[i].name.clone(),
                        },
                        report,
                    )
                }),
        )
    }

    fn alternative_names(&self) -> Vec<String> {
        self.composite_scores.iter().map(|c| c.name.clone()).collect()
    }

    /// Criteria weights as a chart series.
    pub fn criteria_series(&self) -> ChartSeries {
        ChartSeries {
            title: "Criteria Weights".into(),
            labels: self.criteria_weights.iter().map(|c| c.name.clone()).collect(),
            values: self.criteria_weights.iter().map(|c| c.weight).collect(),
        }
    }

    /// Composite scores as a chart series, in input order.
    pub fn composite_series(&self) -> ChartSeries {
        ChartSeries {
            title: "Composite Alternative Scores".into(),
            labels: self.alternative_names(),
            values: self.composite_scores.iter().map(|c| c.score).collect(),
        }
    }

    /// Alternative weights under the final criterion.
    pub fn last_criterion_series(&self) -> ChartSeries {
        let last = self.alternative_scores.criteria_count().saturating_sub(1);
        let name = self
            .criteria_weights
            .get(last)
            .map(|c| c.name.as_str())
            .unwrap_or_default();
        ChartSeries {
            title: format!("Alternative Weights for Criterion {name}"),
            labels: self.alternative_names(),
            values: self
                .alternative_scores
                .row(last)
                .map(|v| v.as_slice().to_vec())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_id_display() {
        assert_eq!(MatrixId::Criteria.to_string(), "Criteria Table");
        let id = MatrixId::Alternatives {
            criterion: 2,
            name: "Income".into(),
        };
        assert_eq!(id.to_string(), "Alternatives Table for Criterion Income");
    }

    #[test]
    fn test_warning_display() {
        let warning = ConsistencyWarning {
            matrix: MatrixId::Criteria,
            consistency_ratio: 0.25,
            threshold: 0.1,
        };
        assert_eq!(
            warning.to_string(),
            "Failed Consistency check of Criteria Table (CR = 0.2500 >= 0.10)"
        );
    }

    #[test]
    fn test_score_matrix_accessors() {
        let m = AlternativeScoreMatrix::new(vec![
            PriorityVector::uniform(3),
            PriorityVector::uniform(3),
        ]);
        assert_eq!(m.criteria_count(), 2);
        assert_eq!(m.alternative_count(), 3);
        assert!(m.get(1, 2).is_some());
        assert!(m.get(2, 0).is_none());
    }
}
