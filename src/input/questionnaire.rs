//! A complete set of pairwise judgments for one decision.

use crate::engine::{AhpEngine, EvaluationResult};
use crate::error::{AhpError, Result};
use crate::matrix::{upper_len, Judgment, Preference, ReciprocalMatrix};

/// Criteria, alternatives and every pairwise judgment between them.
///
/// Judgment lists hold the strictly upper triangle of each matrix in
/// row-major order. A fresh set starts with every judgment at "equal
/// importance".
///
/// # Examples
///
/// ```
/// use u_ahp::engine::AhpEngine;
/// use u_ahp::input::ComparisonSet;
/// use u_ahp::matrix::{Judgment, Preference};
///
/// let mut set = ComparisonSet::new(
///     vec!["Income".into(), "Dependents".into()],
///     vec!["Si A".into(), "Si B".into()],
/// );
/// set.set_criteria_judgment(0, 1, Judgment::new(5, Preference::Row)).unwrap();
/// set.set_alternative_judgment(0, 0, 1, Judgment::new(3, Preference::Column)).unwrap();
///
/// let result = set.evaluate(&AhpEngine::default()).unwrap();
/// assert_eq!(result.recommended_alternative(), "Si B");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonSet {
    pub criteria: Vec<String>,
    pub alternatives: Vec<String>,
    pub criteria_judgments: Vec<Judgment>,
    /// One upper triangle per criterion.
    pub alternative_judgments: Vec<Vec<Judgment>>,
}

/// Position of `(i, j)`, `i < j`, in a row-major upper triangle.
fn upper_index(n: usize, i: usize, j: usize) -> usize {
    i * n - i * (i + 1) / 2 + (j - i - 1)
}

/// Normalizes `(i, j)` to upper-triangle order, flipping the direction
/// when the pair was given lower-triangle first.
fn orient(n: usize, i: usize, j: usize, judgment: Judgment) -> Result<(usize, Judgment)> {
    if i >= n || j >= n {
        return Err(AhpError::dimension_mismatch(
            "items referenced by comparison",
            n,
            i.max(j) + 1,
        ));
    }
    if i == j {
        return Err(AhpError::invalid_comparison(
            i,
            j,
            f64::from(judgment.strength),
        ));
    }
    if i < j {
        return Ok((upper_index(n, i, j), judgment));
    }
    let flipped = match judgment.preferred {
        Preference::Row => Preference::Column,
        Preference::Column => Preference::Row,
    };
    Ok((
        upper_index(n, j, i),
        Judgment::new(judgment.strength, flipped),
    ))
}

impl ComparisonSet {
    pub fn new(criteria: Vec<String>, alternatives: Vec<String>) -> Self {
        let n = criteria.len();
        let m = alternatives.len();
        Self {
            criteria,
            alternatives,
            criteria_judgments: vec![Judgment::equal(); upper_len(n)],
            alternative_judgments: vec![vec![Judgment::equal(); upper_len(m)]; n],
        }
    }

    /// Records how criterion `i` compares with criterion `j`.
    ///
    /// `Preference::Row` means `i` is preferred. Either order of `i`/`j`
    /// is accepted.
    pub fn set_criteria_judgment(&mut self, i: usize, j: usize, judgment: Judgment) -> Result<()> {
        let (k, judgment) = orient(self.criteria.len(), i, j, judgment)?;
        self.criteria_judgments[k] = judgment;
        Ok(())
    }

    /// Records how alternative `i` compares with alternative `j` under
    /// the given criterion.
    pub fn set_alternative_judgment(
        &mut self,
        criterion: usize,
        i: usize,
        j: usize,
        judgment: Judgment,
    ) -> Result<()> {
        let n = self.criteria.len();
        if criterion >= n {
            return Err(AhpError::dimension_mismatch(
                "criteria referenced by comparison",
                n,
                criterion + 1,
            ));
        }
        let (k, judgment) = orient(self.alternatives.len(), i, j, judgment)?;
        self.alternative_judgments[criterion][k] = judgment;
        Ok(())
    }

    /// Builds the criteria matrix and one alternatives matrix per criterion.
    pub fn build(&self) -> Result<(ReciprocalMatrix, Vec<ReciprocalMatrix>)> {
        let n = self.criteria.len();
        let m = self.alternatives.len();
        if self.alternative_judgments.len() != n {
            return Err(AhpError::dimension_mismatch(
                "alternative judgment sets",
                n,
                self.alternative_judgments.len(),
            ));
        }

        let criteria = ReciprocalMatrix::from_judgments(n, &self.criteria_judgments)?;
        let alternatives = self
            .alternative_judgments
            .iter()
            .map(|judgments| ReciprocalMatrix::from_judgments(m, judgments))
            .collect::<Result<Vec<_>>>()?;
        Ok((criteria, alternatives))
    }

    /// Builds the matrices and evaluates them.
    pub fn evaluate(&self, engine: &AhpEngine) -> Result<EvaluationResult> {
        let (criteria, alternatives) = self.build()?;
        engine.evaluate(&criteria, &alternatives, &self.criteria, &self.alternatives)
    }
}
