//! Reciprocal pairwise-comparison matrix.

use super::judgment::Judgment;
use crate::error::{AhpError, Result};

/// Relative tolerance for the reciprocity check in [`ReciprocalMatrix::from_rows`].
const RECIPROCITY_TOLERANCE: f64 = 1e-9;

/// A square matrix of positive preference ratios with unit diagonal and
/// `M[j][i] == 1 / M[i][j]`.
///
/// Instances are only produced by the validating constructors and cannot
/// be mutated afterwards.
///
/// # Examples
///
/// ```
/// use u_ahp::matrix::ReciprocalMatrix;
///
/// // Cost vs Quality = 3
/// let m = ReciprocalMatrix::complete(2, &[3.0]).unwrap();
/// assert_eq!(m.size(), 2);
/// assert!((m.get(1, 0) - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReciprocalMatrix {
    rows: Vec<Vec<f64>>,
}

/// Number of strictly-upper-triangle entries of an `n × n` matrix.
pub fn upper_len(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

fn check_ratio(row: usize, col: usize, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AhpError::invalid_comparison(row, col, value))
    }
}

impl ReciprocalMatrix {
    /// Builds a matrix from its strictly upper triangle.
    ///
    /// `upper` lists `M[i][j]` for `i < j` in row-major order:
    /// `(0,1), (0,2), …, (0,n-1), (1,2), …`. The diagonal is set to 1 and
    /// the lower triangle to the reciprocals.
    pub fn complete(n: usize, upper: &[f64]) -> Result<Self> {
        if n == 0 {
            return Err(AhpError::empty_matrix());
        }
        let expected = upper_len(n);
        if upper.len() != expected {
            return Err(AhpError::dimension_mismatch(
                "upper triangle",
                expected,
                upper.len(),
            ));
        }

        let mut rows = vec![vec![1.0; n]; n];
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                let value = upper[k];
                k += 1;
                check_ratio(i, j, value)?;
                rows[i][j] = value;
                rows[j][i] = 1.0 / value;
            }
        }
        Ok(Self { rows })
    }

    /// Builds a matrix from upper-triangle judgments in the same row-major
    /// order as [`complete`](Self::complete).
    pub fn from_judgments(n: usize, judgments: &[Judgment]) -> Result<Self> {
        if n == 0 {
            return Err(AhpError::empty_matrix());
        }
        let expected = upper_len(n);
        if judgments.len() != expected {
            return Err(AhpError::dimension_mismatch(
                "judgments",
                expected,
                judgments.len(),
            ));
        }

        let mut upper = Vec::with_capacity(expected);
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                let judgment = &judgments[k];
                if !judgment.is_valid() {
                    return Err(AhpError::invalid_comparison(
                        i,
                        j,
                        f64::from(judgment.strength),
                    ));
                }
                upper.push(judgment.ratio());
                k += 1;
            }
        }
        Self::complete(n, &upper)
    }

    /// Validates a fully populated matrix.
    ///
    /// Diagonal entries must be exactly 1 and every pair must satisfy
    /// `M[i][j] * M[j][i] == 1` within a relative tolerance of `1e-9`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(AhpError::empty_matrix());
        }
        for row in &rows {
            if row.len() != n {
                return Err(AhpError::dimension_mismatch("matrix row", n, row.len()));
            }
        }

        for i in 0..n {
            if rows[i][i] != 1.0 {
                return Err(AhpError::invalid_comparison(i, i, rows[i][i]));
            }
            for j in (i + 1)..n {
                check_ratio(i, j, rows[i][j])?;
                check_ratio(j, i, rows[j][i])?;
                if (rows[i][j] * rows[j][i] - 1.0).abs() > RECIPROCITY_TOLERANCE {
                    return Err(AhpError::invalid_comparison(j, i, rows[j][i]));
                }
            }
        }
        Ok(Self { rows })
    }

    /// Perfectly consistent matrix `M[i][j] = w[i] / w[j]`.
    ///
    /// Every ratio must be positive and finite; a zero, negative or
    /// overflowing ratio is reported at the cell where it appears.
    pub fn from_weights(weights: &[f64]) -> Result<Self> {
        if weights.is_empty() {
            return Err(AhpError::empty_matrix());
        }
        let n = weights.len();
        if n == 1 {
            check_ratio(0, 0, weights[0])?;
        }
        let mut rows = vec![vec![1.0; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let ratio = weights[i] / weights[j];
                    check_ratio(i, j, ratio)?;
                    rows[i][j] = ratio;
                }
            }
        }
        Ok(Self { rows })
    }

    /// Matrix where every judgment is "equal importance".
    pub fn identity(n: usize) -> Result<Self> {
        Self::complete(n, &vec![1.0; upper_len(n)])
    }

    /// Number of compared items.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Entry `M[i][j]`.
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// The strictly upper triangle in row-major order.
    pub fn upper_triangle(&self) -> Vec<f64> {
        let n = self.size();
        let mut upper = Vec::with_capacity(upper_len(n));
        for i in 0..n {
            upper.extend_from_slice(&self.rows[i][(i + 1)..]);
        }
        upper
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn upper_triangle() -> impl Strategy<Value = (usize, Vec<f64>)> {
        (1usize..=11).prop_flat_map(|n| {
            prop::collection::vec(1.0f64 / 9.0..=9.0, upper_len(n)).prop_map(move |v| (n, v))
        })
    }

    proptest! {
        /// Every completed matrix is reciprocal with a unit diagonal.
        #[test]
        fn complete_is_reciprocal((n, upper) in upper_triangle()) {
            let m = ReciprocalMatrix::complete(n, &upper).unwrap();
            for i in 0..n {
                prop_assert_eq!(m.get(i, i), 1.0);
                for j in 0..n {
                    prop_assert!((m.get(i, j) * m.get(j, i) - 1.0).abs() < 1e-12);
                }
            }
        }

        /// A completed matrix passes full-matrix validation.
        #[test]
        fn complete_passes_from_rows((n, upper) in upper_triangle()) {
            let m = ReciprocalMatrix::complete(n, &upper).unwrap();
            let again = ReciprocalMatrix::from_rows(m.rows().to_vec()).unwrap();
            prop_assert_eq!(m, again);
        }
    }
}
