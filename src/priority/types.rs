//! Priority vectors and consistency reports.

/// Normalized weights aligned with the rows of a comparison matrix.
///
/// Components are non-negative and sum to 1.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PriorityVector {
    weights: Vec<f64>,
}

impl PriorityVector {
    pub(crate) fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    /// Uniform weights `1/n`.
    pub fn uniform(n: usize) -> Self {
        Self::new(vec![1.0 / n as f64; n])
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<f64> {
        self.weights.get(i).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.weights
    }

    /// Index of the largest weight; the first one wins on ties.
    ///
    /// Returns `None` for an empty vector.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &w) in self.weights.iter().enumerate() {
            match best {
                Some(b) if w <= self.weights[b] => {}
                _ => best = Some(i),
            }
        }
        best
    }
}

impl AsRef<[f64]> for PriorityVector {
    fn as_ref(&self) -> &[f64] {
        &self.weights
    }
}

/// Consistency diagnostics of one comparison matrix.
///
/// `CI = (λ_max − n) / (n − 1)`, `CR = CI / RI`. For `n ≤ 2` the random
/// index is 0 and the ratio is reported as 0.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsistencyReport {
    /// Matrix size.
    pub size: usize,

    /// Principal eigenvalue (largest real part).
    pub lambda_max: f64,

    /// Consistency index.
    pub consistency_index: f64,

    /// Random index for this size.
    pub random_index: f64,

    /// Consistency ratio.
    pub consistency_ratio: f64,

    /// Ratio at or above which the matrix is flagged.
    pub threshold: f64,
}

impl ConsistencyReport {
    /// `true` when the ratio is below the threshold.
    pub fn is_consistent(&self) -> bool {
        self.consistency_ratio < self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_first_on_tie() {
        let v = PriorityVector::new(vec![0.2, 0.4, 0.4]);
        assert_eq!(v.argmax(), Some(1));
        assert_eq!(PriorityVector::new(vec![]).argmax(), None);
    }

    #[test]
    fn test_uniform() {
        let v = PriorityVector::uniform(4);
        assert_eq!(v.len(), 4);
        assert!((v.as_slice().iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_report_threshold_is_exclusive() {
        let report = ConsistencyReport {
            size: 3,
            lambda_max: 3.116,
            consistency_index: 0.058,
            random_index: 0.58,
            consistency_ratio: 0.1,
            threshold: 0.1,
        };
        assert!(!report.is_consistent());
    }
}
