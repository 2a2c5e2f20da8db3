//! Memoization of evaluations keyed by input contents.

use super::runner::AhpEngine;
use super::types::EvaluationResult;
use crate::error::Result;
use crate::matrix::ReciprocalMatrix;
use std::collections::HashMap;

/// Exact identity of one evaluation: matrix bits, names and the settings
/// that affect the output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    matrices: Vec<Vec<u64>>,
    criteria: Vec<String>,
    alternatives: Vec<String>,
    config: ConfigKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ConfigKey {
    threshold: u64,
    max_iterations: usize,
    aggregation: super::config::AggregationMode,
    tie_epsilon: u64,
}

fn matrix_bits(matrix: &ReciprocalMatrix) -> Vec<u64> {
    matrix.rows().iter().flatten().map(|v| v.to_bits()).collect()
}

/// Caller-owned memo for [`AhpEngine::evaluate`].
///
/// Evaluation is a pure function of its inputs, so entries never go
/// stale and there is no invalidation. Only successful results are
/// stored; errors are recomputed on every call. Keys compare matrix
/// entries bit-for-bit, so `0.5` and `1.0 / 2.0` hit the same entry but
/// `1.0 / 3.0` and `0.333` do not.
///
/// # Examples
///
/// ```
/// use u_ahp::engine::{AhpEngine, EvaluationCache};
/// use u_ahp::matrix::ReciprocalMatrix;
///
/// let engine = AhpEngine::default();
/// let mut cache = EvaluationCache::new();
/// let criteria = ReciprocalMatrix::identity(1).unwrap();
/// let alts = [ReciprocalMatrix::complete(2, &[4.0]).unwrap()];
///
/// let first = cache.get_or_evaluate(&engine, &criteria, &alts, &["Cost"], &["A", "B"]).unwrap();
/// let second = cache.get_or_evaluate(&engine, &criteria, &alts, &["Cost"], &["A", "B"]).unwrap();
/// assert_eq!(first, second);
/// assert_eq!(cache.hits(), 1);
/// ```
#[derive(Debug, Default)]
pub struct EvaluationCache {
    entries: HashMap<CacheKey, EvaluationResult>,
    hits: usize,
    misses: usize,
}

impl EvaluationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for these inputs, evaluating on a miss.
    pub fn get_or_evaluate<C, A>(
        &mut self,
        engine: &AhpEngine,
        criteria_matrix: &ReciprocalMatrix,
        alternative_matrices: &[ReciprocalMatrix],
        criteria_names: &[C],
        alternative_names: &[A],
    ) -> Result<EvaluationResult>
    where
        C: AsRef<str>,
        A: AsRef<str>,
    {
        let config = engine.config();
        let key = CacheKey {
            matrices: std::iter::once(criteria_matrix)
                .chain(alternative_matrices)
                .map(matrix_bits)
                .collect(),
            criteria: criteria_names.iter().map(|s| s.as_ref().to_string()).collect(),
            alternatives: alternative_names
                .iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
            config: ConfigKey {
                threshold: config.solver.consistency_threshold.to_bits(),
                max_iterations: config.solver.max_iterations,
                aggregation: config.aggregation,
                tie_epsilon: config.tie_epsilon.to_bits(),
            },
        };

        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            tracing::debug!(entries = self.entries.len(), "evaluation cache hit");
            return Ok(hit.clone());
        }

        self.misses += 1;
        let result = engine.evaluate(
            criteria_matrix,
            alternative_matrices,
            criteria_names,
            alternative_names,
        )?;
        self.entries.insert(key, result.clone());
        tracing::debug!(entries = self.entries.len(), "evaluation cache miss");
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Drops all entries and resets the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
