//! AHP hierarchy evaluation.
//!
//! Combines one criteria-level comparison matrix with one alternatives
//! matrix per criterion:
//!
//! 1. Solve the criteria matrix for the criteria weights.
//! 2. Solve each alternatives matrix for the local alternative weights.
//! 3. Synthesize a composite score per alternative (weighted sum by default).
//! 4. Rank the alternatives; ties keep input order.
//!
//! Inconsistent matrices produce [`ConsistencyWarning`]s on the result;
//! structural problems abort with an [`AhpError`](crate::error::AhpError).
//!
//! # References
//!
//! Saaty (1980), "The Analytic Hierarchy Process", ch. 3

mod cache;
mod config;
mod runner;
mod types;

pub use cache::EvaluationCache;
pub use config::{AggregationMode, EngineConfig};
pub use runner::AhpEngine;
pub use types::{
    AlternativeScoreMatrix, ChartSeries, CompositeScore, ConsistencyWarning, CriterionWeight,
    EvaluationResult, MatrixId,
};
