//! Priority vectors and consistency checking.
//!
//! The priority of each item in a comparison matrix is its component of
//! the normalized principal eigenvector. How far the judgments are from
//! perfect transitivity is measured by the consistency ratio
//! `CR = CI / RI`, where `RI` is the mean consistency index of random
//! matrices of the same size.
//!
//! # References
//!
//! - Saaty (1977), "A scaling method for priorities in hierarchical structures"
//! - Saaty (1980), "The Analytic Hierarchy Process"

mod config;
mod random_index;
mod solver;
mod types;

pub use config::{SolverConfig, DEFAULT_CONSISTENCY_THRESHOLD};
pub use random_index::{
    estimate_random_index, random_index, MAX_TABULATED_SIZE, RANDOM_INDEX_TABLE,
};
pub use solver::PriorityVectorSolver;
pub use types::{ConsistencyReport, PriorityVector};
