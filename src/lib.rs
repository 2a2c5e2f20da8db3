//! Analytic Hierarchy Process (AHP) engine.
//!
//! Ranks alternatives against multiple criteria from pairwise comparisons:
//!
//! - **Matrix**: Reciprocal pairwise-comparison matrices built from
//!   upper-triangle ratios or Saaty-scale judgments.
//! - **Eigen**: Dense eigen-decomposition for general real matrices
//!   (Hessenberg reduction + Francis double-shift QR).
//! - **Priority**: Principal-eigenvector weights with consistency index,
//!   random index and consistency ratio.
//! - **Engine**: Two-level synthesis (criteria weights × per-criterion
//!   alternative weights), ranking, consistency warnings and an optional
//!   memo of evaluations.
//! - **Input**: Name parsing and questionnaire-style judgment collection.
//!
//! # Architecture
//!
//! Like the other U-Engine algorithm crates, this crate holds no
//! presentation concerns: front ends supply completed judgments and render
//! the returned weights. All computations are synchronous, deterministic
//! and free of shared state.
//!
//! # Example
//!
//! ```
//! use u_ahp::engine::AhpEngine;
//! use u_ahp::matrix::ReciprocalMatrix;
//!
//! let criteria = ReciprocalMatrix::complete(2, &[3.0]).unwrap();
//! let alternatives = vec![
//!     ReciprocalMatrix::complete(3, &[2.0, 4.0, 2.0]).unwrap(),
//!     ReciprocalMatrix::complete(3, &[0.5, 0.25, 0.5]).unwrap(),
//! ];
//!
//! let result = AhpEngine::default()
//!     .evaluate(&criteria, &alternatives, &["Cost", "Quality"], &["A", "B", "C"])
//!     .unwrap();
//!
//! assert!(result.is_consistent());
//! assert_eq!(result.ranked_alternatives(), vec!["A", "B", "C"]);
//! ```

pub mod eigen;
pub mod engine;
pub mod error;
pub mod input;
pub mod matrix;
pub mod priority;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{AhpError, Result};
