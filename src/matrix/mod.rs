//! Pairwise-comparison matrices.
//!
//! A comparison matrix records how strongly each item is preferred over
//! every other item. Only the strictly upper triangle carries information;
//! the diagonal is 1 and the lower triangle holds the reciprocals.
//!
//! # References
//!
//! Saaty (1980), "The Analytic Hierarchy Process"

mod judgment;
mod reciprocal;

pub use judgment::{Judgment, Preference, SAATY_MAX, SAATY_MIN};
pub use reciprocal::{upper_len, ReciprocalMatrix};
