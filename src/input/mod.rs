//! Input boundary: names and raw judgments from a questionnaire front end.
//!
//! Front ends collect criterion names (usually from a multi-select),
//! alternative names (usually a comma-separated text field) and one
//! strength + direction judgment per pair. This module turns those into
//! validated [`ReciprocalMatrix`](crate::matrix::ReciprocalMatrix) values.

mod names;
mod questionnaire;

pub use names::{dedup_criteria, parse_alternatives, DEFAULT_SEPARATOR};
pub use questionnaire::ComparisonSet;
