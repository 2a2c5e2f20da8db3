//! Saaty's random consistency index.

use crate::eigen::EigenDecomposition;
use crate::error::{AhpError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest matrix size with a tabulated random index.
pub const MAX_TABULATED_SIZE: usize = 11;

/// Random index by matrix size; entry `k` is for `n = k + 1`.
pub const RANDOM_INDEX_TABLE: [f64; MAX_TABULATED_SIZE] =
    [0.0, 0.0, 0.58, 0.9, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49, 1.51];

/// The 17 values of the Saaty scale and their reciprocals.
const SAATY_VALUES: [f64; 17] = [
    1.0 / 9.0,
    1.0 / 8.0,
    1.0 / 7.0,
    1.0 / 6.0,
    1.0 / 5.0,
    1.0 / 4.0,
    1.0 / 3.0,
    1.0 / 2.0,
    1.0,
    2.0,
    3.0,
    4.0,
    5.0,
    6.0,
    7.0,
    8.0,
    9.0,
];

/// Looks up the tabulated random index for an `n × n` matrix.
///
/// # Errors
///
/// - [`AhpError::InvalidComparison`] for `n == 0`.
/// - [`AhpError::UnsupportedSize`] for `n > 11`.
pub fn random_index(n: usize) -> Result<f64> {
    match n {
        0 => Err(AhpError::empty_matrix()),
        1..=MAX_TABULATED_SIZE => Ok(RANDOM_INDEX_TABLE[n - 1]),
        _ => Err(AhpError::UnsupportedSize {
            size: n,
            max: MAX_TABULATED_SIZE,
        }),
    }
}

/// Estimates the random index by Monte Carlo.
///
/// Draws `samples` reciprocal matrices whose upper-triangle entries are
/// uniform over the 17 Saaty-scale values and returns their mean
/// consistency index. Sizes beyond the table are allowed.
///
/// # Examples
///
/// ```
/// use u_ahp::priority::estimate_random_index;
///
/// let ri = estimate_random_index(4, 500, Some(7)).unwrap();
/// assert!(ri > 0.7 && ri < 1.1);
/// ```
///
/// # References
///
/// Saaty (1980); Alonso & Lamata (2006), "Consistency in the analytic
/// hierarchy process: a new approach"
pub fn estimate_random_index(n: usize, samples: usize, seed: Option<u64>) -> Result<f64> {
    if n == 0 {
        return Err(AhpError::empty_matrix());
    }
    if samples == 0 {
        return Err(AhpError::InvalidConfig("samples must be at least 1".into()));
    }
    if n <= 2 {
        return Ok(0.0);
    }

    let mut rng = StdRng::seed_from_u64(seed.unwrap_or(42));
    let mut rows = vec![vec![1.0; n]; n];
    let mut total_ci = 0.0;

    for _ in 0..samples {
        for i in 0..n {
            for j in (i + 1)..n {
                let value = SAATY_VALUES[rng.random_range(0..SAATY_VALUES.len())];
                rows[i][j] = value;
                rows[j][i] = 1.0 / value;
            }
        }
        let eig = EigenDecomposition::new(&rows, 0)?;
        let lambda_max = eig.real_eigenvalues()[eig.dominant_index()];
        total_ci += (lambda_max - n as f64) / (n as f64 - 1.0);
    }

    let estimate = total_ci / samples as f64;
    tracing::debug!(n, samples, estimate, "estimated random index");
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup() {
        assert_eq!(random_index(1).unwrap(), 0.0);
        assert_eq!(random_index(2).unwrap(), 0.0);
        assert!((random_index(3).unwrap() - 0.58).abs() < 1e-12);
        assert!((random_index(11).unwrap() - 1.51).abs() < 1e-12);
    }

    #[test]
    fn test_table_bounds() {
        assert_eq!(random_index(0), Err(AhpError::empty_matrix()));
        assert_eq!(
            random_index(12),
            Err(AhpError::UnsupportedSize { size: 12, max: 11 })
        );
    }

    #[test]
    fn test_table_is_non_decreasing() {
        for pair in RANDOM_INDEX_TABLE.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_estimate_small_sizes_are_zero() {
        assert_eq!(estimate_random_index(1, 10, None).unwrap(), 0.0);
        assert_eq!(estimate_random_index(2, 10, None).unwrap(), 0.0);
    }

    #[test]
    fn test_estimate_is_deterministic_with_seed() {
        let a = estimate_random_index(5, 200, Some(42)).unwrap();
        let b = estimate_random_index(5, 200, Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_estimate_near_table() {
        // Published simulations land within ~0.1 of Saaty's table.
        for n in 3..=6 {
            let estimate = estimate_random_index(n, 2000, Some(42)).unwrap();
            let tabulated = random_index(n).unwrap();
            assert!(
                (estimate - tabulated).abs() < 0.15,
                "n={n}: estimate {estimate} vs table {tabulated}"
            );
        }
    }

    #[test]
    fn test_estimate_rejects_zero_samples() {
        assert!(matches!(
            estimate_random_index(3, 0, None),
            Err(AhpError::InvalidConfig(_))
        ));
    }
}
