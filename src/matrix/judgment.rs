//! Pairwise judgments on the Saaty 1–9 scale.

/// Lowest judgment strength ("equal importance").
pub const SAATY_MIN: u8 = 1;

/// Highest judgment strength ("extreme importance").
pub const SAATY_MAX: u8 = 9;

/// Which item of a compared pair is preferred.
///
/// For an upper-triangle entry `(i, j)` with `i < j`, `Row` means item `i`
/// dominates item `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Preference {
    /// The row item is preferred.
    Row,
    /// The column item is preferred.
    Column,
}

/// A single pairwise judgment: strength plus direction.
///
/// # Examples
///
/// ```
/// use u_ahp::matrix::{Judgment, Preference};
///
/// let j = Judgment::new(3, Preference::Row);
/// assert!((j.ratio() - 3.0).abs() < 1e-12);
///
/// let j = Judgment::new(4, Preference::Column);
/// assert!((j.ratio() - 0.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Judgment {
    /// Preference strength, an integer in `[1, 9]`.
    pub strength: u8,

    /// Direction of the preference.
    pub preferred: Preference,
}

impl Judgment {
    pub fn new(strength: u8, preferred: Preference) -> Self {
        Self {
            strength,
            preferred,
        }
    }

    /// Equal importance. Direction is irrelevant at strength 1.
    pub fn equal() -> Self {
        Self::new(SAATY_MIN, Preference::Row)
    }

    /// Returns `true` if the strength lies on the Saaty scale.
    pub fn is_valid(&self) -> bool {
        (SAATY_MIN..=SAATY_MAX).contains(&self.strength)
    }

    /// Ratio stored at the upper-triangle position `(row, col)`.
    pub fn ratio(&self) -> f64 {
        let s = f64::from(self.strength);
        match self.preferred {
            Preference::Row => s,
            Preference::Column => 1.0 / s,
        }
    }
}

impl Default for Judgment {
    fn default() -> Self {
        Self::equal()
    }
}
