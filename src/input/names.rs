//! Criterion and alternative name handling.

use crate::error::{AhpError, Result};

/// Separator used by the alternatives text field.
pub const DEFAULT_SEPARATOR: char = ',';

/// Splits a delimited list of alternative names.
///
/// Entries are taken verbatim: surrounding whitespace is kept and empty
/// entries (from leading, trailing or doubled separators) are rejected.
///
/// # Examples
///
/// ```
/// use u_ahp::input::parse_alternatives;
///
/// let names = parse_alternatives("Si A,Si B,Si C", ',').unwrap();
/// assert_eq!(names, vec!["Si A", "Si B", "Si C"]);
///
/// assert!(parse_alternatives("Si A,,Si C", ',').is_err());
/// ```
pub fn parse_alternatives(raw: &str, separator: char) -> Result<Vec<String>> {
    let names: Vec<String> = raw.split(separator).map(str::to_string).collect();
    if let Some(index) = names.iter().position(String::is_empty) {
        return Err(AhpError::InvalidName {
            kind: "alternative",
            index,
        });
    }
    Ok(names)
}

/// Removes repeated criteria, keeping the first occurrence of each.
///
/// Empty names are rejected with their position in the original input.
pub fn dedup_criteria<I, S>(names: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for (index, name) in names.into_iter().enumerate() {
        let name = name.into();
        if name.is_empty() {
            return Err(AhpError::InvalidName {
                kind: "criterion",
                index,
            });
        }
        if !out.contains(&name) {
            out.push(name);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_whitespace() {
        let names = parse_alternatives("Si A, Si B", DEFAULT_SEPARATOR).unwrap();
        assert_eq!(names, vec!["Si A", " Si B"]);
    }

    #[test]
    fn test_parse_rejects_empty_entries() {
        assert_eq!(
            parse_alternatives("", DEFAULT_SEPARATOR),
            Err(AhpError::InvalidName {
                kind: "alternative",
                index: 0
            })
        );
        assert_eq!(
            parse_alternatives("A,B,", DEFAULT_SEPARATOR),
            Err(AhpError::InvalidName {
                kind: "alternative",
                index: 2
            })
        );
    }

    #[test]
    fn test_parse_custom_separator() {
        let names = parse_alternatives("A;B", ';').unwrap();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_dedup_preserves_order() {
        let names = dedup_criteria(["Income", "Job", "Income", "Status", "Job"]).unwrap();
        assert_eq!(names, vec!["Income", "Job", "Status"]);
    }

    #[test]
    fn test_dedup_rejects_empty() {
        let err = dedup_criteria(vec!["Income".to_string(), String::new()]).unwrap_err();
        assert_eq!(
            err,
            AhpError::InvalidName {
                kind: "criterion",
                index: 1
            }
        );
    }
}
