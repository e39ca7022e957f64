//! Selection requests as the user expresses them.

use crate::resolve::SelectionError;

/// Internal index meaning "every monitor". `0` means the same to users.
pub const ALL_SENTINEL: i64 = -1;

/// Pattern meaning "every monitor".
pub const ALL_PATTERN: &str = "*";

pub(crate) fn is_all_index(value: i64) -> bool {
    value == 0 || value == ALL_SENTINEL
}

/// What to cover, in exactly one of the two addressing modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionCriterion {
    /// 1-based monitor indices; `0` or [`ALL_SENTINEL`] select everything.
    IndexSet(Vec<i64>),
    /// Case-insensitive name fragments; a lone `"*"` selects everything.
    PatternSet(Vec<String>),
}

impl SelectionCriterion {
    pub fn all() -> Self {
        Self::IndexSet(vec![ALL_SENTINEL])
    }
}

/// The raw index and pattern lists collected from the command line.
///
/// At most one of the two may be non-empty. When both are empty the request
/// selects every monitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    pub indices: Vec<i64>,
    pub patterns: Vec<String>,
}

impl SelectionRequest {
    pub fn by_index(indices: impl IntoIterator<Item = i64>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            patterns: Vec::new(),
        }
    }

    pub fn by_name<S: Into<String>>(patterns: impl IntoIterator<Item = S>) -> Self {
        Self {
            indices: Vec::new(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Pick the addressing mode, rejecting requests that use both.
    pub fn criterion(&self) -> Result<SelectionCriterion, SelectionError> {
        match (self.indices.is_empty(), self.patterns.is_empty()) {
            (false, false) => Err(SelectionError::ConflictingSelectionMode),
            (false, true) => Ok(SelectionCriterion::IndexSet(self.indices.clone())),
            (true, false) => Ok(SelectionCriterion::PatternSet(self.patterns.clone())),
            (true, true) => Ok(SelectionCriterion::all()),
        }
    }
}

/// Parse `-m` values. Each value may hold several indices separated by
/// commas or whitespace, so `["1,2", "4"]` and `["1 2 4"]` are equivalent.
///
/// Negative tokens are rejected: [`ALL_SENTINEL`] is only ever produced
/// internally, users spell "all" as `0`.
pub fn parse_index_tokens<S: AsRef<str>>(values: &[S]) -> Result<Vec<i64>, SelectionError> {
    values
        .iter()
        .flat_map(|value| {
            value
                .as_ref()
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
        })
        .map(|token| {
            token
                .parse::<i64>()
                .ok()
                .filter(|value| *value >= 0)
                .ok_or_else(|| SelectionError::InvalidIndexToken {
                    token: token.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_selects_everything() {
        assert_eq!(
            SelectionRequest::default().criterion().unwrap(),
            SelectionCriterion::all()
        );
    }

    #[test]
    fn both_modes_conflict() {
        let request = SelectionRequest {
            indices: vec![1],
            patterns: vec!["Dell".to_string()],
        };
        assert_eq!(
            request.criterion(),
            Err(SelectionError::ConflictingSelectionMode)
        );
    }

    #[test]
    fn single_mode_passes_through() {
        assert_eq!(
            SelectionRequest::by_index([2, 3]).criterion().unwrap(),
            SelectionCriterion::IndexSet(vec![2, 3])
        );
        assert_eq!(
            SelectionRequest::by_name(["hp"]).criterion().unwrap(),
            SelectionCriterion::PatternSet(vec!["hp".to_string()])
        );
    }

    #[test]
    fn index_tokens_split_on_commas_and_spaces() {
        let parsed = parse_index_tokens(&["1,2", " 3 ", "4, 5", ",6,"]).unwrap();
        assert_eq!(parsed, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn index_tokens_keep_zero_and_large_values_for_validation_later() {
        assert_eq!(parse_index_tokens(&["0", "99"]).unwrap(), vec![0, 99]);
    }

    #[test]
    fn index_tokens_reject_the_internal_sentinel() {
        for values in [&["-1"][..], &["2", "-1"][..], &["2,-1"][..]] {
            assert_eq!(
                parse_index_tokens(values),
                Err(SelectionError::InvalidIndexToken {
                    token: "-1".to_string()
                })
            );
        }
    }

    #[test]
    fn index_tokens_reject_other_negatives() {
        assert_eq!(
            parse_index_tokens(&["-3"]),
            Err(SelectionError::InvalidIndexToken {
                token: "-3".to_string()
            })
        );
    }

    #[test]
    fn index_tokens_reject_trailing_garbage() {
        assert_eq!(
            parse_index_tokens(&["1", "2x"]),
            Err(SelectionError::InvalidIndexToken {
                token: "2x".to_string()
            })
        );
    }
}
