//! Lexicographic line sorting.

use super::lines::Lines;
use super::{ensure_input, Stage, StageKind};
use crate::core::{ResultShape, StageId, StageResult};
use crate::errors::TextflowError;
use tracing::debug;

/// Sorts lines by byte order, keeping duplicates.
///
/// `TEXT -> TEXT`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    id: StageId,
}

impl Sort {
    /// Creates a sort stage.
    #[must_use]
    pub const fn new(id: StageId) -> Self {
        Self { id }
    }
}

impl Stage for Sort {
    fn id(&self) -> StageId {
        self.id
    }

    fn kind(&self) -> StageKind {
        StageKind::Sort
    }

    fn input_shape(&self) -> ResultShape {
        ResultShape::Text
    }

    fn output_shape(&self) -> ResultShape {
        ResultShape::Text
    }

    fn execute(&self, previous: StageResult) -> Result<StageResult, TextflowError> {
        ensure_input(self, &previous)?;

        let mut lines = Lines::split(previous.as_text()?);
        lines.sort();

        debug!(stage = %self.id, lines = lines.len(), "Sorted lines");
        Ok(StageResult::Text(lines.join()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_shape_mismatch;
    use pretty_assertions::assert_eq;

    fn sort(text: &str) -> String {
        Sort::new(StageId(1))
            .execute(StageResult::text(text))
            .unwrap()
            .into_text()
            .unwrap()
    }

    #[test]
    fn test_sort_lines() {
        assert_eq!(sort("banana\napple\ncherry"), "apple\nbanana\ncherry");
    }

    #[test]
    fn test_sort_keeps_duplicates() {
        assert_eq!(sort("b\na\nb\na"), "a\na\nb\nb");
    }

    #[test]
    fn test_sort_is_byte_order() {
        assert_eq!(sort("b\nB\na\nA\né"), "A\nB\na\nb\né");
    }

    #[test]
    fn test_sort_is_idempotent() {
        let inputs = [
            "",
            "single",
            "z\ny\nx\n",
            "dup\ndup\n\nempty above",
            "Zeta\nalpha\n10\n9\n",
        ];
        for input in inputs {
            let once = sort(input);
            assert_eq!(sort(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_sort_preserves_trailing_newline() {
        assert_eq!(sort("b\na\n"), "a\nb\n");
    }

    #[test]
    fn test_sort_empty_text() {
        assert_eq!(sort(""), "");
    }

    #[test]
    fn test_sort_rejects_none_input() {
        let err = Sort::new(StageId(1))
            .execute(StageResult::none())
            .unwrap_err();
        assert_shape_mismatch(&err, ResultShape::Text, ResultShape::None);
    }
}
