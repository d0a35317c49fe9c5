//! Literal search and replace over the whole payload.

use super::{ensure_input, Stage, StageKind};
use crate::core::{ResultShape, StageId, StageResult};
use crate::errors::TextflowError;
use tracing::debug;

/// Replaces every occurrence of a pattern with a substitution.
///
/// Matching is literal, leftmost first and non-overlapping, and is not
/// limited to single lines.
///
/// `TEXT -> TEXT`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replace {
    id: StageId,
    pattern: String,
    substitution: String,
}

impl Replace {
    /// Creates a replace stage.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if `pattern` is empty.
    pub fn new(
        id: StageId,
        pattern: impl Into<String>,
        substitution: impl Into<String>,
    ) -> Result<Self, TextflowError> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(TextflowError::invalid_argument(
                StageKind::Replace,
                "pattern must not be empty",
            ));
        }

        Ok(Self {
            id,
            pattern,
            substitution: substitution.into(),
        })
    }

    /// Returns the pattern being replaced.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the replacement text.
    #[must_use]
    pub fn substitution(&self) -> &str {
        &self.substitution
    }
}

impl Stage for Replace {
    fn id(&self) -> StageId {
        self.id
    }

    fn kind(&self) -> StageKind {
        StageKind::Replace
    }

    fn input_shape(&self) -> ResultShape {
        ResultShape::Text
    }

    fn output_shape(&self) -> ResultShape {
        ResultShape::Text
    }

    fn execute(&self, previous: StageResult) -> Result<StageResult, TextflowError> {
        ensure_input(self, &previous)?;

        let text = previous.into_text()?;
        let occurrences = text.matches(self.pattern.as_str()).count();
        if occurrences == 0 {
            return Ok(StageResult::Text(text));
        }

        debug!(stage = %self.id, occurrences, "Replaced pattern");
        Ok(StageResult::Text(text.replace(&self.pattern, &self.substitution)))
    }
}
