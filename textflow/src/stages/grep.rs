//! Line filtering by literal substring or regular expression.

use super::lines::Lines;
use super::{ensure_input, Stage, StageKind};
use crate::core::{ResultShape, StageId, StageResult};
use crate::errors::TextflowError;
use regex::Regex;
use tracing::debug;

#[derive(Debug, Clone)]
enum Matcher {
    Literal(String),
    Regex(Regex),
}

impl Matcher {
    fn is_match(&self, line: &str) -> bool {
        match self {
            Self::Literal(pattern) => line.contains(pattern.as_str()),
            Self::Regex(regex) => regex.is_match(line),
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Self::Literal(pattern) => pattern,
            Self::Regex(regex) => regex.as_str(),
        }
    }
}

/// Keeps, in order, the lines containing a pattern.
///
/// The default matcher is a literal substring; an empty literal matches
/// every line. [`Grep::regex`] builds a stage matching a regular expression
/// anywhere in the line instead. No matching lines yields empty text.
///
/// `TEXT -> TEXT`
#[derive(Debug, Clone)]
pub struct Grep {
    id: StageId,
    matcher: Matcher,
}

impl Grep {
    /// Creates a stage keeping lines that contain `pattern` literally.
    #[must_use]
    pub fn new(id: StageId, pattern: impl Into<String>) -> Self {
        Self {
            id,
            matcher: Matcher::Literal(pattern.into()),
        }
    }

    /// Creates a stage keeping lines matching the regular expression.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if the expression does not compile.
    pub fn regex(id: StageId, pattern: &str) -> Result<Self, TextflowError> {
        let regex = Regex::new(pattern)
            .map_err(|err| TextflowError::invalid_argument(StageKind::Grep, err.to_string()))?;
        Ok(Self {
            id,
            matcher: Matcher::Regex(regex),
        })
    }

    /// Returns the configured pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    /// Returns true if this stage matches a regular expression.
    #[must_use]
    pub const fn is_regex(&self) -> bool {
        matches!(self.matcher, Matcher::Regex(_))
    }
}

impl Stage for Grep {
    fn id(&self) -> StageId {
        self.id
    }

    fn kind(&self) -> StageKind {
        StageKind::Grep
    }

    fn input_shape(&self) -> ResultShape {
        ResultShape::Text
    }

    fn output_shape(&self) -> ResultShape {
        ResultShape::Text
    }

    fn execute(&self, previous: StageResult) -> Result<StageResult, TextflowError> {
        ensure_input(self, &previous)?;

        let text = previous.as_text()?;
        let mut lines = Lines::split(text);
        let total = lines.len();
        lines.retain(|line| self.matcher.is_match(line));

        debug!(
            stage = %self.id,
            pattern = %self.pattern(),
            kept = lines.len(),
            total,
            "Filtered lines"
        );
        Ok(StageResult::Text(lines.join()))
    }
}
