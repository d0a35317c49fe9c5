//! The tagged value passed between stages.

use super::ResultShape;
use crate::errors::TextflowError;
use serde::{Deserialize, Serialize};

/// The input and output of every stage.
///
/// The variant is the shape tag, so a `None` result can never carry text.
/// Accessors that read the wrong variant return
/// [`TextflowError::ShapeMismatch`] instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", content = "text", rename_all = "snake_case")]
pub enum StageResult {
    /// No payload.
    None,
    /// An owned text payload.
    Text(String),
}

impl Default for StageResult {
    fn default() -> Self {
        Self::None
    }
}

impl From<String> for StageResult {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for StageResult {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl StageResult {
    /// Creates a result without payload.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Creates a text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Returns the shape tag of this result.
    #[must_use]
    pub const fn shape(&self) -> ResultShape {
        match self {
            Self::None => ResultShape::None,
            Self::Text(_) => ResultShape::Text,
        }
    }

    /// Returns true if this result carries no payload.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns true if this result carries text.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Borrows the text payload.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch if the result carries no payload.
    pub fn as_text(&self) -> Result<&str, TextflowError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::None => Err(TextflowError::shape_mismatch(
                None,
                ResultShape::Text,
                ResultShape::None,
            )),
        }
    }

    /// Takes ownership of the text payload.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch if the result carries no payload.
    pub fn into_text(self) -> Result<String, TextflowError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::None => Err(TextflowError::shape_mismatch(
                None,
                ResultShape::Text,
                ResultShape::None,
            )),
        }
    }

    /// Asserts that the result carries no payload.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch if the result carries text.
    pub fn expect_none(&self) -> Result<(), TextflowError> {
        match self {
            Self::None => Ok(()),
            Self::Text(_) => Err(TextflowError::shape_mismatch(
                None,
                ResultShape::None,
                ResultShape::Text,
            )),
        }
    }

    /// Returns the payload length in bytes, zero for `None`.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Text(text) => text.len(),
        }
    }

    /// Returns true if there is no payload or the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
