//! Payload shapes declared by stages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape of the payload carried by a [`StageResult`](super::StageResult).
///
/// Stages declare one shape they accept and one they produce; a pipeline is
/// well formed only when adjacent stages agree on the shape between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultShape {
    /// No payload.
    None,
    /// An owned text payload.
    Text,
}

impl Default for ResultShape {
    fn default() -> Self {
        Self::None
    }
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Text => write!(f, "TEXT"),
        }
    }
}

impl ResultShape {
    /// Returns true if values of this shape carry a payload.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        matches!(self, Self::Text)
    }
}
