//! Stage identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque numeric identity of a stage.
///
/// Assigned at construction and used only for diagnostics and for
/// addressing stages from a pipeline definition. Stages never order or
/// compare themselves by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(pub u64);

impl StageId {
    /// Creates a new stage id.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for StageId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
