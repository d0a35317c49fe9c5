//! The closed set of built-in stage kinds.

use crate::core::ResultShape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of work a built-in stage performs.
///
/// Each kind fixes the shapes its stages accept and produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Reads a whole file into memory (`NONE -> TEXT`).
    Read,
    /// Writes text to a file and drops it (`TEXT -> NONE`).
    Write,
    /// Keeps the lines matching a pattern (`TEXT -> TEXT`).
    Grep,
    /// Sorts lines by byte order (`TEXT -> TEXT`).
    Sort,
    /// Replaces every occurrence of a pattern (`TEXT -> TEXT`).
    Replace,
    /// Writes text to a file and forwards it (`TEXT -> TEXT`).
    Dump,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StageKind {
    /// Returns the canonical lowercase name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Grep => "grep",
            Self::Sort => "sort",
            Self::Replace => "replace",
            Self::Dump => "dump",
        }
    }

    /// Returns the shape stages of this kind accept.
    #[must_use]
    pub const fn input_shape(&self) -> ResultShape {
        match self {
            Self::Read => ResultShape::None,
            Self::Write | Self::Grep | Self::Sort | Self::Replace | Self::Dump => ResultShape::Text,
        }
    }

    /// Returns the shape stages of this kind produce.
    #[must_use]
    pub const fn output_shape(&self) -> ResultShape {
        match self {
            Self::Write => ResultShape::None,
            Self::Read | Self::Grep | Self::Sort | Self::Replace | Self::Dump => ResultShape::Text,
        }
    }

    /// Returns true if stages of this kind touch the filesystem.
    #[must_use]
    pub const fn has_side_effects(&self) -> bool {
        matches!(self, Self::Read | Self::Write | Self::Dump)
    }
}
