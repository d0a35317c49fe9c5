//! Writing text to a file, either as a sink or as a tee.

use super::{ensure_input, Stage, StageKind};
use crate::core::{ResultShape, StageId, StageResult};
use crate::errors::TextflowError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes `text` to `path`, truncating any existing content.
pub(crate) fn write_to_path(path: &Path, text: &str) -> Result<(), TextflowError> {
    std::fs::write(path, text).map_err(|err| TextflowError::io(path, err))?;
    debug!(path = %path.display(), bytes = text.len(), "Wrote file");
    Ok(())
}

/// Writes the incoming text to the named file and ends the data flow.
///
/// `TEXT -> NONE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFile {
    id: StageId,
    path: PathBuf,
}

impl WriteFile {
    /// Creates a stage writing to `path`.
    #[must_use]
    pub fn new(id: StageId, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: path.into(),
        }
    }

    /// Returns the file this stage writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Stage for WriteFile {
    fn id(&self) -> StageId {
        self.id
    }

    fn kind(&self) -> StageKind {
        StageKind::Write
    }

    fn input_shape(&self) -> ResultShape {
        ResultShape::Text
    }

    fn output_shape(&self) -> ResultShape {
        ResultShape::None
    }

    fn execute(&self, previous: StageResult) -> Result<StageResult, TextflowError> {
        ensure_input(self, &previous)?;
        write_to_path(&self.path, previous.as_text()?)?;
        Ok(StageResult::none())
    }
}

/// Writes the incoming text to the named file and passes it on unchanged.
///
/// `TEXT -> TEXT`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dump {
    id: StageId,
    path: PathBuf,
}

impl Dump {
    /// Creates a stage copying its input to `path`.
    #[must_use]
    pub fn new(id: StageId, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: path.into(),
        }
    }

    /// Returns the file this stage writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Stage for Dump {
    fn id(&self) -> StageId {
        self.id
    }

    fn kind(&self) -> StageKind {
        StageKind::Dump
    }

    fn input_shape(&self) -> ResultShape {
        ResultShape::Text
    }

    fn output_shape(&self) -> ResultShape {
        ResultShape::Text
    }

    fn execute(&self, previous: StageResult) -> Result<StageResult, TextflowError> {
        ensure_input(self, &previous)?;
        write_to_path(&self.path, previous.as_text()?)?;
        Ok(previous)
    }
}
