//! Reading a whole file into memory.

use super::{ensure_input, Stage, StageKind};
use crate::core::{ResultShape, StageId, StageResult};
use crate::errors::TextflowError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the named file into a single text payload.
///
/// `NONE -> TEXT`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFile {
    id: StageId,
    path: PathBuf,
}

impl ReadFile {
    /// Creates a stage reading `path`.
    #[must_use]
    pub fn new(id: StageId, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: path.into(),
        }
    }

    /// Returns the file this stage reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Stage for ReadFile {
    fn id(&self) -> StageId {
        self.id
    }

    fn kind(&self) -> StageKind {
        StageKind::Read
    }

    fn input_shape(&self) -> ResultShape {
        ResultShape::None
    }

    fn output_shape(&self) -> ResultShape {
        ResultShape::Text
    }

    fn execute(&self, previous: StageResult) -> Result<StageResult, TextflowError> {
        ensure_input(self, &previous)?;

        let text = std::fs::read_to_string(&self.path)
            .map_err(|err| TextflowError::io(&self.path, err))?;

        debug!(
            stage = %self.id,
            path = %self.path.display(),
            bytes = text.len(),
            "Read file"
        );
        Ok(StageResult::Text(text))
    }
}
