//! Closed dispatch over the built-in stage kinds.

use super::{Dump, Grep, ReadFile, Replace, Sort, Stage, StageKind, WriteFile};
use crate::core::{ResultShape, StageId, StageResult};
use crate::errors::TextflowError;

/// Any one of the built-in stages.
///
/// Matching on this enum is exhaustive, so adding a stage kind forces every
/// dispatch site to handle it.
#[derive(Debug, Clone)]
pub enum BuiltinStage {
    /// See [`ReadFile`].
    Read(ReadFile),
    /// See [`WriteFile`].
    Write(WriteFile),
    /// See [`Grep`].
    Grep(Grep),
    /// See [`Sort`].
    Sort(Sort),
    /// See [`Replace`].
    Replace(Replace),
    /// See [`Dump`].
    Dump(Dump),
}

impl BuiltinStage {
    fn as_stage(&self) -> &dyn Stage {
        match self {
            Self::Read(stage) => stage,
            Self::Write(stage) => stage,
            Self::Grep(stage) => stage,
            Self::Sort(stage) => stage,
            Self::Replace(stage) => stage,
            Self::Dump(stage) => stage,
        }
    }
}

impl Stage for BuiltinStage {
    fn id(&self) -> StageId {
        self.as_stage().id()
    }

    fn kind(&self) -> StageKind {
        match self {
            Self::Read(_) => StageKind::Read,
            Self::Write(_) => StageKind::Write,
            Self::Grep(_) => StageKind::Grep,
            Self::Sort(_) => StageKind::Sort,
            Self::Replace(_) => StageKind::Replace,
            Self::Dump(_) => StageKind::Dump,
        }
    }

    fn input_shape(&self) -> ResultShape {
        self.as_stage().input_shape()
    }

    fn output_shape(&self) -> ResultShape {
        self.as_stage().output_shape()
    }

    fn execute(&self, previous: StageResult) -> Result<StageResult, TextflowError> {
        self.as_stage().execute(previous)
    }
}

impl From<ReadFile> for BuiltinStage {
    fn from(stage: ReadFile) -> Self {
        Self::Read(stage)
    }
}

impl From<WriteFile> for BuiltinStage {
    fn from(stage: WriteFile) -> Self {
        Self::Write(stage)
    }
}

impl From<Grep> for BuiltinStage {
    fn from(stage: Grep) -> Self {
        Self::Grep(stage)
    }
}

impl From<Sort> for BuiltinStage {
    fn from(stage: Sort) -> Self {
        Self::Sort(stage)
    }
}

impl From<Replace> for BuiltinStage {
    fn from(stage: Replace) -> Self {
        Self::Replace(stage)
    }
}

impl From<Dump> for BuiltinStage {
    fn from(stage: Dump) -> Self {
        Self::Dump(stage)
    }
}
