//! Stage doubles for testing.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::core::{ResultShape, StageId, StageResult};
use crate::errors::TextflowError;
use crate::stages::{ensure_input, Stage, StageKind};

// Built-in kind with matching shapes, reported by a double until
// `with_kind` says otherwise.
const fn kind_for(input: ResultShape, output: ResultShape) -> StageKind {
    match (input, output) {
        (ResultShape::None, _) => StageKind::Read,
        (ResultShape::Text, ResultShape::None) => StageKind::Write,
        (ResultShape::Text, ResultShape::Text) => StageKind::Replace,
    }
}

/// A stage that ignores its text input and always returns the same result.
///
/// Reports the built-in kind whose shapes match unless [`with_kind`](Self::with_kind)
/// is used.
#[derive(Debug, Clone)]
pub struct FixedStage {
    id: StageId,
    kind: StageKind,
    input: ResultShape,
    output: StageResult,
}

impl FixedStage {
    /// Creates a stage returning `output` for any input of shape `input`.
    #[must_use]
    pub fn new(id: StageId, input: ResultShape, output: StageResult) -> Self {
        Self {
            id,
            kind: kind_for(input, output.shape()),
            input,
            output,
        }
    }

    /// Sets the kind the stage reports.
    #[must_use]
    pub fn with_kind(mut self, kind: StageKind) -> Self {
        self.kind = kind;
        self
    }

    /// Creates a source stage producing `text` from an empty result.
    #[must_use]
    pub fn source(id: StageId, text: impl Into<String>) -> Self {
        Self::new(id, ResultShape::None, StageResult::text(text))
    }
}

impl Stage for FixedStage {
    fn id(&self) -> StageId {
        self.id
    }

    fn kind(&self) -> StageKind {
        self.kind
    }

    fn input_shape(&self) -> ResultShape {
        self.input
    }

    fn output_shape(&self) -> ResultShape {
        self.output.shape()
    }

    fn execute(&self, previous: StageResult) -> Result<StageResult, TextflowError> {
        ensure_input(self, &previous)?;
        Ok(self.output.clone())
    }
}

/// A `TEXT -> TEXT` stage that always fails with an IO error.
///
/// Reports [`StageKind::Replace`] unless [`with_kind`](Self::with_kind) is used.
#[derive(Debug, Clone)]
pub struct FailingStage {
    id: StageId,
    kind: StageKind,
    message: String,
}

impl FailingStage {
    /// Creates a failing stage.
    #[must_use]
    pub fn new(id: StageId, message: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind_for(ResultShape::Text, ResultShape::Text),
            message: message.into(),
        }
    }

    /// Sets the kind the stage reports.
    #[must_use]
    pub fn with_kind(mut self, kind: StageKind) -> Self {
        self.kind = kind;
        self
    }
}

impl Stage for FailingStage {
    fn id(&self) -> StageId {
        self.id
    }

    fn kind(&self) -> StageKind {
        self.kind
    }

    fn input_shape(&self) -> ResultShape {
        ResultShape::Text
    }

    fn output_shape(&self) -> ResultShape {
        ResultShape::Text
    }

    fn execute(&self, _previous: StageResult) -> Result<StageResult, TextflowError> {
        Err(TextflowError::io(
            format!("<stage {}>", self.id),
            std::io::Error::other(self.message.clone()),
        ))
    }
}

/// A stage that records every input and passes it on unchanged.
///
/// Input and output shapes must be equal for the pass-through to be valid;
/// a `NONE -> TEXT` recorder would forward an empty result. Reports the
/// built-in kind whose shapes match unless [`with_kind`](Self::with_kind)
/// is used.
#[derive(Debug)]
pub struct RecordingStage {
    id: StageId,
    kind: StageKind,
    input: ResultShape,
    output: ResultShape,
    calls: Arc<Mutex<Vec<StageResult>>>,
}

impl RecordingStage {
    /// Creates a recording stage.
    #[must_use]
    pub fn new(id: StageId, input: ResultShape, output: ResultShape) -> Self {
        Self {
            id,
            kind: kind_for(input, output),
            input,
            output,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sets the kind the stage reports.
    #[must_use]
    pub fn with_kind(mut self, kind: StageKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns a handle to the recorded inputs, usable after the stage has
    /// been moved into a pipeline.
    #[must_use]
    pub fn calls(&self) -> Arc<Mutex<Vec<StageResult>>> {
        Arc::clone(&self.calls)
    }
}

impl Stage for RecordingStage {
    fn id(&self) -> StageId {
        self.id
    }

    fn kind(&self) -> StageKind {
        self.kind
    }

    fn input_shape(&self) -> ResultShape {
        self.input
    }

    fn output_shape(&self) -> ResultShape {
        self.output
    }

    fn execute(&self, previous: StageResult) -> Result<StageResult, TextflowError> {
        ensure_input(self, &previous)?;
        self.calls.lock().push(previous.clone());
        Ok(previous)
    }
}
