//! Error types for the textflow framework.
//!
//! Every failure crosses the stage boundary as a typed value. Stages never
//! recover from their own errors; the driver aborts on the first one.

use crate::core::{ResultShape, StageId};
use crate::stages::StageKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for textflow operations.
#[derive(Debug, Error)]
pub enum TextflowError {
    /// A stage or accessor received a result of the wrong shape.
    #[error("Shape mismatch{}: expected {expected}, got {actual}", describe_stage(.stage))]
    ShapeMismatch {
        /// The stage that detected the mismatch, if any.
        stage: Option<StageId>,
        /// The shape that was required.
        expected: ResultShape,
        /// The shape that was supplied.
        actual: ResultShape,
    },

    /// A file could not be opened, read or written.
    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        /// The path involved.
        path: PathBuf,
        /// The underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// A stage was configured with a value it cannot act on.
    #[error("Invalid argument for {kind}: {message}")]
    InvalidArgument {
        /// The kind of stage being configured.
        kind: StageKind,
        /// What was wrong with the value.
        message: String,
    },

    /// A stage could not be resolved by name and arguments.
    #[error("{0}")]
    UnknownStage(#[from] FactoryError),

    /// A pipeline failed build-time validation.
    #[error("{0}")]
    Validation(#[from] PipelineValidationError),

    /// A pipeline definition could not be parsed or resolved.
    #[error("Configuration error: {0}")]
    Config(String),
}

fn describe_stage(stage: &Option<StageId>) -> String {
    stage.map_or_else(String::new, |id| format!(" at stage {id}"))
}

impl TextflowError {
    /// Creates a shape mismatch error.
    #[must_use]
    pub const fn shape_mismatch(
        stage: Option<StageId>,
        expected: ResultShape,
        actual: ResultShape,
    ) -> Self {
        Self::ShapeMismatch {
            stage,
            expected,
            actual,
        }
    }

    /// Creates an IO error for a path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(kind: StageKind, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            kind,
            message: message.into(),
        }
    }

    /// Returns true for shape mismatches.
    #[must_use]
    pub const fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }

    /// Returns true for IO failures.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

impl From<serde_json::Error> for TextflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Reasons the stage factory can refuse a name/argument combination.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// No stage is registered under the name.
    #[error("Unknown stage: {name}")]
    UnknownStage {
        /// The requested name.
        name: String,
    },

    /// The stage exists but takes a different number of arguments.
    #[error("Stage '{name}' expects {expected} argument(s), got {actual} (usage: {usage})")]
    Arity {
        /// The requested name.
        name: String,
        /// Required argument count.
        expected: usize,
        /// Supplied argument count.
        actual: usize,
        /// How the stage is meant to be invoked.
        usage: String,
    },

    /// The stage rejected the argument values.
    #[error("Stage '{name}' rejected its arguments: {source}")]
    InvalidArgument {
        /// The requested name.
        name: String,
        /// The constructor's error.
        #[source]
        source: Box<TextflowError>,
    },
}

impl FactoryError {
    /// Creates an unknown stage error.
    #[must_use]
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownStage { name: name.into() }
    }

    /// Creates an arity error.
    #[must_use]
    pub fn arity(
        name: impl Into<String>,
        expected: usize,
        actual: usize,
        usage: impl Into<String>,
    ) -> Self {
        Self::Arity {
            name: name.into(),
            expected,
            actual,
            usage: usage.into(),
        }
    }

    /// Wraps a constructor failure.
    #[must_use]
    pub fn invalid_argument(name: impl Into<String>, source: TextflowError) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Returns the stage name the factory was asked for.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::UnknownStage { name }
            | Self::Arity { name, .. }
            | Self::InvalidArgument { name, .. } => name,
        }
    }
}

/// Metadata about a contract error for better diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContractErrorInfo {
    /// Error code (e.g., "PIPELINE-SHAPE-MISMATCH").
    pub code: String,
    /// Short summary of the error.
    pub summary: String,
    /// Hint for fixing the error.
    pub fix_hint: Option<String>,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl ContractErrorInfo {
    /// Creates a new contract error info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            fix_hint: None,
            context: HashMap::new(),
        }
    }

    /// Sets the fix hint.
    #[must_use]
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Error raised when pipeline validation fails.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PipelineValidationError {
    /// The error message.
    pub message: String,
    /// The stages involved in the error.
    pub stages: Vec<StageId>,
    /// Optional contract error info.
    pub error_info: Option<ContractErrorInfo>,
}

impl PipelineValidationError {
    /// Creates a new pipeline validation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stages: Vec::new(),
            error_info: None,
        }
    }

    /// Sets the stages involved.
    #[must_use]
    pub fn with_stages(mut self, stages: Vec<StageId>) -> Self {
        self.stages = stages;
        self
    }

    /// Sets the contract error info.
    #[must_use]
    pub fn with_error_info(mut self, info: ContractErrorInfo) -> Self {
        self.error_info = Some(info);
        self
    }

    /// Returns the contract error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.error_info.as_ref().map(|info| info.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let err = TextflowError::shape_mismatch(
            Some(StageId(3)),
            ResultShape::Text,
            ResultShape::None,
        );
        assert_eq!(
            err.to_string(),
            "Shape mismatch at stage #3: expected TEXT, got NONE"
        );

        let anonymous = TextflowError::shape_mismatch(None, ResultShape::None, ResultShape::Text);
        assert_eq!(anonymous.to_string(), "Shape mismatch: expected NONE, got TEXT");
    }

    #[test]
    fn test_io_error_carries_path_and_cause() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = TextflowError::io("/tmp/nope.txt", source);

        assert!(err.is_io());
        assert!(err.to_string().contains("/tmp/nope.txt"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = TextflowError::invalid_argument(StageKind::Replace, "empty pattern");
        assert_eq!(err.to_string(), "Invalid argument for replace: empty pattern");
    }

    #[test]
    fn test_factory_error_name() {
        assert_eq!(FactoryError::unknown("xyz").name(), "xyz");
        let err = FactoryError::arity("replace", 2, 1, "replace <pattern> <substitution>");
        assert_eq!(err.name(), "replace");
        assert_eq!(
            err.to_string(),
            "Stage 'replace' expects 2 argument(s), got 1 (usage: replace <pattern> <substitution>)"
        );
    }

    #[test]
    fn test_factory_error_converts_to_textflow_error() {
        let err: TextflowError = FactoryError::unknown("nope").into();
        assert!(matches!(err, TextflowError::UnknownStage(_)));
        assert_eq!(err.to_string(), "Unknown stage: nope");
    }

    #[test]
    fn test_pipeline_validation_error() {
        let err = PipelineValidationError::new("bad wiring")
            .with_stages(vec![StageId(1), StageId(2)])
            .with_error_info(
                ContractErrorInfo::new("PIPELINE-SHAPE-MISMATCH", "bad wiring")
                    .with_fix_hint("reorder stages")
                    .with_context_entry("from", "#1"),
            );

        assert_eq!(err.to_string(), "bad wiring");
        assert_eq!(err.code(), Some("PIPELINE-SHAPE-MISMATCH"));
        assert_eq!(err.stages.len(), 2);
    }
}
