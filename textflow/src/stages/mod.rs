//! Stage trait and implementations.
//!
//! Stages are the units of work in a textflow pipeline. Each one declares
//! the shape of result it accepts and the shape it produces, and turns one
//! [`StageResult`] into the next.

mod builtin;
mod factory;
mod grep;
mod kind;
mod lines;
mod read;
mod replace;
mod sort;
mod write;

pub use builtin::BuiltinStage;
pub use factory::{construct_stage, lookup, stage_table, try_construct_stage, StageEntry};
pub use grep::Grep;
pub use kind::StageKind;
pub use read::ReadFile;
pub use replace::Replace;
pub use sort::Sort;
pub use write::{Dump, WriteFile};

use crate::core::{ResultShape, StageId, StageResult};
use crate::errors::TextflowError;
use std::fmt::Debug;

/// Trait for pipeline stages.
///
/// A stage is configured once at construction and holds no mutable state,
/// so every call to [`execute`](Stage::execute) is independent.
#[cfg_attr(test, mockall::automock)]
pub trait Stage: Send + Sync + Debug {
    /// Returns the identity assigned at construction.
    fn id(&self) -> StageId;

    /// Returns the kind of work this stage performs.
    fn kind(&self) -> StageKind;

    /// Returns the shape this stage accepts.
    fn input_shape(&self) -> ResultShape;

    /// Returns the shape this stage produces.
    fn output_shape(&self) -> ResultShape;

    /// Executes the stage.
    ///
    /// # Arguments
    ///
    /// * `previous` - The output of the preceding stage, or
    ///   [`StageResult::none`] for the first stage. Its shape must equal
    ///   [`input_shape`](Stage::input_shape).
    ///
    /// # Errors
    ///
    /// Returns [`TextflowError::ShapeMismatch`] when `previous` has the
    /// wrong shape, and stage specific errors otherwise.
    fn execute(&self, previous: StageResult) -> Result<StageResult, TextflowError>;
}

/// Checks that `previous` matches the shape the stage declares.
///
/// # Errors
///
/// Returns a shape mismatch naming the stage.
pub fn ensure_input<S: Stage + ?Sized>(
    stage: &S,
    previous: &StageResult,
) -> Result<(), TextflowError> {
    let expected = stage.input_shape();
    let actual = previous.shape();
    if expected == actual {
        Ok(())
    } else {
        Err(TextflowError::shape_mismatch(
            Some(stage.id()),
            expected,
            actual,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_input_accepts_matching_shape() {
        let stage = Sort::new(StageId(1));
        assert!(ensure_input(&stage, &StageResult::text("x")).is_ok());
    }

    #[test]
    fn test_ensure_input_names_the_stage() {
        let stage = Sort::new(StageId(42));
        let err = ensure_input(&stage, &StageResult::none()).unwrap_err();

        match err {
            TextflowError::ShapeMismatch { stage, expected, actual } => {
                assert_eq!(stage, Some(StageId(42)));
                assert_eq!(expected, ResultShape::Text);
                assert_eq!(actual, ResultShape::None);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ensure_input_works_on_trait_objects() {
        let stage: Box<dyn Stage> = Box::new(ReadFile::new(StageId(1), "in.txt"));
        assert!(ensure_input(stage.as_ref(), &StageResult::none()).is_ok());
        assert!(ensure_input(stage.as_ref(), &StageResult::text("")).is_err());
    }

    #[test]
    fn test_mock_stage_satisfies_contract() {
        let mut mock = MockStage::new();
        mock.expect_id().return_const(StageId(5));
        mock.expect_input_shape().return_const(ResultShape::Text);

        let err = ensure_input(&mock, &StageResult::none()).unwrap_err();
        assert!(err.is_shape_mismatch());
    }
}
