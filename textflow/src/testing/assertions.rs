//! Test assertions for stage results.

use crate::core::{ResultShape, StageResult};
use crate::errors::TextflowError;

/// Asserts that the result carries exactly `expected` as text.
pub fn assert_text(result: &StageResult, expected: &str) {
    match result {
        StageResult::Text(text) => assert_eq!(
            text, expected,
            "Expected text {expected:?}, got {text:?}"
        ),
        StageResult::None => panic!("Expected text {expected:?}, got a NONE result"),
    }
}

/// Asserts that the result carries no payload.
pub fn assert_none(result: &StageResult) {
    assert!(
        result.is_none(),
        "Expected a NONE result, got {:?}",
        result
    );
}

/// Asserts that the error is a shape mismatch with the given shapes.
pub fn assert_shape_mismatch(err: &TextflowError, expected: ResultShape, actual: ResultShape) {
    match err {
        TextflowError::ShapeMismatch {
            expected: got_expected,
            actual: got_actual,
            ..
        } => {
            assert_eq!(*got_expected, expected, "Unexpected required shape");
            assert_eq!(*got_actual, actual, "Unexpected supplied shape");
        }
        other => panic!("Expected a shape mismatch, got: {other}"),
    }
}
