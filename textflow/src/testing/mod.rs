//! Testing utilities for textflow pipelines.
//!
//! This module provides:
//! - Assertions on stage results
//! - Simple stage doubles for exercising drivers

mod assertions;
mod mocks;

pub use assertions::{assert_none, assert_shape_mismatch, assert_text};
pub use mocks::{FailingStage, FixedStage, RecordingStage};
