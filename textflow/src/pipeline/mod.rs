//! Pipeline building and execution.
//!
//! This module provides:
//! - A builder that checks adjacent stage shapes before anything runs
//! - A sequential driver feeding each stage's result to the next

mod builder;
mod run;

pub use builder::PipelineBuilder;
pub use run::{Pipeline, PipelineRun, StageRecord};
