//! # Textflow
//!
//! A small typed pipeline for chaining text-processing stages.
//!
//! Textflow provides:
//!
//! - **Typed results**: every stage consumes and produces a [`StageResult`](core::StageResult)
//!   tagged with its [`ResultShape`](core::ResultShape)
//! - **Shape-checked pipelines**: adjacent stages must agree on the shape between them
//!   before a pipeline can be built
//! - **Built-in stages**: read, write, grep, sort, replace and dump
//! - **A stage factory**: resolves stages by name and string arguments
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use textflow::prelude::*;
//!
//! # fn main() -> Result<(), TextflowError> {
//! let pipeline = PipelineBuilder::new("sorted-errors")
//!     .stage(ReadFile::new(StageId(1), "app.log"))
//!     .stage(Grep::new(StageId(2), "ERROR"))
//!     .stage(Sort::new(StageId(3)))
//!     .stage(WriteFile::new(StageId(4), "errors.txt"))
//!     .build()?;
//!
//! let run = pipeline.run()?;
//! assert!(run.result.is_none());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod observability;
pub mod pipeline;
pub mod stages;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{LoggingConfig, PipelineConfig, StageConfig};
    pub use crate::core::{ResultShape, StageId, StageResult};
    pub use crate::errors::{
        ContractErrorInfo, FactoryError, PipelineValidationError, TextflowError,
    };
    pub use crate::observability::init_logging;
    pub use crate::pipeline::{Pipeline, PipelineBuilder, PipelineRun, StageRecord};
    pub use crate::stages::{
        construct_stage, try_construct_stage, BuiltinStage, Dump, Grep, ReadFile, Replace,
        Sort, Stage, StageKind, WriteFile,
    };
    pub use crate::utils::generate_run_id;
}
