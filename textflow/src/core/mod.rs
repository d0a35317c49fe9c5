//! Core domain model types for textflow.
//!
//! This module contains the values that flow between stages:
//! - The closed set of payload shapes
//! - The tagged stage result carrying an optional text payload

mod id;
mod result;
mod shape;

pub use id::StageId;
pub use result::StageResult;
pub use shape::ResultShape;
