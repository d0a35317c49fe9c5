//! Pipeline builder with shape validation.

use super::Pipeline;
use crate::config::PipelineConfig;
use crate::core::ResultShape;
use crate::errors::{ContractErrorInfo, PipelineValidationError, TextflowError};
use crate::stages::{try_construct_stage, Stage};
use std::collections::HashSet;
use tracing::debug;

/// Builder for creating validated pipelines.
///
/// Stages run in the order they are added. [`build`](Self::build) rejects
/// any sequence in which a stage's input shape differs from the output
/// shape of the stage before it.
#[derive(Debug)]
pub struct PipelineBuilder {
    /// The pipeline name.
    name: String,
    /// The stages, in execution order.
    stages: Vec<Box<dyn Stage>>,
}

impl PipelineBuilder {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    /// Appends a stage.
    #[must_use]
    pub fn stage(self, stage: impl Stage + 'static) -> Self {
        self.boxed_stage(Box::new(stage))
    }

    /// Appends an already boxed stage.
    #[must_use]
    pub fn boxed_stage(mut self, stage: Box<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Resolves every stage of a definition through the stage factory.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for inconsistent ids and
    /// [`TextflowError::UnknownStage`] for names or arguments the factory
    /// cannot resolve.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, TextflowError> {
        let mut builder = Self::new(config.name.clone());
        for stage_config in config.ordered_stages()? {
            let stage = try_construct_stage(stage_config.id, &stage_config.name, &stage_config.args)?;
            builder = builder.stage(stage);
        }
        Ok(builder)
    }

    /// Appends the stages of another builder after this one's.
    #[must_use]
    pub fn compose(mut self, other: Self) -> Self {
        self.name = format!("{}+{}", self.name, other.name);
        self.stages.extend(other.stages);
        self
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Builds the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder has no stages, the first stage does
    /// not accept an empty result, two adjacent stages disagree on their
    /// shared shape, or two stages share an id.
    pub fn build(self) -> Result<Pipeline, PipelineValidationError> {
        validate_chain(&self.stages)?;
        debug!(pipeline = %self.name, stages = self.stages.len(), "Pipeline validated");
        Ok(Pipeline::new(self.name, self.stages))
    }
}

fn validate_chain(stages: &[Box<dyn Stage>]) -> Result<(), PipelineValidationError> {
    let Some(first) = stages.first() else {
        return Err(PipelineValidationError::new("Pipeline has no stages").with_error_info(
            ContractErrorInfo::new("PIPELINE-EMPTY", "Cannot build an empty pipeline")
                .with_fix_hint("Add at least one stage to the pipeline before building."),
        ));
    };

    if first.input_shape() != ResultShape::None {
        return Err(PipelineValidationError::new(format!(
            "First stage {} ({}) expects {} input, but a pipeline starts from NONE",
            first.id(),
            first.kind(),
            first.input_shape()
        ))
        .with_stages(vec![first.id()])
        .with_error_info(
            ContractErrorInfo::new("PIPELINE-ENTRY-SHAPE", "First stage must accept NONE")
                .with_fix_hint("Start the pipeline with a stage that produces text, such as 'read'.")
                .with_context_entry("expected", ResultShape::None.to_string())
                .with_context_entry("actual", first.input_shape().to_string()),
        ));
    }

    for pair in stages.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        if from.output_shape() != to.input_shape() {
            return Err(PipelineValidationError::new(format!(
                "Stage {} ({}) produces {} but stage {} ({}) expects {}",
                from.id(),
                from.kind(),
                from.output_shape(),
                to.id(),
                to.kind(),
                to.input_shape()
            ))
            .with_stages(vec![from.id(), to.id()])
            .with_error_info(
                ContractErrorInfo::new(
                    "PIPELINE-SHAPE-MISMATCH",
                    "Adjacent stages disagree on the shape between them",
                )
                .with_fix_hint("Reorder the stages or insert one that converts between the shapes.")
                .with_context_entry("from", from.id().to_string())
                .with_context_entry("to", to.id().to_string()),
            ));
        }
    }

    let mut seen = HashSet::with_capacity(stages.len());
    for stage in stages {
        if !seen.insert(stage.id()) {
            return Err(PipelineValidationError::new(format!(
                "Stage id {} is used more than once",
                stage.id()
            ))
            .with_stages(vec![stage.id()])
            .with_error_info(
                ContractErrorInfo::new("PIPELINE-DUPLICATE-ID", "Stage ids must be unique")
                    .with_fix_hint("Give every stage its own id."),
            ));
        }
    }

    Ok(())
}
