//! Sequential pipeline execution.

use crate::config::PipelineConfig;
use crate::core::{ResultShape, StageId, StageResult};
use crate::errors::TextflowError;
use crate::stages::{Stage, StageKind};
use crate::utils::generate_run_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use super::PipelineBuilder;

/// What the driver observed for one executed stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    /// The stage id.
    pub id: StageId,
    /// The stage kind.
    pub kind: StageKind,
    /// Shape of the result the stage produced.
    pub output_shape: ResultShape,
    /// Payload size in bytes after the stage.
    pub output_bytes: usize,
    /// Wall time spent in the stage.
    pub duration_ms: f64,
}

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Unique id of this run.
    pub run_id: Uuid,
    /// The pipeline name.
    pub pipeline: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Total wall time.
    pub duration_ms: f64,
    /// The result of the last stage.
    pub result: StageResult,
    /// One record per stage, in execution order.
    pub stages: Vec<StageRecord>,
}

impl PipelineRun {
    /// Consumes the run, returning the final result.
    #[must_use]
    pub fn into_result(self) -> StageResult {
        self.result
    }
}

/// A validated, ordered sequence of stages.
///
/// Built by [`PipelineBuilder`], which guarantees the stage shapes chain
/// from `NONE` through every adjacent pair.
#[derive(Debug)]
pub struct Pipeline {
    name: String,
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub(super) fn new(name: String, stages: Vec<Box<dyn Stage>>) -> Self {
        Self { name, stages }
    }

    /// Creates a pipeline builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder::new(name)
    }

    /// Resolves and validates a pipeline definition.
    ///
    /// # Errors
    ///
    /// Returns configuration, factory or validation errors.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, TextflowError> {
        Ok(PipelineBuilder::from_config(config)?.build()?)
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the pipeline has no stages.
    ///
    /// Always false for a pipeline produced by the builder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Returns the stage ids in execution order.
    #[must_use]
    pub fn stage_ids(&self) -> Vec<StageId> {
        self.stages.iter().map(|stage| stage.id()).collect()
    }

    /// Returns the stages in execution order.
    #[must_use]
    pub fn stages(&self) -> &[Box<dyn Stage>] {
        &self.stages
    }

    /// Returns the declared shape of the final result.
    #[must_use]
    pub fn output_shape(&self) -> ResultShape {
        self.stages
            .last()
            .map_or(ResultShape::None, |stage| stage.output_shape())
    }

    /// Runs every stage in order, starting from an empty result.
    ///
    /// # Errors
    ///
    /// Returns the first stage error unchanged; later stages do not run.
    /// A stage returning a result of a shape other than the one it declared
    /// is reported as a shape mismatch.
    pub fn run(&self) -> Result<PipelineRun, TextflowError> {
        let run_id = generate_run_id();
        let started_at = Utc::now();
        let start = Instant::now();

        info!(
            pipeline = %self.name,
            run_id = %run_id,
            stages = self.stages.len(),
            "Pipeline started"
        );

        let mut current = StageResult::none();
        let mut records = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let span = info_span!("stage", id = %stage.id(), kind = %stage.kind());
            let _entered = span.enter();
            let stage_start = Instant::now();

            current = match execute_checked(stage.as_ref(), current) {
                Ok(next) => next,
                Err(err) => {
                    warn!(pipeline = %self.name, run_id = %run_id, error = %err, "Stage failed");
                    return Err(err);
                }
            };

            let record = StageRecord {
                id: stage.id(),
                kind: stage.kind(),
                output_shape: current.shape(),
                output_bytes: current.len(),
                duration_ms: stage_start.elapsed().as_secs_f64() * 1000.0,
            };
            debug!(
                output_shape = %record.output_shape,
                output_bytes = record.output_bytes,
                duration_ms = record.duration_ms,
                "Stage completed"
            );
            records.push(record);
        }

        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        info!(
            pipeline = %self.name,
            run_id = %run_id,
            duration_ms,
            "Pipeline completed"
        );

        Ok(PipelineRun {
            run_id,
            pipeline: self.name.clone(),
            started_at,
            duration_ms,
            result: current,
            stages: records,
        })
    }
}

fn execute_checked(stage: &dyn Stage, previous: StageResult) -> Result<StageResult, TextflowError> {
    let next = stage.execute(previous)?;
    if next.shape() == stage.output_shape() {
        Ok(next)
    } else {
        Err(TextflowError::shape_mismatch(
            Some(stage.id()),
            stage.output_shape(),
            next.shape(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::MockStage;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn mock(id: u64, input: ResultShape, output: ResultShape) -> MockStage {
        let mut stage = MockStage::new();
        stage.expect_id().return_const(StageId(id));
        stage.expect_kind().return_const(StageKind::Grep);
        stage.expect_input_shape().return_const(input);
        stage.expect_output_shape().return_const(output);
        stage
    }

    #[test]
    fn test_run_feeds_each_output_to_the_next_stage() {
        let mut seq = Sequence::new();

        let mut source = mock(1, ResultShape::None, ResultShape::Text);
        source
            .expect_execute()
            .with(eq(StageResult::none()))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(StageResult::text("from source")));

        let mut middle = mock(2, ResultShape::Text, ResultShape::Text);
        middle
            .expect_execute()
            .with(eq(StageResult::text("from source")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(StageResult::text("from middle")));

        let pipeline = Pipeline::builder("mocked")
            .stage(source)
            .stage(middle)
            .build()
            .unwrap();

        let run = pipeline.run().unwrap();
        assert_eq!(run.pipeline, "mocked");
        assert_eq!(run.stages.len(), 2);
        assert_eq!(run.stages[0].id, StageId(1));
        assert_eq!(run.stages[1].output_bytes, "from middle".len());
        assert_eq!(run.into_result(), StageResult::text("from middle"));
    }

    #[test]
    fn test_run_stops_at_first_failure() {
        let mut failing = mock(1, ResultShape::None, ResultShape::Text);
        failing
            .expect_execute()
            .times(1)
            .returning(|_| Err(TextflowError::Config("boom".to_string())));

        let mut never = mock(2, ResultShape::Text, ResultShape::Text);
        never.expect_execute().never();

        let pipeline = Pipeline::builder("failing")
            .stage(failing)
            .stage(never)
            .build()
            .unwrap();

        let err = pipeline.run().unwrap_err();
        assert!(matches!(err, TextflowError::Config(ref msg) if msg == "boom"));
    }

    #[test]
    fn test_run_rejects_result_of_undeclared_shape() {
        let mut liar = mock(3, ResultShape::None, ResultShape::Text);
        liar.expect_execute().returning(|_| Ok(StageResult::none()));

        let pipeline = Pipeline::builder("liar").stage(liar).build().unwrap();

        match pipeline.run().unwrap_err() {
            TextflowError::ShapeMismatch { stage, expected, actual } => {
                assert_eq!(stage, Some(StageId(3)));
                assert_eq!(expected, ResultShape::Text);
                assert_eq!(actual, ResultShape::None);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_each_run_gets_a_new_id() {
        let mut source = mock(1, ResultShape::None, ResultShape::Text);
        source
            .expect_execute()
            .times(2)
            .returning(|_| Ok(StageResult::text("x")));

        let pipeline = Pipeline::builder("twice").stage(source).build().unwrap();

        let first = pipeline.run().unwrap();
        let second = pipeline.run().unwrap();
        assert_ne!(first.run_id, second.run_id);
    }

    #[test]
    fn test_pipeline_accessors() {
        let pipeline = Pipeline::builder("p")
            .stage(mock(4, ResultShape::None, ResultShape::Text))
            .stage(mock(5, ResultShape::Text, ResultShape::None))
            .build()
            .unwrap();

        assert_eq!(pipeline.name(), "p");
        assert_eq!(pipeline.len(), 2);
        assert!(!pipeline.is_empty());
        assert_eq!(pipeline.stage_ids(), vec![StageId(4), StageId(5)]);
        assert_eq!(pipeline.output_shape(), ResultShape::None);
        assert_eq!(pipeline.stages()[1].kind(), StageKind::Grep);
    }
}
