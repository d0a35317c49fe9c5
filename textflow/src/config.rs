//! Configuration types for pipeline definitions and logging.
//!
//! A pipeline definition lists stages by id, factory name and arguments,
//! plus an optional execution order:
//!
//! ```json
//! {
//!   "name": "example",
//!   "stages": [
//!     {"id": 1, "name": "read", "args": ["in.txt"]},
//!     {"id": 2, "name": "sort"},
//!     {"id": 3, "name": "write", "args": ["out.txt"]}
//!   ],
//!   "order": [1, 2, 3]
//! }
//! ```

use crate::core::StageId;
use crate::errors::TextflowError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// One stage of a pipeline definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Identity of the stage, unique within the definition.
    pub id: StageId,
    /// Factory name of the stage.
    pub name: String,
    /// Arguments passed to the factory.
    #[serde(default)]
    pub args: Vec<String>,
}

impl StageConfig {
    /// Creates a stage definition.
    #[must_use]
    pub fn new(
        id: StageId,
        name: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,
    /// Whether to emit JSON lines instead of human readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_pipeline_name() -> String {
    "pipeline".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Sets the default filter directive.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Enables JSON output.
    #[must_use]
    pub const fn json(mut self) -> Self {
        self.json = true;
        self
    }
}

/// A complete pipeline definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// The pipeline name.
    #[serde(default = "default_pipeline_name")]
    pub name: String,
    /// Declared stages.
    #[serde(default)]
    pub stages: Vec<StageConfig>,
    /// Execution order by stage id. Declaration order when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<StageId>>,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: default_pipeline_name(),
            stages: Vec::new(),
            order: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Creates an empty definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parses a definition from JSON.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, TextflowError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a definition file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read and a configuration
    /// error if it is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TextflowError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| TextflowError::io(path, err))?;
        Self::from_json_str(&json)
    }

    /// Serialises the definition as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if serialisation fails.
    pub fn to_json_string(&self) -> Result<String, TextflowError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Appends a stage definition.
    #[must_use]
    pub fn with_stage(
        mut self,
        id: StageId,
        name: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.stages.push(StageConfig::new(id, name, args));
        self
    }

    /// Sets the execution order.
    #[must_use]
    pub fn with_order(mut self, order: impl IntoIterator<Item = StageId>) -> Self {
        self.order = Some(order.into_iter().collect());
        self
    }

    /// Sets the logging configuration.
    #[must_use]
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Returns the stage definitions in execution order.
    ///
    /// Stages declared but not named by `order` are left out.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if two stages share an id, or if
    /// `order` names an undeclared id or repeats one.
    pub fn ordered_stages(&self) -> Result<Vec<&StageConfig>, TextflowError> {
        let mut by_id: HashMap<StageId, &StageConfig> = HashMap::with_capacity(self.stages.len());
        for stage in &self.stages {
            if by_id.insert(stage.id, stage).is_some() {
                return Err(TextflowError::Config(format!(
                    "stage id {} is declared more than once",
                    stage.id
                )));
            }
        }

        let Some(order) = &self.order else {
            return Ok(self.stages.iter().collect());
        };

        let mut seen = HashSet::with_capacity(order.len());
        order
            .iter()
            .map(|id| {
                if !seen.insert(*id) {
                    return Err(TextflowError::Config(format!(
                        "stage id {id} appears more than once in the order"
                    )));
                }
                by_id.get(id).copied().ok_or_else(|| {
                    TextflowError::Config(format!("order refers to undeclared stage id {id}"))
                })
            })
            .collect()
    }
}
