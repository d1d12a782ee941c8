//! Configuration management for Quiver.
//!
//! Provides the knobs for the expression optimizer and the batch executor.
//! Every section deserializes with defaults, so a partial JSON document is a
//! valid configuration.

use std::path::Path;

use common_error::QuiverResult;
use serde::{Deserialize, Serialize};

/// Default number of rows in one batch.
pub const DEFAULT_BATCH_SIZE: usize = 2048;

/// Global Quiver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuiverConfig {
    /// Expression optimizer configuration.
    pub optimizer: OptimizerConfig,
    /// Batch execution configuration.
    pub execution: ExecutionConfig,
}

impl QuiverConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> QuiverResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> QuiverResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Serialize this configuration to pretty-printed JSON.
    pub fn to_json(&self) -> QuiverResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Configuration for the expression optimizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Maximum number of whole-tree rewrite passes before stopping.
    pub max_iterations: usize,
    /// Whether to record a before/after trace of every rewrite.
    pub enable_trace: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            enable_trace: false,
        }
    }
}

impl OptimizerConfig {
    /// Create a new config with the given max iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Enable or disable tracing.
    #[must_use]
    pub fn with_trace(mut self, enable: bool) -> Self {
        self.enable_trace = enable;
        self
    }
}

/// Configuration for batch execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Maximum number of rows in one batch.
    pub batch_size: usize,
    /// Number of worker threads for partitioned execution (`None` uses the
    /// global pool).
    pub parallelism: Option<usize>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallelism: None,
        }
    }
}

impl ExecutionConfig {
    /// Set the batch capacity.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the number of worker threads.
    #[must_use]
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }
}
