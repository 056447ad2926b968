use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::buildcore::QueueKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Stress driver settings. Every field is optional in the JSON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressConfig {
    /// Representations to exercise, in order
    pub kinds: Vec<QueueKind>,
    /// Capacity each queue is built with before the first round
    pub initial_capacity: usize,
    /// Capacity of the first round
    pub start_capacity: usize,
    pub step: usize,
    /// Exclusive upper bound on round capacities
    pub max_capacity: usize,
    /// Batches per round; batch `i` appends `i` copies of `i`
    pub batches: usize,
    pub overwritable: bool,
    /// NDJSON file the round log is appended to
    pub report_path: Option<String>,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            kinds: vec![QueueKind::Array, QueueKind::Linked],
            initial_capacity: 10,
            start_capacity: 5,
            step: 5,
            max_capacity: 1000,
            batches: 1000,
            overwritable: true,
            report_path: None,
        }
    }
}

impl StressConfig {
    /// Read a JSON config file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: StressConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 || self.start_capacity == 0 {
            return Err(ConfigError::Invalid("capacities must be > 0".into()));
        }
        if self.step == 0 {
            return Err(ConfigError::Invalid("step must be > 0".into()));
        }
        if self.start_capacity >= self.max_capacity {
            return Err(ConfigError::Invalid(format!(
                "start_capacity {} must be below max_capacity {}",
                self.start_capacity, self.max_capacity
            )));
        }
        Ok(())
    }

    /// Capacities visited by the rounds, in order. Empty when `step` is zero.
    pub fn capacities(&self) -> impl Iterator<Item = usize> + use<> {
        let end = if self.step == 0 { self.start_capacity } else { self.max_capacity };
        (self.start_capacity..end).step_by(self.step.max(1))
    }
}
