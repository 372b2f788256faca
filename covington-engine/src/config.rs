//! Configuration types for the engine
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! execution_mode = "parallel"
//! threads = 4
//! single_root = true
//!
//! [training]
//! epochs = 15
//! explore_from_epoch = 3
//! ```

use crate::error::{EngineError, Result};
use crate::ExecutionMode;
use covington_core::TrainingPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Epoch schedule for training runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    /// Passes over the training corpus
    pub epochs: usize,
    /// First epoch (1-based) that applies the scorer's own moves; None = never
    pub explore_from_epoch: Option<usize>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            explore_from_epoch: None,
        }
    }
}

impl TrainingConfig {
    /// Policy applied during `epoch`
    pub fn policy_for(&self, epoch: usize) -> TrainingPolicy {
        match self.explore_from_epoch {
            Some(start) if epoch >= start => TrainingPolicy::Exploration,
            _ => TrainingPolicy::TeacherForcing,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Execution mode selector
    pub execution_mode: ExecutionMode,
    /// Number of threads for parallel execution (None = auto)
    pub threads: Option<usize>,
    /// Minimum batch size, in sentences, for adaptive mode to go parallel
    pub parallel_threshold: usize,
    /// Repair predictions with several root attachments
    pub single_root: bool,
    /// Training schedule
    pub training: TrainingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Adaptive,
            threads: None,
            parallel_threshold: 64,
            single_root: false,
            training: TrainingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Always decode on the calling thread
    pub fn sequential() -> Self {
        Self {
            execution_mode: ExecutionMode::Sequential,
            threads: Some(1),
            parallel_threshold: usize::MAX,
            ..Self::default()
        }
    }

    /// Always decode on the thread pool
    pub fn parallel() -> Self {
        Self {
            execution_mode: ExecutionMode::Parallel,
            parallel_threshold: 0,
            ..Self::default()
        }
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(EngineError::Config(
                "threads must be at least 1".to_string(),
            ));
        }
        if self.training.epochs == 0 {
            return Err(EngineError::Config(
                "training.epochs must be at least 1".to_string(),
            ));
        }
        if self.training.explore_from_epoch == Some(0) {
            return Err(EngineError::Config(
                "training.explore_from_epoch counts from 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
