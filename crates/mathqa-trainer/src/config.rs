//! Training configuration.
//!
//! Every field has a default matching the reference experiment, so an empty
//! JSON object (or no file at all) reproduces it exactly.

use std::path::Path;

use anyhow::{Context, Result, bail};
use mathqa_core::{ANSWER_SPACE_SIZE, ModelConfig};
use serde::{Deserialize, Serialize};

/// Hyperparameters for one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Width of each token embedding
    pub embedding_dim: usize,

    /// Width of the LSTM hidden and cell state
    pub hidden_dim: usize,

    /// Number of answer classes; answers must be below this
    pub answer_space: usize,

    /// SGD step size
    pub learning_rate: f64,

    /// Full passes over the training set
    pub epochs: usize,

    /// Seed for parameter initialization
    pub seed: u64,

    /// Log the mean epoch loss every this many epochs (0 disables progress logs)
    pub log_every: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            embedding_dim: 6,
            hidden_dim: 6,
            answer_space: ANSWER_SPACE_SIZE,
            learning_rate: 0.1,
            epochs: 300,
            seed: 1,
            log_every: 50,
        }
    }
}

impl TrainingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON configuration file. Missing fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON, readable by [`TrainingConfig::from_file`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        Ok(())
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    pub fn with_answer_space(mut self, answer_space: usize) -> Self {
        self.answer_space = answer_space;
        self
    }

    /// The predictor shape described by this configuration.
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig::new()
            .with_embedding_dim(self.embedding_dim)
            .with_hidden_dim(self.hidden_dim)
            .with_answer_space(self.answer_space)
    }

    pub fn validate(&self) -> Result<()> {
        self.model_config().validate()?;
        if self.epochs == 0 {
            bail!("epochs must be positive");
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            bail!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            );
        }
        Ok(())
    }
}
