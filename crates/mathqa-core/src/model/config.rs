use serde::{Deserialize, Serialize};

use crate::error::{MathQaError, Result};
use crate::vocab::ANSWER_SPACE_SIZE;

/// Shape of the predictor. The vocabulary size comes from the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Width of each token embedding
    pub embedding_dim: usize,
    /// Width of the LSTM hidden and cell state
    pub hidden_dim: usize,
    /// Number of answer classes
    pub answer_space: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            embedding_dim: 6,
            hidden_dim: 6,
            answer_space: ANSWER_SPACE_SIZE,
        }
    }
}

impl ModelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    pub fn with_hidden_dim(mut self, hidden_dim: usize) -> Self {
        self.hidden_dim = hidden_dim;
        self
    }

    pub fn with_answer_space(mut self, answer_space: usize) -> Self {
        self.answer_space = answer_space;
        self
    }

    /// Reject zero-sized layers.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("embedding_dim", self.embedding_dim),
            ("hidden_dim", self.hidden_dim),
            ("answer_space", self.answer_space),
        ] {
            if value == 0 {
                return Err(MathQaError::InvalidConfig(format!("{name} must be positive")));
            }
        }
        Ok(())
    }
}
