use thiserror::Error;

/// Errors that can occur while encoding questions or running the predictor.
#[derive(Debug, Error)]
pub enum MathQaError {
    /// A question token was never seen while building the vocabulary.
    #[error("unknown token {token:?} at position {position}")]
    UnknownToken {
        /// The offending token, verbatim.
        token: String,
        /// Zero-based token position inside the question.
        position: usize,
    },

    /// The question contains no tokens, so there is nothing to mean-pool.
    #[error("question is empty or whitespace-only")]
    EmptyQuestion,

    /// The answer label cannot be represented by the output layer.
    #[error("answer {answer} is outside the answer space [0, {answer_space})")]
    AnswerOutOfRange {
        /// The rejected answer.
        answer: u32,
        /// Number of classes in the answer space.
        answer_space: usize,
    },

    /// An encoded id does not address a row of the embedding table.
    #[error("token id {id} is outside the vocabulary of size {vocab_size}")]
    InvalidTokenId {
        /// The offending id.
        id: u32,
        /// Rows in the embedding table.
        vocab_size: usize,
    },

    /// Training was requested on a corpus with no examples.
    #[error("training corpus is empty")]
    EmptyCorpus,

    /// A model or training setting is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Tensor backend error.
    #[error("tensor backend error: {0}")]
    Candle(#[from] candle_core::Error),

    /// Filesystem error while saving or loading artifacts.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for mathqa operations.
pub type Result<T> = std::result::Result<T, MathQaError>;
