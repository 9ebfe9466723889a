use serde::{Deserialize, Serialize};

/// A single word problem paired with its integer answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// The question text. Tokens are whitespace-delimited.
    pub question: String,

    /// The correct answer.
    pub answer: u32,
}

impl Example {
    /// Creates a new example.
    pub fn new(question: impl Into<String>, answer: u32) -> Self {
        Self {
            question: question.into(),
            answer,
        }
    }

    /// Splits the question on runs of whitespace.
    ///
    /// No normalization is applied: `"dollars."` and `"dollars"` are
    /// different tokens, and so are `"Add"` and `"add"`.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        tokenize(&self.question)
    }
}

/// Whitespace tokenizer shared by the vocabulary builder and the encoder.
pub fn tokenize(question: &str) -> impl Iterator<Item = &str> {
    question.split_whitespace()
}
