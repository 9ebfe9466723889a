//! # Sequence Encoder
//!
//! Maps whitespace tokens to vocabulary ids. An unseen token is an error, there
//! is no unknown-token slot.

use candle_core::{Device, Tensor};

use crate::error::{MathQaError, Result};
use crate::types::example::tokenize;
use crate::vocab::vocabulary::Vocabulary;

/// A question as a sequence of vocabulary ids, one per token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedQuestion {
    ids: Vec<u32>,
}

impl EncodedQuestion {
    pub fn new(ids: Vec<u32>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Rank-1 `u32` tensor of ids, shape `[len]`.
    pub fn to_tensor(&self, device: &Device) -> Result<Tensor> {
        Ok(Tensor::new(self.ids.as_slice(), device)?)
    }
}

/// Encodes questions against a borrowed vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct SequenceEncoder<'a> {
    vocab: &'a Vocabulary,
}

impl<'a> SequenceEncoder<'a> {
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Self { vocab }
    }

    /// Tokenize and encode a question.
    ///
    /// # Examples
    /// ```
    /// use mathqa_core::{MathQaError, SequenceEncoder, Vocabulary};
    ///
    /// let vocab = Vocabulary::from_questions(["Add 3 and 5"]);
    /// let encoder = SequenceEncoder::new(&vocab);
    ///
    /// assert_eq!(encoder.encode("5 and 3").unwrap().ids(), &[3, 2, 1]);
    /// assert!(matches!(
    ///     encoder.encode("Divide 9 by 3"),
    ///     Err(MathQaError::UnknownToken { position: 0, .. })
    /// ));
    /// ```
    pub fn encode(&self, question: &str) -> Result<EncodedQuestion> {
        let tokens: Vec<&str> = tokenize(question).collect();
        self.encode_tokens(&tokens)
    }

    /// Encode pre-split tokens. Fails on the first unknown token.
    pub fn encode_tokens(&self, tokens: &[&str]) -> Result<EncodedQuestion> {
        let ids = tokens
            .iter()
            .enumerate()
            .map(|(position, &token)| {
                self.vocab
                    .id(token)
                    .ok_or_else(|| MathQaError::UnknownToken {
                        token: token.to_string(),
                        position,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EncodedQuestion::new(ids))
    }
}
