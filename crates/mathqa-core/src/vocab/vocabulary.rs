//! # Vocabulary
//!
//! Dense token ids assigned in first-seen order over the training corpus.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MathQaError, Result};
use crate::types::example::{tokenize, Example};

/// Token to id mapping built once from a corpus and never mutated afterwards.
///
/// Serializes as the ordered token list; the id of a token is its index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    tokens: Vec<String>,
    ids: HashMap<String, u32>,
}

impl Vocabulary {
    /// Build a vocabulary from the questions of a corpus.
    ///
    /// # Examples
    /// ```
    /// use mathqa_core::{Example, Vocabulary};
    ///
    /// let corpus = vec![Example::new("Add 3 and 5", 8), Example::new("Add 9 and 2", 11)];
    /// let vocab = Vocabulary::build(&corpus);
    ///
    /// assert_eq!(vocab.len(), 6);
    /// assert_eq!(vocab.id("and"), Some(2));
    /// ```
    pub fn build(examples: &[Example]) -> Self {
        Self::from_questions(examples.iter().map(|e| e.question.as_str()))
    }

    /// Build a vocabulary from raw question strings.
    pub fn from_questions<'a, I>(questions: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut vocab = Self::default();
        for question in questions {
            for token in tokenize(question) {
                vocab.insert(token);
            }
        }
        tracing::debug!(size = vocab.len(), "built vocabulary");
        vocab
    }

    fn insert(&mut self, token: &str) {
        if self.ids.contains_key(token) {
            return;
        }
        let id = self.tokens.len() as u32;
        self.ids.insert(token.to_string(), id);
        self.tokens.push(token.to_string());
    }

    /// Id of `token`, if it was seen during construction.
    pub fn id(&self, token: &str) -> Option<u32> {
        self.ids.get(token).copied()
    }

    /// Token with the given id.
    pub fn token(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// `(id, token)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(id, token)| (id as u32, token.as_str()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the vocabulary as a JSON token list.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a vocabulary written by [`Vocabulary::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Rebuilds a vocabulary from its token list, keeping every index as its id.
impl TryFrom<Vec<String>> for Vocabulary {
    type Error = MathQaError;

    fn try_from(tokens: Vec<String>) -> Result<Self> {
        let mut ids = HashMap::with_capacity(tokens.len());
        for (id, token) in tokens.iter().enumerate() {
            if !tokenize(token).eq(std::iter::once(token.as_str())) {
                return Err(MathQaError::InvalidConfig(format!(
                    "vocabulary entry {id} is not a single token: {token:?}"
                )));
            }
            if ids.insert(token.clone(), id as u32).is_some() {
                return Err(MathQaError::InvalidConfig(format!(
                    "vocabulary entry {id} duplicates token {token:?}"
                )));
            }
        }
        Ok(Self { tokens, ids })
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocab: Vocabulary) -> Self {
        vocab.tokens
    }
}
