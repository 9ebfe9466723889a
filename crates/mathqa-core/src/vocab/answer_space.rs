use crate::error::{MathQaError, Result};

/// Default number of answer classes, covering answers `0..=99`.
pub const ANSWER_SPACE_SIZE: usize = 100;

/// Identity mapping between integer answers and output classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerSpace {
    size: usize,
}

impl AnswerSpace {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains(&self, answer: u32) -> bool {
        (answer as usize) < self.size
    }

    /// Class index for `answer`, rejecting answers the output layer cannot represent.
    pub fn class_of(&self, answer: u32) -> Result<u32> {
        if self.contains(answer) {
            Ok(answer)
        } else {
            Err(MathQaError::AnswerOutOfRange {
                answer,
                answer_space: self.size,
            })
        }
    }

    pub fn answer_of(&self, class: u32) -> u32 {
        class
    }
}

impl Default for AnswerSpace {
    fn default() -> Self {
        Self::new(ANSWER_SPACE_SIZE)
    }
}
