//! # Built-in Corpus
//!
//! The nine training problems and six held-out problems the experiment ships
//! with. Text is kept verbatim, including the missing space in
//! `"dollars.How"`, because the vocabulary is built from exact tokens.

use crate::types::Example;

const TRAINING: &[(&str, u32)] = &[
    ("Add 3 and 5", 8),
    ("Multiply 9 and 2", 18),
    ("Divide 9 by 3", 3),
    (
        "John had 3 mangoes then Mary gave him 4 more. How much does he have now?",
        7,
    ),
    ("Sum 50 and 5", 55),
    (
        "Adam went to the store with 10 dollars then bought an apple for 6 dollars.How much does he know have?",
        4,
    ),
    ("Subtract 16 from 30", 14),
    ("Multiply 2 and 30", 60),
    ("Add 25 and 39", 64),
];

const TEST: &[(&str, u32)] = &[
    (
        "If Alex had 50 dollars in his account before he deposited 30 dollars. How much does he now have?",
        80,
    ),
    ("Add 9 and 3", 12),
    ("Subtract 20 from 64", 34),
    ("Divide 360 by 4", 90),
    ("Multiply 12 and 3", 36),
    ("What is 2 by 2 by 2?", 8),
];

fn to_examples(pairs: &[(&str, u32)]) -> Vec<Example> {
    pairs
        .iter()
        .map(|&(question, answer)| Example::new(question, answer))
        .collect()
}

/// The training split, in the fixed order every epoch visits it.
pub fn training_set() -> Vec<Example> {
    to_examples(TRAINING)
}

/// The held-out split. Several of its tokens never occur in training.
pub fn test_set() -> Vec<Example> {
    to_examples(TEST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        assert_eq!(training_set().len(), 9);
        assert_eq!(test_set().len(), 6);
    }

    #[test]
    fn test_answers_fit_answer_space() {
        for example in training_set().iter().chain(test_set().iter()) {
            assert!(example.answer < 100, "{:?}", example);
        }
    }

    #[test]
    fn test_concatenated_question_is_verbatim() {
        let training = training_set();
        let tokens: Vec<_> = training[5].tokens().collect();
        assert!(tokens.contains(&"dollars.How"));
    }
}
