pub mod answer_space;
pub mod encoder;
pub mod vocabulary;

pub use answer_space::{ANSWER_SPACE_SIZE, AnswerSpace};
pub use encoder::{EncodedQuestion, SequenceEncoder};
pub use vocabulary::Vocabulary;
