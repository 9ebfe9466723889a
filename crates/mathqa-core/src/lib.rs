//! # mathqa Core
//!
//! Building blocks for answering short arithmetic word problems with a small
//! LSTM classifier: the built-in corpus, the vocabulary and sequence encoder,
//! the answer space, and the candle-backed predictor.
//!
//! ## Quick Start
//!
//! ```rust
//! use mathqa_core::{corpus, ModelConfig, Predictor, SequenceEncoder, Vocabulary};
//! use oorandom::Rand32;
//!
//! let training = corpus::training_set();
//! let vocab = Vocabulary::build(&training);
//! let encoder = SequenceEncoder::new(&vocab);
//!
//! let mut predictor = Predictor::new(ModelConfig::default(), vocab.len(), &mut Rand32::new(1)).unwrap();
//! let question = encoder.encode("Add 3 and 5").unwrap();
//! let prediction = predictor.predict(&question).unwrap();
//!
//! assert!(prediction.answer < 100);
//! ```
pub mod corpus;
pub mod error;
pub mod model;
pub mod types;
pub mod vocab;

// Re-export primary API
pub use error::{MathQaError, Result};
pub use model::{ModelConfig, ParamInit, Predictor};
pub use types::{Example, Prediction};
pub use vocab::{ANSWER_SPACE_SIZE, AnswerSpace, EncodedQuestion, SequenceEncoder, Vocabulary};
