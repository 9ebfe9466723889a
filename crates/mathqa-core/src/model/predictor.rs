//! # LSTM Answer Predictor
//!
//! Embedding lookup, a single-layer LSTM, mean-pooling over time steps, a
//! linear projection to the answer space and log-softmax. Built on candle so
//! the trainer can backpropagate through the whole graph.

use std::path::Path;

use candle_core::{D, DType, Device, Tensor, Var};
use candle_nn::rnn::{LSTM, LSTMConfig, LSTMState, RNN};
use candle_nn::{Embedding, Linear, Module, VarBuilder, VarMap};
use oorandom::Rand32;

use crate::error::{MathQaError, Result};
use crate::model::config::ModelConfig;
use crate::model::init;
use crate::types::Prediction;
use crate::vocab::{AnswerSpace, EncodedQuestion};

/// The answer predictor and the variables that back it.
pub struct Predictor {
    config: ModelConfig,
    vocab_size: usize,
    varmap: VarMap,
    embedding: Embedding,
    lstm: LSTM,
    hidden2answer: Linear,
    state: LSTMState,
    device: Device,
}

impl Predictor {
    /// Build a predictor for `vocab_size` tokens, drawing every parameter from `rng`.
    pub fn new(config: ModelConfig, vocab_size: usize, rng: &mut Rand32) -> Result<Self> {
        config.validate()?;
        if vocab_size == 0 {
            return Err(MathQaError::InvalidConfig(
                "vocabulary must contain at least one token".into(),
            ));
        }

        let device = Device::Cpu;
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);

        let embedding =
            candle_nn::embedding(vocab_size, config.embedding_dim, vb.pp("embedding"))?;
        let lstm = candle_nn::rnn::lstm(
            config.embedding_dim,
            config.hidden_dim,
            LSTMConfig::default(),
            vb.pp("lstm"),
        )?;
        let hidden2answer =
            candle_nn::linear(config.hidden_dim, config.answer_space, vb.pp("hidden2answer"))?;

        init::reseed(&varmap, config.hidden_dim, rng)?;
        let state = lstm.zero_state(1)?;

        tracing::debug!(
            vocab_size,
            embedding_dim = config.embedding_dim,
            hidden_dim = config.hidden_dim,
            answer_space = config.answer_space,
            "built predictor"
        );

        Ok(Self {
            config,
            vocab_size,
            varmap,
            embedding,
            lstm,
            hidden2answer,
            state,
            device,
        })
    }

    /// Build a predictor and overwrite its parameters from a safetensors file
    /// written by [`Predictor::save`].
    pub fn load<P: AsRef<Path>>(path: P, config: ModelConfig, vocab_size: usize) -> Result<Self> {
        let mut predictor = Self::new(config, vocab_size, &mut Rand32::new(0))?;
        predictor.varmap.load(path)?;
        Ok(predictor)
    }

    /// Write every parameter to a safetensors file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.varmap.save(path)?;
        Ok(())
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    pub fn answer_space(&self) -> AnswerSpace {
        AnswerSpace::new(self.config.answer_space)
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// All trainable variables, for the optimizer.
    pub fn parameters(&self) -> Vec<Var> {
        self.varmap.all_vars()
    }

    /// The embedding table, shape `[vocab_size, embedding_dim]`.
    pub fn embedding_table(&self) -> &Tensor {
        self.embedding.embeddings()
    }

    /// Recurrent state left behind by the last forward pass.
    pub fn recurrent_state(&self) -> &LSTMState {
        &self.state
    }

    /// Zero the hidden and cell state.
    pub fn reset_state(&mut self) -> Result<()> {
        self.state = self.lstm.zero_state(1)?;
        Ok(())
    }

    /// Log-probabilities over the answer space, shape `[1, answer_space]`.
    ///
    /// The recurrent state is zeroed before the sequence is consumed and holds
    /// the final step's state afterwards.
    pub fn forward(&mut self, question: &EncodedQuestion) -> Result<Tensor> {
        if question.is_empty() {
            return Err(MathQaError::EmptyQuestion);
        }
        if let Some(&id) = question
            .ids()
            .iter()
            .find(|&&id| id as usize >= self.vocab_size)
        {
            return Err(MathQaError::InvalidTokenId {
                id,
                vocab_size: self.vocab_size,
            });
        }

        self.reset_state()?;

        let ids = question.to_tensor(&self.device)?;
        // [1, seq_len, embedding_dim]
        let embeds = self.embedding.forward(&ids)?.unsqueeze(0)?;
        let states = self.lstm.seq_init(&embeds, &self.state)?;
        // [1, seq_len, hidden_dim]
        let outputs = self.lstm.states_to_tensor(&states)?;

        let pooled = outputs.mean(1)?;
        let logits = self.hidden2answer.forward(&pooled)?;
        let log_probs = candle_nn::ops::log_softmax(&logits, D::Minus1)?;

        if let Some(last) = states.last() {
            self.state = last.clone();
        }
        Ok(log_probs)
    }

    /// [`Predictor::forward`] as a plain vector of `answer_space` entries.
    pub fn log_probabilities(&mut self, question: &EncodedQuestion) -> Result<Vec<f32>> {
        Ok(self.forward(question)?.squeeze(0)?.to_vec1::<f32>()?)
    }

    /// The argmax answer and its log-probability.
    pub fn predict(&mut self, question: &EncodedQuestion) -> Result<Prediction> {
        let scores = self.log_probabilities(question)?;
        let mut prediction = Prediction::from_log_probabilities(&scores)
            .ok_or_else(|| MathQaError::InvalidConfig("answer space is empty".into()))?;
        prediction.answer = self.answer_space().answer_of(prediction.answer);
        Ok(prediction)
    }
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("config", &self.config)
            .field("vocab_size", &self.vocab_size)
            .finish_non_exhaustive()
    }
}
