//! Training loop for the LSTM answer predictor.
//!
//! Plain SGD with a batch of one, visiting the corpus in its fixed order every
//! epoch. There is no early stopping: a run always performs
//! `epochs * corpus.len()` updates.

use anyhow::{Context, Result};
use candle_core::Tensor;
use candle_nn::{Optimizer, SGD};
use mathqa_core::{
    AnswerSpace, Example, MathQaError, Predictor, SequenceEncoder, Vocabulary,
};
use oorandom::Rand32;

use crate::config::TrainingConfig;
use crate::trace::GradientNormTrace;

/// Everything a finished run produced.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub vocabulary: Vocabulary,
    pub predictor: Predictor,
    pub trace: GradientNormTrace,
    /// Mean NLL of each epoch
    pub epoch_losses: Vec<f32>,
    /// Number of optimizer updates performed
    pub steps: usize,
}

pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Check the corpus before any parameter is touched.
    fn validate_corpus(&self, corpus: &[Example], encoder: &SequenceEncoder<'_>) -> Result<()> {
        if corpus.is_empty() {
            return Err(MathQaError::EmptyCorpus.into());
        }

        let answer_space = AnswerSpace::new(self.config.answer_space);
        for (index, example) in corpus.iter().enumerate() {
            answer_space
                .class_of(example.answer)
                .with_context(|| format!("training example {index}: {:?}", example.question))?;
            if encoder.encode(&example.question)?.is_empty() {
                return Err(anyhow::Error::new(MathQaError::EmptyQuestion)
                    .context(format!("training example {index}")));
            }
        }
        Ok(())
    }

    /// Build the vocabulary from `corpus` and fit a fresh predictor to it.
    pub fn fit(&self, corpus: &[Example]) -> Result<TrainingOutcome> {
        self.config.validate()?;

        let vocabulary = Vocabulary::build(corpus);
        let encoder = SequenceEncoder::new(&vocabulary);
        self.validate_corpus(corpus, &encoder)?;

        let answer_space = AnswerSpace::new(self.config.answer_space);
        let mut rng = Rand32::new(self.config.seed);
        let mut predictor = Predictor::new(self.config.model_config(), vocabulary.len(), &mut rng)?;
        let mut optimizer = SGD::new(predictor.parameters(), self.config.learning_rate)?;

        let total_steps = self.config.epochs * corpus.len();
        let mut trace = GradientNormTrace::with_capacity(total_steps);
        let mut epoch_losses = Vec::with_capacity(self.config.epochs);

        tracing::info!(
            examples = corpus.len(),
            vocab_size = vocabulary.len(),
            epochs = self.config.epochs,
            learning_rate = self.config.learning_rate,
            seed = self.config.seed,
            "starting training"
        );

        for epoch in 0..self.config.epochs {
            let mut loss_sum = 0.0f32;
            for example in corpus {
                loss_sum += self.step(
                    &mut predictor,
                    &mut optimizer,
                    &encoder,
                    &answer_space,
                    example,
                    &mut trace,
                )?;
            }

            let mean_loss = loss_sum / corpus.len() as f32;
            epoch_losses.push(mean_loss);

            let last_epoch = epoch + 1 == self.config.epochs;
            let log_due = self.config.log_every > 0 && (epoch + 1) % self.config.log_every == 0;
            if log_due || last_epoch {
                tracing::info!(
                    epoch = epoch + 1,
                    epochs = self.config.epochs,
                    mean_loss,
                    grad_norm = trace.last().unwrap_or_default(),
                    "epoch complete"
                );
            }
        }

        tracing::info!(steps = trace.len(), "training finished");

        Ok(TrainingOutcome {
            steps: trace.len(),
            vocabulary,
            predictor,
            trace,
            epoch_losses,
        })
    }

    /// One forward/backward/update on a single example. Returns the loss.
    fn step(
        &self,
        predictor: &mut Predictor,
        optimizer: &mut SGD,
        encoder: &SequenceEncoder<'_>,
        answer_space: &AnswerSpace,
        example: &Example,
        trace: &mut GradientNormTrace,
    ) -> Result<f32> {
        // Gradients never accumulate: every backward pass returns a new store.
        predictor.reset_state()?;

        let question = encoder.encode(&example.question)?;
        let class = answer_space.class_of(example.answer)?;
        let target = Tensor::new(&[class], predictor.device())?;

        let log_probs = predictor.forward(&question)?;
        let loss = candle_nn::loss::nll(&log_probs, &target)?;
        let grads = loss.backward()?;
        optimizer.step(&grads)?;

        let norm = match grads.get(predictor.embedding_table()) {
            Some(grad) => grad.sqr()?.sum_all()?.sqrt()?.to_scalar::<f32>()?,
            None => {
                tracing::warn!(question = %example.question, "embedding table received no gradient");
                0.0
            }
        };
        trace.push(norm);

        Ok(loss.to_scalar::<f32>()?)
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(TrainingConfig::default())
    }
}
