//! End-to-end run: train on the built-in corpus, then report.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use mathqa_core::{Example, SequenceEncoder, corpus};

use crate::config::TrainingConfig;
use crate::report::{ErrorPolicy, Reporter, SplitSummary};
use crate::trainer::{Trainer, TrainingOutcome};

/// Everything a run needs besides the corpus.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: TrainingConfig,
    /// Also evaluate the held-out split.
    pub eval_test: bool,
    /// Ad-hoc questions answered after training.
    pub ask: Vec<String>,
    pub trace_out: Option<PathBuf>,
    pub checkpoint_dir: Option<PathBuf>,
    pub chart_width: usize,
    pub chart_height: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: TrainingConfig::default(),
            eval_test: false,
            ask: Vec::new(),
            trace_out: None,
            checkpoint_dir: None,
            chart_width: 72,
            chart_height: 16,
        }
    }
}

/// Train on `training` and write the report to `out`.
///
/// The training split is reported fail-fast. The test split, when requested,
/// prints unknown-token failures in place of predictions, and each split then
/// gets an accuracy line.
pub fn run<W: Write>(
    options: &RunOptions,
    training: &[Example],
    test: &[Example],
    out: &mut W,
) -> Result<TrainingOutcome> {
    let trainer = Trainer::new(options.config.clone());
    let mut outcome = trainer.fit(training)?;
    let reporter = Reporter::new(options.chart_width, options.chart_height);

    reporter.write_chart(out, &outcome.trace)?;

    if let Some(path) = &options.trace_out {
        outcome.trace.save_json(path)?;
        tracing::info!(path = %path.display(), "gradient norm trace written");
    }

    if let Some(dir) = &options.checkpoint_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        outcome.predictor.save(dir.join("model.safetensors"))?;
        outcome.vocabulary.save(dir.join("vocab.json"))?;
        trainer.config().save(dir.join("config.json"))?;
        tracing::info!(
            dir = %dir.display(),
            vocab_size = outcome.predictor.vocab_size(),
            hidden_dim = outcome.predictor.config().hidden_dim,
            "checkpoint saved"
        );
    }

    let TrainingOutcome {
        vocabulary,
        predictor,
        ..
    } = &mut outcome;
    let encoder = SequenceEncoder::new(vocabulary);

    let summary =
        reporter.write_predictions(out, predictor, &encoder, training, ErrorPolicy::FailFast)?;
    log_summary("training", &summary);

    if options.eval_test {
        write_accuracy(out, "training", &summary)?;

        let summary =
            reporter.write_predictions(out, predictor, &encoder, test, ErrorPolicy::Report)?;
        log_summary("test", &summary);
        write_accuracy(out, "test", &summary)?;
    }

    for question in &options.ask {
        reporter.write_answer(out, predictor, &encoder, question)?;
    }

    Ok(outcome)
}

/// [`run`] over the built-in corpus, reporting to stdout.
pub fn run_training(options: &RunOptions) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(options, &corpus::training_set(), &corpus::test_set(), &mut out)?;
    out.flush()?;
    Ok(())
}

/// `<split> accuracy: <correct>/<total>`; failed examples count toward the total.
fn write_accuracy<W: Write>(out: &mut W, split: &str, summary: &SplitSummary) -> Result<()> {
    writeln!(
        out,
        "{} accuracy: {}/{}",
        split,
        summary.correct,
        summary.total()
    )?;
    Ok(())
}

fn log_summary(split: &str, summary: &SplitSummary) {
    tracing::info!(
        split,
        correct = summary.correct,
        evaluated = summary.evaluated,
        failed = summary.failed,
        accuracy = summary.accuracy(),
        "evaluation complete"
    );
}
