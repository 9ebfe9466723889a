use std::path::PathBuf;

use clap::Parser;
use mathqa_trainer::{RunOptions, TrainingConfig, run_training};
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser)]
#[command(name = "mathqa-train")]
#[command(about = "Train the LSTM word-problem answerer and print its predictions")]
#[command(version)]
struct Cli {
    /// JSON training configuration; missing fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for parameter initialization
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of epochs
    #[arg(short, long)]
    epochs: Option<usize>,

    /// Also evaluate the held-out test set
    #[arg(long)]
    eval_test: bool,

    /// Answer a question with the trained model (repeatable)
    #[arg(short, long = "ask", value_name = "QUESTION")]
    ask: Vec<String>,

    /// Write the gradient norm trace as JSON
    #[arg(long, value_name = "PATH")]
    trace_out: Option<PathBuf>,

    /// Save model.safetensors, vocab.json and config.json into this directory
    #[arg(long, value_name = "DIR")]
    checkpoint_dir: Option<PathBuf>,

    /// Chart width in columns
    #[arg(long, default_value_t = 72)]
    chart_width: usize,

    /// Chart height in rows
    #[arg(long, default_value_t = 16)]
    chart_height: usize,
}

impl Cli {
    fn into_options(self) -> anyhow::Result<RunOptions> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::from_file(path)?,
            None => TrainingConfig::default(),
        };
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(epochs) = self.epochs {
            config = config.with_epochs(epochs);
        }

        Ok(RunOptions {
            config,
            eval_test: self.eval_test,
            ask: self.ask,
            trace_out: self.trace_out,
            checkpoint_dir: self.checkpoint_dir,
            chart_width: self.chart_width,
            chart_height: self.chart_height,
        })
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mathqa=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = Cli::parse()
        .into_options()
        .and_then(|options| run_training(&options));

    if let Err(e) = result {
        eprintln!("Training failed: {:#}", e);
        std::process::exit(1);
    }
}
