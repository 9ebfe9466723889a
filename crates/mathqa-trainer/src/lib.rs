//! # mathqa Trainer
//!
//! Fits the LSTM answer predictor with SGD, records the gradient norm of the
//! embedding table at every step, and reports predictions afterwards.

pub mod config;
pub mod report;
pub mod run;
pub mod trace;
pub mod trainer;

pub use config::TrainingConfig;
pub use report::{ErrorPolicy, Reporter, SplitSummary, render_chart};
pub use run::{RunOptions, run, run_training};
pub use trace::GradientNormTrace;
pub use trainer::{Trainer, TrainingOutcome};
