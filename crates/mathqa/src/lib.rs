//! # mathqa
//!
//! A toy LSTM that reads short arithmetic word problems and predicts their
//! answer as one of 100 classes.
//!
//! ```no_run
//! use mathqa::{RunOptions, run_training};
//!
//! run_training(&RunOptions::default()).unwrap();
//! ```

pub use mathqa_core::*;
pub use mathqa_trainer::{
    ErrorPolicy, GradientNormTrace, Reporter, RunOptions, SplitSummary, Trainer, TrainingConfig,
    TrainingOutcome, render_chart, run, run_training,
};

pub mod trainer {
    pub use mathqa_trainer::*;
}
