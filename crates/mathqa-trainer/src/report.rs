//! # Reporter
//!
//! Renders the gradient norm trace as a text line chart and prints the
//! predictor's answer for each example next to the correct one.

use std::io::Write;

use anyhow::Result;
use mathqa_core::{Example, MathQaError, Predictor, SequenceEncoder};

use crate::trace::GradientNormTrace;

const LABEL_WIDTH: usize = 10;

/// What to do when an example cannot be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the report with the error.
    FailFast,
    /// Print the error in place of the prediction and keep going.
    Report,
}

/// Correct/total counts for one evaluated split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitSummary {
    pub correct: usize,
    pub evaluated: usize,
    pub failed: usize,
}

impl SplitSummary {
    pub fn total(&self) -> usize {
        self.evaluated + self.failed
    }

    /// Fraction of evaluated examples answered correctly.
    pub fn accuracy(&self) -> f32 {
        if self.evaluated == 0 {
            0.0
        } else {
            self.correct as f32 / self.evaluated as f32
        }
    }
}

/// The line printed for each evaluated example.
pub fn prediction_line(question: &str, correct: u32, predicted: u32) -> String {
    format!(
        "question: {}, correct answer: {}, predicted answer: {}",
        question, correct, predicted
    )
}

/// The line printed for an example the predictor could not evaluate.
pub fn failure_line(question: &str, correct: u32, err: &MathQaError) -> String {
    format!(
        "question: {}, correct answer: {}, error: {}",
        question, correct, err
    )
}

/// Render `trace` as a line chart `width` columns wide and `height` rows tall.
///
/// Steps are bucketed into columns by averaging; the y axis spans the
/// smallest and largest bucket.
pub fn render_chart(trace: &GradientNormTrace, width: usize, height: usize) -> String {
    if trace.is_empty() || width == 0 || height == 0 {
        return "gradient norm trace is empty\n".to_string();
    }

    let norms = trace.as_slice();
    let columns = width.min(norms.len());
    let buckets: Vec<f32> = (0..columns)
        .map(|col| {
            let start = col * norms.len() / columns;
            let end = ((col + 1) * norms.len() / columns).max(start + 1);
            let bucket = &norms[start..end];
            bucket.iter().sum::<f32>() / bucket.len() as f32
        })
        .collect();

    let lo = buckets.iter().cloned().fold(f32::INFINITY, f32::min);
    let hi = buckets.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let span = hi - lo;
    let row_of = |v: f32| -> usize {
        if span > 0.0 {
            (((v - lo) / span) * (height - 1) as f32).round() as usize
        } else {
            0
        }
    };

    // grid[0] is the top row.
    let mut grid = vec![vec![' '; columns]; height];
    let mut prev_row: Option<usize> = None;
    for (col, &value) in buckets.iter().enumerate() {
        let row = row_of(value);
        if let Some(prev) = prev_row {
            let (a, b) = if prev < row { (prev, row) } else { (row, prev) };
            for r in a + 1..b {
                grid[height - 1 - r][col] = '|';
            }
        }
        grid[height - 1 - row][col] = '*';
        prev_row = Some(row);
    }

    let mut out = String::new();
    out.push_str("gradient norm (embedding table) per step\n");
    for (i, line) in grid.iter().enumerate() {
        let label = if i == 0 {
            format!("{:>width$.4}", hi, width = LABEL_WIDTH)
        } else if i == height - 1 {
            format!("{:>width$.4}", lo, width = LABEL_WIDTH)
        } else {
            " ".repeat(LABEL_WIDTH)
        };
        out.push_str(&label);
        out.push_str(" |");
        out.extend(line.iter());
        out.push('\n');
    }
    out.push_str(&" ".repeat(LABEL_WIDTH));
    out.push_str(" +");
    out.push_str(&"-".repeat(columns));
    out.push('\n');

    let last = format!("{}", norms.len());
    let gap = columns.saturating_sub(1 + last.len()).max(1);
    out.push_str(&" ".repeat(LABEL_WIDTH + 2));
    out.push('0');
    out.push_str(&" ".repeat(gap));
    out.push_str(&last);
    out.push('\n');
    out
}

/// Writes the chart and the per-example prediction lines.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    chart_width: usize,
    chart_height: usize,
}

impl Reporter {
    pub fn new(chart_width: usize, chart_height: usize) -> Self {
        Self {
            chart_width,
            chart_height,
        }
    }

    pub fn write_chart<W: Write>(&self, out: &mut W, trace: &GradientNormTrace) -> Result<()> {
        out.write_all(render_chart(trace, self.chart_width, self.chart_height).as_bytes())?;
        Ok(())
    }

    /// Predict every example and print one line each.
    pub fn write_predictions<W: Write>(
        &self,
        out: &mut W,
        predictor: &mut Predictor,
        encoder: &SequenceEncoder<'_>,
        examples: &[Example],
        policy: ErrorPolicy,
    ) -> Result<SplitSummary> {
        let mut summary = SplitSummary::default();

        for example in examples {
            let outcome = encoder
                .encode(&example.question)
                .and_then(|question| predictor.predict(&question));

            match outcome {
                Ok(prediction) => {
                    summary.evaluated += 1;
                    if prediction.answer == example.answer {
                        summary.correct += 1;
                    }
                    writeln!(
                        out,
                        "{}",
                        prediction_line(&example.question, example.answer, prediction.answer)
                    )?;
                }
                Err(err) if policy == ErrorPolicy::Report => {
                    summary.failed += 1;
                    tracing::debug!(question = %example.question, error = %err, "example skipped");
                    writeln!(out, "{}", failure_line(&example.question, example.answer, &err))?;
                }
                Err(err) => {
                    return Err(anyhow::Error::new(err)
                        .context(format!("failed to evaluate {:?}", example.question)));
                }
            }
        }

        Ok(summary)
    }

    /// Predict an ad-hoc question and print `question: ..., predicted answer: ...`.
    pub fn write_answer<W: Write>(
        &self,
        out: &mut W,
        predictor: &mut Predictor,
        encoder: &SequenceEncoder<'_>,
        question: &str,
    ) -> Result<u32> {
        let encoded = encoder.encode(question)?;
        let prediction = predictor.predict(&encoded)?;
        writeln!(
            out,
            "question: {}, predicted answer: {} (p={:.3})",
            question,
            prediction.answer,
            prediction.confidence()
        )?;
        Ok(prediction.answer)
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(72, 16)
    }
}
