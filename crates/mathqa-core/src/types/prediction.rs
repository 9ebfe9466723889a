use serde::{Deserialize, Serialize};

/// The predictor's best guess for one question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Argmax answer over the answer space.
    pub answer: u32,

    /// Log-probability the model assigned to `answer`.
    pub log_probability: f32,
}

impl Prediction {
    /// Picks the highest-scoring class. Ties resolve to the lowest class.
    ///
    /// Returns `None` for an empty score vector.
    pub fn from_log_probabilities(scores: &[f32]) -> Option<Self> {
        let mut best: Option<(usize, f32)> = None;
        for (class, &score) in scores.iter().enumerate() {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((class, score)),
            }
        }
        best.map(|(class, log_probability)| Self {
            answer: class as u32,
            log_probability,
        })
    }

    /// Probability the model assigned to the predicted answer.
    pub fn confidence(&self) -> f32 {
        self.log_probability.exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax() {
        let prediction = Prediction::from_log_probabilities(&[-3.0, -0.1, -2.5]).unwrap();
        assert_eq!(prediction.answer, 1);
        assert!((prediction.log_probability + 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ties_pick_first_class() {
        let prediction = Prediction::from_log_probabilities(&[-1.0, -1.0]).unwrap();
        assert_eq!(prediction.answer, 0);
    }

    #[test]
    fn test_empty_scores() {
        assert!(Prediction::from_log_probabilities(&[]).is_none());
    }

    #[test]
    fn test_confidence() {
        let prediction = Prediction {
            answer: 4,
            log_probability: 0.0,
        };
        assert!((prediction.confidence() - 1.0).abs() < 1e-6);
    }
}
