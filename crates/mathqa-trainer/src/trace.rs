//! Per-step gradient norm of the embedding table.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One L2 norm per training step, in step order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradientNormTrace {
    steps: usize,
    norms: Vec<f32>,
}

impl GradientNormTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(steps: usize) -> Self {
        Self {
            steps: 0,
            norms: Vec::with_capacity(steps),
        }
    }

    pub fn push(&mut self, norm: f32) {
        self.norms.push(norm);
        self.steps = self.norms.len();
    }

    pub fn len(&self) -> usize {
        self.norms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.norms.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.norms
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.norms.iter().copied()
    }

    pub fn last(&self) -> Option<f32> {
        self.norms.last().copied()
    }

    /// Smallest and largest recorded norm.
    pub fn range(&self) -> Option<(f32, f32)> {
        let mut iter = self.iter();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Write `{"steps": n, "norms": [...]}` to `path`.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write trace {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_range() {
        let mut trace = GradientNormTrace::new();
        assert!(trace.range().is_none());

        for v in [0.5, 2.0, 0.25] {
            trace.push(v);
        }
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.last(), Some(0.25));
        assert_eq!(trace.range(), Some((0.25, 2.0)));
    }

    #[test]
    fn test_json_shape() {
        let mut trace = GradientNormTrace::new();
        trace.push(1.5);
        trace.push(0.5);

        let value: serde_json::Value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value["steps"], 2);
        assert_eq!(value["norms"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_save_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");

        let mut trace = GradientNormTrace::new();
        trace.push(3.0);
        trace.save_json(&path).unwrap();

        let restored: GradientNormTrace =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored, trace);
    }
}
