//! Seeded parameter initialization.
//!
//! candle's CPU device cannot be seeded, so every variable is overwritten from
//! an explicit [`Rand32`] after the layers are built. Variables are visited in
//! sorted name order, which makes equal seeds produce equal parameters.

use candle_core::{Tensor, Var};
use candle_nn::VarMap;
use oorandom::Rand32;

use crate::error::Result;

/// Distribution a parameter tensor is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamInit {
    Normal { mean: f32, std: f32 },
    Uniform { bound: f32 },
}

impl ParamInit {
    /// Embedding rows are N(0, 1); LSTM and projection tensors are
    /// U(-1/sqrt(hidden), 1/sqrt(hidden)).
    pub fn for_parameter(name: &str, hidden_dim: usize) -> Self {
        if name.starts_with("embedding.") {
            Self::Normal {
                mean: 0.0,
                std: 1.0,
            }
        } else {
            Self::Uniform {
                bound: 1.0 / (hidden_dim as f32).sqrt(),
            }
        }
    }

    pub fn sample(&self, rng: &mut Rand32) -> f32 {
        match *self {
            Self::Normal { mean, std } => {
                // Box-Muller; 1 - u keeps the log argument in (0, 1].
                let u1 = 1.0 - rng.rand_float();
                let u2 = rng.rand_float();
                let z = (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos();
                mean + std * z
            }
            Self::Uniform { bound } => -bound + 2.0 * bound * rng.rand_float(),
        }
    }
}

fn fill(var: &Var, init: ParamInit, rng: &mut Rand32) -> Result<()> {
    let values: Vec<f32> = (0..var.elem_count()).map(|_| init.sample(rng)).collect();
    let tensor = Tensor::from_vec(values, var.shape().clone(), var.device())?;
    var.set(&tensor)?;
    Ok(())
}

/// Overwrite every variable in `varmap` from `rng`.
pub fn reseed(varmap: &VarMap, hidden_dim: usize, rng: &mut Rand32) -> Result<()> {
    let data = varmap
        .data()
        .lock()
        .map_err(|_| candle_core::Error::Msg("variable map lock poisoned".into()))?;

    let mut names: Vec<&String> = data.keys().collect();
    names.sort();

    for name in names {
        let init = ParamInit::for_parameter(name, hidden_dim);
        tracing::debug!(parameter = %name, ?init, "initializing");
        fill(&data[name], init, rng)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_selection() {
        assert!(matches!(
            ParamInit::for_parameter("embedding.weight", 6),
            ParamInit::Normal { .. }
        ));
        match ParamInit::for_parameter("lstm.weight_ih_l0", 4) {
            ParamInit::Uniform { bound } => assert!((bound - 0.5).abs() < 1e-6),
            other => panic!("unexpected init {:?}", other),
        }
    }

    #[test]
    fn test_uniform_within_bounds() {
        let mut rng = Rand32::new(7);
        let init = ParamInit::Uniform { bound: 0.4 };
        for _ in 0..1000 {
            let v = init.sample(&mut rng);
            assert!((-0.4..=0.4).contains(&v));
        }
    }

    #[test]
    fn test_normal_is_finite_and_centered() {
        let mut rng = Rand32::new(11);
        let init = ParamInit::Normal {
            mean: 0.0,
            std: 1.0,
        };
        let samples: Vec<f32> = (0..4000).map(|_| init.sample(&mut rng)).collect();
        assert!(samples.iter().all(|v| v.is_finite()));
        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        assert!(mean.abs() < 0.1, "mean {}", mean);
    }

    #[test]
    fn test_same_seed_same_samples() {
        let init = ParamInit::Uniform { bound: 1.0 };
        let mut a = Rand32::new(3);
        let mut b = Rand32::new(3);
        for _ in 0..16 {
            assert_eq!(init.sample(&mut a).to_bits(), init.sample(&mut b).to_bits());
        }
    }
}
