use rand::{distributions::Uniform, prelude::Distribution, rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use simple_error::SimpleError;
use statrs::distribution::Normal;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppliedCurrentDist {
    Ramp { i0: f64, delta: f64 },
    Uniform { i0: f64, delta: f64 },
    Normal { mean: f64, std_dev: f64 },
}

impl Default for AppliedCurrentDist {
    fn default() -> Self {
        AppliedCurrentDist::Ramp {
            i0: -10.0,
            delta: 15.0,
        }
    }
}

impl AppliedCurrentDist {
    pub fn generate(&self, num_neurons: usize, seed: u64) -> Result<Vec<f64>, SimpleError> {
        match *self {
            AppliedCurrentDist::Ramp { i0, delta } => Ok(linear_ramp(num_neurons, i0, delta)),
            AppliedCurrentDist::Uniform { i0, delta } => uniform(num_neurons, i0, delta, seed),
            AppliedCurrentDist::Normal { mean, std_dev } => {
                normal(num_neurons, mean, std_dev, seed)
            }
        }
    }
}

pub fn linear_ramp(num_neurons: usize, i0: f64, delta: f64) -> Vec<f64> {
    if num_neurons == 1 {
        return vec![i0];
    }

    let increment = delta / (num_neurons - 1) as f64;
    (0..num_neurons).map(|k| i0 + k as f64 * increment).collect()
}

pub fn uniform(num_neurons: usize, i0: f64, delta: f64, seed: u64) -> Result<Vec<f64>, SimpleError> {
    if !(delta >= 0.0) || !i0.is_finite() || !delta.is_finite() {
        return Err(SimpleError::new(
            "uniform applied current: i0 must be finite and delta must be a finite non-negative number",
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Uniform::new_inclusive(i0, i0 + delta);
    Ok((0..num_neurons).map(|_| dist.sample(&mut rng)).collect())
}

pub fn normal(
    num_neurons: usize,
    mean: f64,
    std_dev: f64,
    seed: u64,
) -> Result<Vec<f64>, SimpleError> {
    let dist = Normal::new(mean, std_dev).map_err(|err| {
        SimpleError::new(format!("normal applied current: {}", err))
    })?;

    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..num_neurons).map(|_| dist.sample(&mut rng)).collect())
}
