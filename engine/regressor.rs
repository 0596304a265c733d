//! Linear severity regressor fitted by full-batch gradient descent.

use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Linear regression with bias over standardized features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    weights: Vec<f32>,
    bias: f32,
}

impl LinearRegressor {
    /// Fits the regressor against scalar targets.
    #[must_use]
    pub fn fit(
        features: &[Vec<f32>],
        targets: &[f32],
        learning_rate: f32,
        epochs: usize,
        seed: u64,
    ) -> Self {
        let feature_dim = features.first().map_or(0, Vec::len);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut weights: Vec<f32> = (0..feature_dim)
            .map(|_| rng.gen_range(-0.05..0.05))
            .collect();
        let mut bias = 0.0_f32;
        let samples = features.len();
        if samples == 0 {
            return Self { weights, bias };
        }

        for _ in 0..epochs {
            let errors: Vec<f32> = features
                .iter()
                .zip(targets.iter())
                .map(|(row, target)| predict_row(&weights, bias, row) - target)
                .collect();
            for (index, weight) in weights.iter_mut().enumerate() {
                let grad: f32 = errors
                    .iter()
                    .zip(features.iter())
                    .map(|(error, row)| error * row[index])
                    .sum::<f32>()
                    / samples as f32;
                *weight -= learning_rate * grad;
            }
            let bias_grad: f32 = errors.iter().sum::<f32>() / samples as f32;
            bias -= learning_rate * bias_grad;
        }
        Self { weights, bias }
    }

    /// Predicted scalar for one vector.
    #[must_use]
    pub fn predict(&self, features: &[f32]) -> f32 {
        predict_row(&self.weights, self.bias, features)
    }
}

fn predict_row(weights: &[f32], bias: f32, features: &[f32]) -> f32 {
    weights
        .iter()
        .zip(features.iter())
        .map(|(weight, value)| weight * value)
        .sum::<f32>()
        + bias
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_a_simple_linear_trend() {
        let features: Vec<Vec<f32>> = (0..10).map(|i| vec![i as f32 / 10.0]).collect();
        let targets: Vec<f32> = (0..10).map(|i| 0.1 + 0.05 * i as f32).collect();
        let model = LinearRegressor::fit(&features, &targets, 0.1, 2000, 42);
        let prediction = model.predict(&[0.5]);
        assert!((prediction - 0.35).abs() < 0.05, "got {prediction}");
    }

    #[test]
    fn empty_corpus_predicts_from_bias_alone() {
        let model = LinearRegressor::fit(&[], &[], 0.1, 10, 1);
        assert!(model.predict(&[]).abs() < f32::EPSILON);
    }
}
