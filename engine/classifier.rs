//! Multinomial logistic regression fitted by full-batch gradient descent.

use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Softmax classifier over standardized feature vectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxClassifier {
    /// Class-major weight matrix.
    weights: Vec<Vec<f32>>,
    biases: Vec<f32>,
}

impl SoftmaxClassifier {
    /// Fits the classifier. `labels` are class indices below `class_count`.
    #[must_use]
    pub fn fit(
        features: &[Vec<f32>],
        labels: &[usize],
        class_count: usize,
        learning_rate: f32,
        epochs: usize,
        seed: u64,
    ) -> Self {
        let feature_dim = features.first().map_or(0, Vec::len);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut weights: Vec<Vec<f32>> = (0..class_count)
            .map(|_| (0..feature_dim).map(|_| rng.gen_range(-0.01..0.01)).collect())
            .collect();
        let mut biases = vec![0.0_f32; class_count];
        let samples = features.len();
        if samples == 0 || class_count == 0 {
            return Self { weights, biases };
        }

        for _ in 0..epochs {
            let mut weight_grads = vec![vec![0.0_f32; feature_dim]; class_count];
            let mut bias_grads = vec![0.0_f32; class_count];
            for (row, label) in features.iter().zip(labels.iter()) {
                let probs = softmax(&logits(&weights, &biases, row));
                for (class, prob) in probs.iter().enumerate() {
                    let error = prob - f32::from(u8::from(class == *label));
                    for (grad, value) in weight_grads[class].iter_mut().zip(row.iter()) {
                        *grad += error * value;
                    }
                    bias_grads[class] += error;
                }
            }
            for (class, class_weights) in weights.iter_mut().enumerate() {
                for (weight, grad) in class_weights.iter_mut().zip(weight_grads[class].iter()) {
                    *weight -= learning_rate * grad / samples as f32;
                }
                biases[class] -= learning_rate * bias_grads[class] / samples as f32;
            }
        }
        Self { weights, biases }
    }

    /// Probability distribution over all classes for one vector.
    #[must_use]
    pub fn predict_proba(&self, features: &[f32]) -> Vec<f32> {
        softmax(&logits(&self.weights, &self.biases, features))
    }

    /// Number of classes the classifier was fitted over.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.weights.len()
    }
}

fn logits(weights: &[Vec<f32>], biases: &[f32], features: &[f32]) -> Vec<f32> {
    weights
        .iter()
        .zip(biases.iter())
        .map(|(class_weights, bias)| {
            class_weights
                .iter()
                .zip(features.iter())
                .map(|(weight, value)| weight * value)
                .sum::<f32>()
                + bias
        })
        .collect()
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|logit| (logit - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    if total == 0.0 {
        return vec![1.0 / logits.len() as f32; logits.len()];
    }
    exps.iter().map(|value| value / total).collect()
}
