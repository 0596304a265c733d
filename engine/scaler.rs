//! Per-feature standardization fitted over the training matrix.

use serde::{Deserialize, Serialize};

/// Standard scaler: per-feature mean and standard deviation.
///
/// Constant features (zero deviation) transform to zero rather than
/// dividing by zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f32>,
    stds: Vec<f32>,
}

impl StandardScaler {
    /// Fits mean and population standard deviation per feature column.
    #[must_use]
    pub fn fit(matrix: &[Vec<f32>]) -> Self {
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, Vec::len);
        let mut means = vec![0.0_f32; cols];
        let mut stds = vec![0.0_f32; cols];
        if rows == 0 {
            return Self { means, stds };
        }
        for row in matrix {
            for (index, value) in row.iter().enumerate() {
                means[index] += value;
            }
        }
        for mean in &mut means {
            *mean /= rows as f32;
        }
        for row in matrix {
            for (index, value) in row.iter().enumerate() {
                let diff = value - means[index];
                stds[index] += diff * diff;
            }
        }
        for std in &mut stds {
            *std = (*std / rows as f32).sqrt();
        }
        Self { means, stds }
    }

    /// Standardizes one feature vector.
    #[must_use]
    pub fn transform(&self, features: &[f32]) -> Vec<f32> {
        features
            .iter()
            .zip(self.means.iter().zip(self.stds.iter()))
            .map(|(value, (mean, std))| {
                if *std == 0.0 {
                    0.0
                } else {
                    (value - mean) / std
                }
            })
            .collect()
    }

    /// Standardizes a whole matrix.
    #[must_use]
    pub fn transform_matrix(&self, matrix: &[Vec<f32>]) -> Vec<Vec<f32>> {
        matrix.iter().map(|row| self.transform(row)).collect()
    }
}
