//! Seeded k-means over standardized feature vectors.

use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const MAX_ITERATIONS: usize = 100;
const INITIALIZATIONS: u64 = 10;

/// K-means model retaining only the fitted centroids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeans {
    centroids: Vec<Vec<f32>>,
}

impl KMeans {
    /// Fits `k` clusters with Lloyd iterations, keeping the lowest-inertia
    /// run out of ten seeded initializations.
    #[must_use]
    pub fn fit(data: &[Vec<f32>], k: usize, seed: u64) -> Self {
        let k = k.min(data.len()).max(1);
        if data.is_empty() {
            return Self { centroids: Vec::new() };
        }
        let mut best: Option<(f32, Vec<Vec<f32>>)> = None;
        for init in 0..INITIALIZATIONS {
            let centroids = lloyd_run(data, k, seed + init);
            let inertia = total_inertia(data, &centroids);
            let better = best
                .as_ref()
                .map_or(true, |(best_inertia, _)| inertia < *best_inertia);
            if better {
                best = Some((inertia, centroids));
            }
        }
        let (_, centroids) = best.unwrap_or((0.0, Vec::new()));
        Self { centroids }
    }

    /// Nearest centroid index and the Euclidean distance to it.
    #[must_use]
    pub fn assign(&self, features: &[f32]) -> (usize, f32) {
        let mut best = (0, f32::INFINITY);
        for (index, centroid) in self.centroids.iter().enumerate() {
            let distance = euclidean(features, centroid);
            if distance < best.1 {
                best = (index, distance);
            }
        }
        best
    }

    /// Number of fitted clusters.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.centroids.len()
    }
}

fn lloyd_run(data: &[Vec<f32>], k: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut chosen: Vec<usize> = Vec::with_capacity(k);
    while chosen.len() < k {
        let candidate = rng.gen_range(0..data.len());
        if !chosen.contains(&candidate) {
            chosen.push(candidate);
        }
    }
    let mut centroids: Vec<Vec<f32>> = chosen.iter().map(|&index| data[index].clone()).collect();

    for _ in 0..MAX_ITERATIONS {
        let assignments: Vec<usize> = data
            .iter()
            .map(|row| nearest(row, &centroids))
            .collect();
        let mut moved = false;
        for (cluster, centroid) in centroids.iter_mut().enumerate() {
            let members: Vec<&Vec<f32>> = data
                .iter()
                .zip(assignments.iter())
                .filter(|(_, assigned)| **assigned == cluster)
                .map(|(row, _)| row)
                .collect();
            // An emptied cluster keeps its previous centroid.
            if members.is_empty() {
                continue;
            }
            let mut updated = vec![0.0_f32; centroid.len()];
            for member in &members {
                for (slot, value) in updated.iter_mut().zip(member.iter()) {
                    *slot += value;
                }
            }
            for slot in &mut updated {
                *slot /= members.len() as f32;
            }
            if updated != *centroid {
                *centroid = updated;
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }
    centroids
}

fn nearest(row: &[f32], centroids: &[Vec<f32>]) -> usize {
    let mut best = (0, f32::INFINITY);
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = euclidean(row, centroid);
        if distance < best.1 {
            best = (index, distance);
        }
    }
    best.0
}

fn total_inertia(data: &[Vec<f32>], centroids: &[Vec<f32>]) -> f32 {
    data.iter()
        .map(|row| {
            let cluster = nearest(row, centroids);
            let distance = euclidean(row, &centroids[cluster]);
            distance * distance
        })
        .sum()
}

fn euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(left, right)| {
            let diff = left - right;
            diff * diff
        })
        .sum::<f32>()
        .sqrt()
}
