//! Comparing a labeling against a reference labeling.
//!
//! Cluster ids are arbitrary, so two labelings of the same partition can differ
//! id-for-id. Both scores here are invariant to relabeling:
//!
//! - **Adjusted Rand index** (Hubert & Arabie, 1985): pair-counting agreement,
//!   corrected for chance. 1.0 means identical partitions.
//! - **Remapped accuracy**: each predicted cluster is mapped to the reference
//!   label it overlaps most, then points are compared one by one. Noise always
//!   maps to noise.

use std::collections::{HashMap, HashSet};

use super::label::NOISE;
use crate::error::{Error, Result};

/// Agreement between a predicted and a reference labeling.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelComparison {
    /// Adjusted Rand index, 1.0 for identical partitions.
    pub adjusted_rand: f64,
    /// Fraction of points whose remapped prediction matches the reference.
    pub remapped_accuracy: f64,
    /// Indices whose remapped prediction differs from the reference.
    pub mismatches: Vec<usize>,
    /// Distinct cluster ids in the prediction, noise excluded.
    pub predicted_clusters: usize,
    /// Distinct cluster ids in the reference, noise excluded.
    pub truth_clusters: usize,
    /// Noise points in the prediction.
    pub predicted_noise: usize,
    /// Noise points in the reference.
    pub truth_noise: usize,
}

impl LabelComparison {
    /// Same partition: no mismatched points and the same number of clusters.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty() && self.predicted_clusters == self.truth_clusters
    }
}

/// Number of distinct non-noise labels.
pub fn count_clusters(labels: &[i32]) -> usize {
    labels
        .iter()
        .filter(|&&l| l != NOISE)
        .collect::<HashSet<_>>()
        .len()
}

pub fn count_noise(labels: &[i32]) -> usize {
    labels.iter().filter(|&&l| l == NOISE).count()
}

/// Dense ids for the distinct labels, in order of first appearance.
fn dense_ids(labels: &[i32]) -> (Vec<usize>, Vec<i32>) {
    let mut to_dense: HashMap<i32, usize> = HashMap::new();
    let mut values = Vec::new();
    let ids = labels
        .iter()
        .map(|&label| {
            *to_dense.entry(label).or_insert_with(|| {
                values.push(label);
                values.len() - 1
            })
        })
        .collect();
    (ids, values)
}

#[inline]
fn pairs(n: u64) -> f64 {
    if n < 2 {
        0.0
    } else {
        n as f64 * (n - 1) as f64 / 2.0
    }
}

/// Compare `predicted` against `truth` (both in the flat `i32` encoding).
pub fn evaluate(predicted: &[i32], truth: &[i32]) -> Result<LabelComparison> {
    if predicted.len() != truth.len() {
        return Err(Error::LengthMismatch {
            predicted: predicted.len(),
            truth: truth.len(),
        });
    }

    let (pred_ids, pred_values) = dense_ids(predicted);
    let (truth_ids, truth_values) = dense_ids(truth);

    // Sparse contingency table: (predicted, truth) -> shared points.
    let mut table: HashMap<(usize, usize), u64> = HashMap::new();
    let mut pred_counts = vec![0u64; pred_values.len()];
    let mut truth_counts = vec![0u64; truth_values.len()];
    for (&p, &t) in pred_ids.iter().zip(&truth_ids) {
        *table.entry((p, t)).or_insert(0) += 1;
        pred_counts[p] += 1;
        truth_counts[t] += 1;
    }

    let index: f64 = table.values().map(|&c| pairs(c)).sum();
    let pred_pairs: f64 = pred_counts.iter().map(|&c| pairs(c)).sum();
    let truth_pairs: f64 = truth_counts.iter().map(|&c| pairs(c)).sum();
    let total = pairs(predicted.len() as u64);
    let expected = if total > 0.0 {
        pred_pairs * truth_pairs / total
    } else {
        0.0
    };
    let denominator = 0.5 * (pred_pairs + truth_pairs) - expected;
    let adjusted_rand = if denominator == 0.0 {
        1.0
    } else {
        (index - expected) / denominator
    };

    // Majority truth label per predicted label; ties go to the earlier truth label.
    let mut best: Vec<Option<(u64, usize)>> = vec![None; pred_values.len()];
    for (&(p, t), &count) in &table {
        let better = match best[p] {
            None => true,
            Some((c, col)) => count > c || (count == c && t < col),
        };
        if better {
            best[p] = Some((count, t));
        }
    }
    let remap: Vec<i32> = pred_values
        .iter()
        .zip(&best)
        .map(|(&label, top)| match top {
            _ if label == NOISE => NOISE,
            Some((_, col)) => truth_values[*col],
            None => label,
        })
        .collect();

    let mismatches: Vec<usize> = pred_ids
        .iter()
        .zip(truth)
        .enumerate()
        .filter(|(_, (p, t))| remap[**p] != **t)
        .map(|(idx, _)| idx)
        .collect();

    let remapped_accuracy = if truth.is_empty() {
        1.0
    } else {
        (truth.len() - mismatches.len()) as f64 / truth.len() as f64
    };

    Ok(LabelComparison {
        adjusted_rand,
        remapped_accuracy,
        mismatches,
        predicted_clusters: count_clusters(predicted),
        truth_clusters: count_clusters(truth),
        predicted_noise: count_noise(predicted),
        truth_noise: count_noise(truth),
    })
}
