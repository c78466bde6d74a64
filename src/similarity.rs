// User-user cosine similarity over the rating matrix.
//
//   sim(u, v) = dot(u, v) / (|u| * |v|)
//
// Rows are read zero-filled (an unrated cell contributes 0) and are not
// mean-centered. A zero-norm row has similarity 0 with everyone. The full
// matrix is recomputed on every request: O(n^2 * m) for n users and m
// restaurants.

use std::collections::HashMap;

use tracing::debug;

use crate::ratings::UserItemMatrix;

/// Cosine similarity of two equal-length vectors.
///
/// Returns 0.0 for a zero-magnitude side or mismatched lengths. The result
/// is clamped to [-1.0, 1.0].
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let norm_a = magnitude(a);
    let norm_b = magnitude(b);
    cosine_with_norms(a, b, norm_a, norm_b)
}

/// L2 norm.
pub fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn cosine_with_norms(a: &[f64], b: &[f64], norm_a: f64, norm_b: f64) -> f64 {
    let denom = norm_a * norm_b;
    if denom == 0.0 {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let sim = dot / denom;
    if !sim.is_finite() {
        return 0.0;
    }
    sim.clamp(-1.0, 1.0)
}

/// Square, symmetric user x user similarity table.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    users: Vec<String>,
    index: HashMap<String, usize>,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// User ids in row order (same order as the rating matrix).
    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn position(&self, user_id: &str) -> Option<usize> {
        self.index.get(user_id).copied()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.users.len() + j]
    }

    /// Similarity between two users by id.
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.get(self.position(a)?, self.position(b)?))
    }

    /// One user's full row, self-entry included.
    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.users.len();
        &self.values[i * n..(i + 1) * n]
    }
}

/// Compute cosine similarity for every pair of users.
///
/// The diagonal is 1 for every user, including zero-norm rows.
pub fn compute_similarity(matrix: &UserItemMatrix) -> SimilarityMatrix {
    let n = matrix.user_count();

    let rows: Vec<Vec<f64>> = (0..n)
        .map(|u| matrix.row(u).iter().map(|c| c.unwrap_or(0.0)).collect())
        .collect();
    let norms: Vec<f64> = rows.iter().map(|r| magnitude(r)).collect();

    let mut values = vec![0.0; n * n];
    let mut degenerate = 0usize;
    for i in 0..n {
        values[i * n + i] = 1.0;
        if norms[i] == 0.0 {
            degenerate += 1;
        }
        for j in (i + 1)..n {
            let sim = cosine_with_norms(&rows[i], &rows[j], norms[i], norms[j]);
            values[i * n + j] = sim;
            values[j * n + i] = sim;
        }
    }

    debug!(users = n, zero_norm_rows = degenerate, "Similarity matrix computed");

    let users = matrix.users().to_vec();
    let index = users
        .iter()
        .enumerate()
        .map(|(i, u)| (u.clone(), i))
        .collect();

    SimilarityMatrix {
        users,
        index,
        values,
    }
}
