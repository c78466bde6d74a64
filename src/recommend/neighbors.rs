// Neighbor selection: the bounded, thresholded set of similar users.
//
// Order matters: the top `max_neighbors` are taken first and only then
// filtered by `min_similarity`. A neighborhood can therefore come back
// smaller than the cap even when more users clear the threshold overall.

use serde::Serialize;

use super::NeighborhoodParams;
use crate::error::{RecommendError, Result};
use crate::similarity::SimilarityMatrix;

/// Another user and how similar they are to the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub user_id: String,
    pub similarity: f64,
}

/// Pick the target user's neighborhood from the similarity matrix.
///
/// Ties in similarity keep matrix row order. An empty neighborhood is a
/// valid result.
pub fn select_neighbors(
    similarity: &SimilarityMatrix,
    target: &str,
    params: &NeighborhoodParams,
) -> Result<Vec<Neighbor>> {
    let row = similarity
        .position(target)
        .ok_or_else(|| RecommendError::UnknownUser(target.to_string()))?;

    let mut candidates: Vec<(usize, f64)> = similarity
        .row(row)
        .iter()
        .copied()
        .enumerate()
        .filter(|&(other, _)| other != row)
        .collect();

    // Stable sort keeps row order for equal similarities
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.truncate(params.max_neighbors);

    let users = similarity.users();
    Ok(candidates
        .into_iter()
        .filter(|&(_, sim)| sim > params.min_similarity)
        .map(|(other, sim)| Neighbor {
            user_id: users[other].clone(),
            similarity: sim,
        })
        .collect())
}
