// Ranking: order predictions by score and keep the top k.

use super::Recommendation;

/// Sort by score descending and truncate to `k`.
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank(mut predictions: Vec<Recommendation>, k: usize) -> Vec<Recommendation> {
    predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
    predictions.truncate(k);
    predictions
}
