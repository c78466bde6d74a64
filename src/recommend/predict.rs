// Rating prediction: similarity-weighted average over the neighborhood.
//
// For each restaurant the target has not rated:
//
//   score = sum(sim_i * rating_i) / sum(|sim_i|)
//
// over neighbors i who rated it. Restaurants no neighbor rated get no
// score at all (they are left out, not scored 0).

use super::neighbors::Neighbor;
use super::Recommendation;
use crate::error::{RecommendError, Result};
use crate::ratings::UserItemMatrix;

/// Predict scores for every restaurant the target has not rated.
///
/// Output follows the matrix's column order.
pub fn predict(
    matrix: &UserItemMatrix,
    neighbors: &[Neighbor],
    target: &str,
) -> Result<Vec<Recommendation>> {
    let target_row = matrix
        .user_row(target)
        .ok_or_else(|| RecommendError::UnknownUser(target.to_string()))?;

    // Neighbors absent from this matrix contribute nothing
    let neighbor_rows: Vec<(usize, f64)> = neighbors
        .iter()
        .filter_map(|n| matrix.user_row(&n.user_id).map(|row| (row, n.similarity)))
        .collect();

    let mut predictions = Vec::new();
    for (col, restaurant) in matrix.restaurants().iter().enumerate() {
        if matrix.get(target_row, col).is_some() {
            continue;
        }

        let mut weighted_sum = 0.0;
        let mut similarity_sum = 0.0;
        for &(row, similarity) in &neighbor_rows {
            if let Some(rating) = matrix.get(row, col) {
                weighted_sum += similarity * rating;
                similarity_sum += similarity.abs();
            }
        }

        if similarity_sum > 0.0 {
            predictions.push(Recommendation {
                restaurant: restaurant.clone(),
                score: weighted_sum / similarity_sum,
            });
        }
    }

    Ok(predictions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratings::{build_matrix, RatingScale, Review};

    fn matrix() -> UserItemMatrix {
        let reviews = vec![
            Review::new("me", "Deli", 4.0),
            Review::new("n1", "Deli", 4.0),
            Review::new("n1", "Ramen", 5.0),
            Review::new("n2", "Deli", 3.0),
            Review::new("n2", "Ramen", 2.0),
            Review::new("n2", "Tapas", 3.0),
            Review::new("other", "Sushi", 5.0),
        ];
        build_matrix(&reviews, &RatingScale::default()).unwrap()
    }

    fn neighbor(user_id: &str, similarity: f64) -> Neighbor {
        Neighbor {
            user_id: user_id.to_string(),
            similarity,
        }
    }

    #[test]
    fn test_weighted_average() {
        let neighbors = [neighbor("n1", 0.8), neighbor("n2", 0.2)];
        let preds = predict(&matrix(), &neighbors, "me").unwrap();
        let ramen = preds.iter().find(|p| p.restaurant == "Ramen").unwrap();
        // (0.8 * 5 + 0.2 * 2) / (0.8 + 0.2)
        assert!((ramen.score - 4.4).abs() < 1e-12);
        let tapas = preds.iter().find(|p| p.restaurant == "Tapas").unwrap();
        assert!((tapas.score - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rated_restaurants_are_excluded() {
        let neighbors = [neighbor("n1", 0.8), neighbor("n2", 0.2)];
        let preds = predict(&matrix(), &neighbors, "me").unwrap();
        assert!(preds.iter().all(|p| p.restaurant != "Deli"));
    }

    #[test]
    fn test_unrated_by_neighborhood_is_omitted() {
        let neighbors = [neighbor("n1", 0.8)];
        let preds = predict(&matrix(), &neighbors, "me").unwrap();
        let names: Vec<&str> = preds.iter().map(|p| p.restaurant.as_str()).collect();
        assert_eq!(names, ["Ramen"]);
    }

    #[test]
    fn test_empty_neighborhood_predicts_nothing() {
        assert!(predict(&matrix(), &[], "me").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_target() {
        let err = predict(&matrix(), &[], "ghost").unwrap_err();
        assert!(matches!(err, RecommendError::UnknownUser(_)));
    }
}
