// Popularity fallback: mean rating with a minimum review count.
//
// No user identity and no similarity involved, so this works for users
// the rating matrix has never seen (cold start).

use crate::ratings::stats::{restaurant_stats, RestaurantStats};
use crate::ratings::Review;

/// Default minimum number of reviews a restaurant needs to be ranked.
pub const DEFAULT_MIN_REVIEWS: usize = 3;

/// Rank restaurants by mean rating, skipping those with fewer than
/// `min_count` reviews. Ties keep restaurant id order.
pub fn popularity_rank(reviews: &[Review], min_count: usize, k: usize) -> Vec<RestaurantStats> {
    let mut ranked: Vec<RestaurantStats> = restaurant_stats(reviews)
        .into_iter()
        .filter(|s| s.review_count >= min_count)
        .collect();
    ranked.sort_by(|a, b| b.mean_rating.total_cmp(&a.mean_rating));
    ranked.truncate(k);
    ranked
}
