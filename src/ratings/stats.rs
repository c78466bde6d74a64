// Descriptive queries over the raw review collection.
//
// These never touch the rating matrix. They back the dataset summary,
// restaurant detail lines and review history the CLI prints.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::review::Review;

/// Headline numbers for a review collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub users: usize,
    pub restaurants: usize,
    pub reviews: usize,
    /// Mean of every rating, 0.0 for an empty collection.
    pub mean_rating: f64,
}

/// Mean rating and review count for one restaurant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantStats {
    pub restaurant: String,
    pub mean_rating: f64,
    pub review_count: usize,
}

pub fn summarize(reviews: &[Review]) -> DatasetSummary {
    let users: BTreeSet<&str> = reviews.iter().map(|r| r.user_id.as_str()).collect();
    let restaurants: BTreeSet<&str> = reviews.iter().map(|r| r.restaurant.as_str()).collect();
    let mean_rating = if reviews.is_empty() {
        0.0
    } else {
        reviews.iter().map(|r| r.rating).sum::<f64>() / reviews.len() as f64
    };

    DatasetSummary {
        users: users.len(),
        restaurants: restaurants.len(),
        reviews: reviews.len(),
        mean_rating,
    }
}

/// Per-restaurant mean and count, ordered by restaurant id.
pub fn restaurant_stats(reviews: &[Review]) -> Vec<RestaurantStats> {
    let mut grouped: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for review in reviews {
        let entry = grouped.entry(review.restaurant.as_str()).or_insert((0.0, 0));
        entry.0 += review.rating;
        entry.1 += 1;
    }

    grouped
        .into_iter()
        .map(|(restaurant, (sum, count))| RestaurantStats {
            restaurant: restaurant.to_string(),
            mean_rating: sum / count as f64,
            review_count: count,
        })
        .collect()
}

/// Stats for a single restaurant, `None` if nobody reviewed it.
pub fn restaurant_stat(reviews: &[Review], restaurant: &str) -> Option<RestaurantStats> {
    let (sum, count) = reviews
        .iter()
        .filter(|r| r.restaurant == restaurant)
        .fold((0.0, 0usize), |(sum, count), r| (sum + r.rating, count + 1));

    (count > 0).then(|| RestaurantStats {
        restaurant: restaurant.to_string(),
        mean_rating: sum / count as f64,
        review_count: count,
    })
}

/// Restaurants by review count, most reviewed first.
///
/// Ties keep restaurant id order.
pub fn most_reviewed(reviews: &[Review], limit: usize) -> Vec<RestaurantStats> {
    let mut stats = restaurant_stats(reviews);
    stats.sort_by(|a, b| b.review_count.cmp(&a.review_count));
    stats.truncate(limit);
    stats
}

/// A user's reviews in ingestion order, at most `limit` of them.
pub fn user_history<'a>(reviews: &'a [Review], user_id: &str, limit: Option<usize>) -> Vec<&'a Review> {
    reviews
        .iter()
        .filter(|r| r.user_id == user_id)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Distinct user ids in first-seen order.
pub fn users(reviews: &[Review]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    reviews
        .iter()
        .map(|r| r.user_id.as_str())
        .filter(|id| seen.insert(*id))
        .collect()
}
