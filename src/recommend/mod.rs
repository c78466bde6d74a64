// Recommendation pipeline: neighbors, prediction, ranking, popularity.
//
// get_recommendations composes the whole collaborative filtering path:
//   rating matrix -> similarity -> neighbors -> predictions -> top k
// get_popularity_recommendations is the similarity-free cold-start path.

pub mod deadline;
pub mod neighbors;
pub mod popularity;
pub mod predict;
pub mod rank;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::RecommendError;
use crate::ratings::{RestaurantStats, Review, UserItemMatrix};
use crate::similarity::compute_similarity;

pub use deadline::{recommend_within, run_with_deadline};
pub use neighbors::{select_neighbors, Neighbor};
pub use popularity::{popularity_rank, DEFAULT_MIN_REVIEWS};
pub use predict::predict;
pub use rank::rank;

/// A restaurant and its predicted (or mean) rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub restaurant: String,
    pub score: f64,
}

/// Neighborhood bounds for collaborative filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborhoodParams {
    /// How many of the most similar users to consider (default 10).
    pub max_neighbors: usize,
    /// Neighbors must be strictly more similar than this (default 0.1).
    pub min_similarity: f64,
}

impl NeighborhoodParams {
    /// Bounds from user configuration. A NaN or infinite threshold would
    /// make every `similarity > min_similarity` comparison false.
    pub fn new(max_neighbors: usize, min_similarity: f64) -> Result<Self, RecommendError> {
        if !min_similarity.is_finite() {
            return Err(RecommendError::invalid(format!(
                "similarity threshold {min_similarity} is not a finite number"
            )));
        }
        Ok(Self {
            max_neighbors,
            min_similarity,
        })
    }
}

impl Default for NeighborhoodParams {
    fn default() -> Self {
        Self {
            max_neighbors: 10,
            min_similarity: 0.1,
        }
    }
}

/// Which ranking to run for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    CollaborativeFiltering,
    PopularityBased,
    /// Currently identical to collaborative filtering.
    Hybrid,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::CollaborativeFiltering => "cf",
            Algorithm::PopularityBased => "popularity",
            Algorithm::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cf" | "collaborative" | "collaborative-filtering" => {
                Ok(Algorithm::CollaborativeFiltering)
            }
            "popularity" | "popular" => Ok(Algorithm::PopularityBased),
            "hybrid" => Ok(Algorithm::Hybrid),
            other => Err(format!(
                "unknown algorithm '{other}' (expected cf, popularity or hybrid)"
            )),
        }
    }
}

/// Everything one recommendation request needs besides the data.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub user_id: String,
    pub k: usize,
    pub algorithm: Algorithm,
    pub neighborhood: NeighborhoodParams,
    pub min_reviews: usize,
}

impl RecommendationRequest {
    pub fn new(user_id: impl Into<String>, k: usize) -> Self {
        Self {
            user_id: user_id.into(),
            k,
            algorithm: Algorithm::CollaborativeFiltering,
            neighborhood: NeighborhoodParams::default(),
            min_reviews: DEFAULT_MIN_REVIEWS,
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// Top-k collaborative filtering recommendations for one user.
///
/// A user missing from the matrix gets an empty list, as does a user with
/// no qualifying neighbors or nothing left to predict.
pub fn get_recommendations(
    target: &str,
    matrix: &UserItemMatrix,
    k: usize,
    params: &NeighborhoodParams,
) -> Vec<Recommendation> {
    if !matrix.contains_user(target) {
        info!(user = target, "User not in rating matrix, no recommendations");
        return Vec::new();
    }

    let similarity = compute_similarity(matrix);
    let result = select_neighbors(&similarity, target, params)
        .and_then(|neighbors| {
            debug!(user = target, neighbors = neighbors.len(), "Neighborhood selected");
            predict(matrix, &neighbors, target)
        })
        .map(|predictions| rank(predictions, k));

    match result {
        Ok(ranked) => {
            info!(user = target, count = ranked.len(), "Recommendations generated");
            ranked
        }
        Err(RecommendError::UnknownUser(_)) => Vec::new(),
        Err(err) => {
            // select_neighbors and predict only fail on unknown users
            debug!(error = %err, "Unexpected pipeline error");
            Vec::new()
        }
    }
}

/// Non-personalized top-k by mean rating.
pub fn get_popularity_recommendations(
    reviews: &[Review],
    min_count: usize,
    k: usize,
) -> Vec<RestaurantStats> {
    let ranked = popularity_rank(reviews, min_count, k);
    info!(min_count, count = ranked.len(), "Popularity ranking generated");
    ranked
}

/// Run a request against a loaded catalog.
pub fn recommend(catalog: &Catalog, request: &RecommendationRequest) -> Vec<Recommendation> {
    match request.algorithm {
        Algorithm::CollaborativeFiltering | Algorithm::Hybrid => get_recommendations(
            &request.user_id,
            catalog.matrix(),
            request.k,
            &request.neighborhood,
        ),
        Algorithm::PopularityBased => {
            get_popularity_recommendations(catalog.reviews(), request.min_reviews, request.k)
                .into_iter()
                .map(|s| Recommendation {
                    restaurant: s.restaurant,
                    score: s.mean_rating,
                })
                .collect()
        }
    }
}
