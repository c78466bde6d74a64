// Catalog: one loaded snapshot of reviews and the matrix derived from them.
//
// Callers load once and share the catalog behind an `Arc`. Reloading builds
// a new catalog instead of mutating the old one, so a request in flight
// always sees a single consistent snapshot.

use anyhow::{Context, Result};
use tracing::info;

use crate::error::RecommendError;
use crate::ratings::{build_matrix, RatingScale, Review, ReviewSource, UserItemMatrix};

#[derive(Debug, Clone)]
pub struct Catalog {
    reviews: Vec<Review>,
    matrix: UserItemMatrix,
}

impl Catalog {
    /// Validate the reviews and derive the rating matrix.
    pub fn from_reviews(reviews: Vec<Review>, scale: &RatingScale) -> Result<Self, RecommendError> {
        let matrix = build_matrix(&reviews, scale)?;
        Ok(Self { reviews, matrix })
    }

    /// Read every review from `source` and build the catalog.
    pub fn load(source: &dyn ReviewSource, scale: &RatingScale) -> Result<Self> {
        let reviews = source.load_reviews()?;
        let catalog = Self::from_reviews(reviews, scale)
            .with_context(|| format!("Invalid review data in {}", source.describe()))?;
        info!(
            users = catalog.matrix.user_count(),
            restaurants = catalog.matrix.restaurant_count(),
            reviews = catalog.reviews.len(),
            "Catalog ready"
        );
        Ok(catalog)
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn matrix(&self) -> &UserItemMatrix {
        &self.matrix
    }
}
