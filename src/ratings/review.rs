// Review records and the rating scale they are validated against.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{RecommendError, Result};

/// One observed rating event.
///
/// Field names on the wire follow the scraped review dataset
/// (`reviewerId`, `title`, `stars`). Some exports store `reviewerId` as a
/// number; it is read as its decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "reviewerId", deserialize_with = "string_or_integer")]
    pub user_id: String,
    #[serde(rename = "title")]
    pub restaurant: String,
    #[serde(rename = "stars")]
    pub rating: f64,
}

impl Review {
    pub fn new(user_id: impl Into<String>, restaurant: impl Into<String>, rating: f64) -> Self {
        Self {
            user_id: user_id.into(),
            restaurant: restaurant.into(),
            rating,
        }
    }
}

/// Accept an identifier written either as a JSON string or an integer.
fn string_or_integer<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

/// Inclusive bounds for a valid rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingScale {
    pub min: f64,
    pub max: f64,
}

impl Default for RatingScale {
    /// Five-star scale.
    fn default() -> Self {
        Self { min: 1.0, max: 5.0 }
    }
}

impl RatingScale {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(RecommendError::invalid(format!(
                "rating scale [{min}, {max}] is not a valid range"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, rating: f64) -> bool {
        rating.is_finite() && rating >= self.min && rating <= self.max
    }

    /// Check a single review: both identifiers present, rating on the scale.
    pub fn validate(&self, review: &Review) -> Result<()> {
        if review.user_id.trim().is_empty() {
            return Err(RecommendError::invalid(format!(
                "review of '{}' has an empty user id",
                review.restaurant
            )));
        }
        if review.restaurant.trim().is_empty() {
            return Err(RecommendError::invalid(format!(
                "review by '{}' has an empty restaurant id",
                review.user_id
            )));
        }
        if !self.contains(review.rating) {
            return Err(RecommendError::invalid(format!(
                "rating {} by '{}' for '{}' is outside [{}, {}]",
                review.rating, review.user_id, review.restaurant, self.min, self.max
            )));
        }
        Ok(())
    }
}
