// Savor: restaurant recommendations from star ratings
//
// This is the library root. The engine is a stateless pipeline:
//   ratings (review store + matrix) -> similarity -> recommend
// Everything else (config, sources, terminal output) feeds or displays it.

pub mod catalog;
pub mod config;
pub mod error;
pub mod output;
pub mod ratings;
pub mod recommend;
pub mod similarity;
pub mod status;

#[cfg(feature = "sqlite")]
pub mod db;

pub use catalog::Catalog;
pub use error::RecommendError;
pub use recommend::{
    get_popularity_recommendations, get_recommendations, recommend, recommend_within, Algorithm,
    NeighborhoodParams, Recommendation, RecommendationRequest,
};

use anyhow::Result;

use config::{Config, SourceBackend};
use ratings::{JsonFileSource, ReviewSource};

/// Build the review source the configuration points at.
pub fn open_source(config: &Config) -> Result<Box<dyn ReviewSource>> {
    match config.source_backend {
        SourceBackend::Json => Ok(Box::new(JsonFileSource::new(&config.reviews_path))),
        #[cfg(feature = "sqlite")]
        SourceBackend::Sqlite => Ok(Box::new(db::SqliteReviewSource::open(&config.db_path)?)),
        #[cfg(not(feature = "sqlite"))]
        SourceBackend::Sqlite => anyhow::bail!(
            "SAVOR_SOURCE=sqlite requires building with the `sqlite` feature"
        ),
    }
}
