// Rating store: review records, the user-item matrix, and descriptive stats.

pub mod matrix;
pub mod review;
pub mod source;
pub mod stats;

pub use matrix::{build_matrix, UserItemMatrix};
pub use review::{RatingScale, Review};
pub use source::{JsonFileSource, ReviewSource};
pub use stats::{DatasetSummary, RestaurantStats};
