use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::ratings::RatingScale;
use crate::recommend::{NeighborhoodParams, DEFAULT_MIN_REVIEWS};

/// Where reviews are loaded from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceBackend {
    /// JSON array or JSON Lines file (default)
    Json,
    /// SQLite database populated by `savor import`
    Sqlite,
}

impl FromStr for SourceBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(SourceBackend::Json),
            "sqlite" => Ok(SourceBackend::Sqlite),
            other => anyhow::bail!("unknown source '{other}' (expected json or sqlite)"),
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// value has a default, so an empty environment is a valid configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_backend: SourceBackend,
    /// JSON / JSON Lines review export
    pub reviews_path: PathBuf,
    /// SQLite review database
    pub db_path: String,
    /// Number of recommendations when --top-k is not given
    pub top_k: usize,
    /// Reviews a restaurant needs before the popularity ranking considers it
    pub min_reviews: usize,
    pub neighborhood: NeighborhoodParams,
    pub rating_scale: RatingScale,
    /// Deadline for a single recommendation request in the CLI
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Unset means JSON; anything set must name a known backend
        let source_backend = match env::var("SAVOR_SOURCE") {
            Ok(raw) => raw
                .parse::<SourceBackend>()
                .context("SAVOR_SOURCE has an invalid value")?,
            Err(_) => SourceBackend::Json,
        };

        let reviews_path = env::var("SAVOR_REVIEWS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_reviews_path());

        let defaults = NeighborhoodParams::default();
        let neighborhood = NeighborhoodParams::new(
            parse_var("SAVOR_MAX_NEIGHBORS", defaults.max_neighbors)?,
            parse_var("SAVOR_MIN_SIMILARITY", defaults.min_similarity)?,
        )
        .context("SAVOR_MIN_SIMILARITY must be a finite number")?;

        let scale_defaults = RatingScale::default();
        let rating_scale = RatingScale::new(
            parse_var("SAVOR_RATING_MIN", scale_defaults.min)?,
            parse_var("SAVOR_RATING_MAX", scale_defaults.max)?,
        )
        .context("SAVOR_RATING_MIN / SAVOR_RATING_MAX do not form a valid scale")?;

        Ok(Self {
            source_backend,
            reviews_path,
            db_path: env::var("SAVOR_DB_PATH").unwrap_or_else(|_| "./savor.db".to_string()),
            top_k: parse_var("SAVOR_TOP_K", 5)?,
            min_reviews: parse_var("SAVOR_MIN_REVIEWS", DEFAULT_MIN_REVIEWS)?,
            neighborhood,
            rating_scale,
            timeout: Duration::from_secs(parse_var("SAVOR_TIMEOUT_SECS", 30)?),
        })
    }

    /// Human-readable location of the configured source.
    pub fn source_display(&self) -> String {
        match self.source_backend {
            SourceBackend::Json => self.reviews_path.display().to_string(),
            SourceBackend::Sqlite => self.db_path.clone(),
        }
    }

    /// Check that the configured review file exists.
    /// Call this before anything that loads reviews.
    ///
    /// The SQLite backend is checked when it is opened, by `db::open`.
    pub fn require_source(&self) -> Result<()> {
        if self.source_backend == SourceBackend::Json && !self.reviews_path.exists() {
            anyhow::bail!(
                "Reviews file not found at {}\n\
                 Set SAVOR_REVIEWS_PATH in your .env file to a JSON or JSON Lines export.",
                self.reviews_path.display()
            );
        }
        Ok(())
    }
}

/// Default reviews file: `<platform data dir>/savor/reviews.json`.
pub fn default_reviews_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("savor")
        .join("reviews.json")
}

/// Read and parse an env var, falling back to `default` when unset.
fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}
