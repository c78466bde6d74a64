use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use savor::config::Config;
use savor::output::terminal;
use savor::ratings::stats;
use savor::{Algorithm, Catalog, RecommendError, RecommendationRequest};

/// Savor: restaurant recommendations from star ratings.
///
/// Finds users whose ratings look like yours and predicts how you'd rate
/// the places they liked and you haven't tried.
#[derive(Parser)]
#[command(name = "savor", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend restaurants for a user
    Recommend {
        /// The user id to recommend for
        user: String,

        /// Number of recommendations (default: SAVOR_TOP_K or 5)
        #[arg(long)]
        top_k: Option<usize>,

        /// cf, popularity, or hybrid
        #[arg(long, default_value = "cf")]
        algorithm: Algorithm,
    },

    /// Rank restaurants by mean rating (works for new users)
    Popular {
        /// Number of restaurants to show (default: 10)
        #[arg(long, default_value = "10")]
        top_k: usize,

        /// Minimum reviews a restaurant needs (default: SAVOR_MIN_REVIEWS or 3)
        #[arg(long)]
        min_reviews: Option<usize>,
    },

    /// Show dataset info, top rated and most reviewed restaurants
    Stats {
        /// Entries per list (default: 10)
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show a user's previous reviews
    History {
        /// The user id
        user: String,

        /// Max reviews to show (default: 5)
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// List user ids in the dataset
    Users {
        /// Max users to list (default: 20)
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Import a JSON / JSON Lines review export into the SQLite database
    #[cfg(feature = "sqlite")]
    Import {
        /// Path to the review export
        path: std::path::PathBuf,

        /// Delete existing reviews before importing
        #[arg(long)]
        replace: bool,
    },

    /// Show configuration and source status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("savor=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Recommend {
            user,
            top_k,
            algorithm,
        } => {
            let catalog = Arc::new(load_catalog(&config)?);
            let request = RecommendationRequest {
                user_id: user.clone(),
                k: top_k.unwrap_or(config.top_k),
                algorithm,
                neighborhood: config.neighborhood,
                min_reviews: config.min_reviews,
            };
            if algorithm == Algorithm::Hybrid {
                info!("Hybrid currently runs collaborative filtering");
            }

            let pb = spinner("Finding similar users...")?;
            let outcome =
                savor::recommend_within(Arc::clone(&catalog), request, config.timeout).await;
            pb.finish_and_clear();

            let recommendations = match outcome {
                Ok(recommendations) => recommendations,
                Err(err) if matches!(err.downcast_ref::<RecommendError>(), Some(RecommendError::TimedOut(_))) => {
                    anyhow::bail!(
                        "Recommendation timed out after {}s. Raise SAVOR_TIMEOUT_SECS for large datasets.",
                        config.timeout.as_secs()
                    )
                }
                Err(err) => return Err(err.context("Recommendation failed")),
            };

            terminal::display_recommendations(
                &user,
                algorithm,
                &recommendations,
                catalog.reviews(),
                &config.rating_scale,
            );

            let history = stats::user_history(catalog.reviews(), &user, Some(5));
            if history.is_empty() {
                println!(
                    "{}",
                    "Tip: new users can try `savor popular` for a non-personalized list.".dimmed()
                );
            } else {
                terminal::display_history(&user, &history);
            }
        }

        Commands::Popular { top_k, min_reviews } => {
            let catalog = load_catalog(&config)?;
            let min_reviews = min_reviews.unwrap_or(config.min_reviews);
            let ranked =
                savor::get_popularity_recommendations(catalog.reviews(), min_reviews, top_k);
            terminal::display_top_rated(&ranked, min_reviews);
        }

        Commands::Stats { limit } => {
            let catalog = load_catalog(&config)?;
            let reviews = catalog.reviews();
            terminal::display_summary(&stats::summarize(reviews));
            terminal::display_top_rated(
                &savor::get_popularity_recommendations(reviews, config.min_reviews, limit),
                config.min_reviews,
            );
            terminal::display_most_reviewed(&stats::most_reviewed(reviews, limit));
        }

        Commands::History { user, limit } => {
            let catalog = load_catalog(&config)?;
            let history = stats::user_history(catalog.reviews(), &user, Some(limit));
            terminal::display_history(&user, &history);
        }

        Commands::Users { limit } => {
            let catalog = load_catalog(&config)?;
            let users = stats::users(catalog.reviews());
            let shown: Vec<&str> = users.iter().take(limit).copied().collect();
            terminal::display_users(&shown, users.len());
        }

        #[cfg(feature = "sqlite")]
        Commands::Import { path, replace } => {
            use savor::ratings::{JsonFileSource, ReviewSource};

            let reviews = JsonFileSource::new(&path).load_reviews()?;
            for review in &reviews {
                config
                    .rating_scale
                    .validate(review)
                    .with_context(|| format!("Refusing to import {}", path.display()))?;
            }

            let mut conn = savor::db::initialize(&config.db_path)?;
            if replace {
                let deleted = savor::db::queries::clear_reviews(&conn)?;
                info!(deleted, "Existing reviews removed");
            }
            let inserted = savor::db::queries::insert_reviews(&mut conn, &reviews)?;
            let total = savor::db::queries::review_count(&conn)?;
            println!("Imported {inserted} reviews into {}", config.db_path);
            println!("Database now holds {total} reviews.");
            println!("\nSet SAVOR_SOURCE=sqlite to recommend from it.");
        }

        Commands::Status => {
            savor::status::show(&config)?;
        }
    }

    Ok(())
}

/// Check the configured source and load a catalog snapshot from it.
fn load_catalog(config: &Config) -> Result<Catalog> {
    config.require_source()?;
    let source = savor::open_source(config)?;
    Catalog::load(source.as_ref(), &config.rating_scale)
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("  {spinner} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
