// Colored terminal output for recommendation lists and dataset views.
//
// This module handles all terminal-specific formatting. main.rs gathers
// the data through the library and delegates display here.

use colored::Colorize;

use super::{stars, truncate_chars};
use crate::ratings::stats::restaurant_stat;
use crate::ratings::{DatasetSummary, RatingScale, RestaurantStats, Review};
use crate::recommend::{Algorithm, Recommendation};

const NAME_WIDTH: usize = 40;

/// Display a ranked recommendation list for a user.
///
/// Each entry is followed by the restaurant's overall mean and review count.
pub fn display_recommendations(
    user_id: &str,
    algorithm: Algorithm,
    recommendations: &[Recommendation],
    reviews: &[Review],
    scale: &RatingScale,
) {
    if recommendations.is_empty() {
        println!(
            "{}",
            format!("No recommendations found for user {user_id}.").yellow()
        );
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Top {} recommendations for {} ({}) ===",
            recommendations.len(),
            user_id,
            algorithm
        )
        .bold()
    );
    println!();

    let label = match algorithm {
        Algorithm::PopularityBased => "Mean rating",
        _ => "Predicted rating",
    };

    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "  {:>3}. {}",
            i + 1,
            truncate_chars(&rec.restaurant, NAME_WIDTH).bold()
        );
        println!("       {label}: {}", colorize_score(rec.score, scale));
        if let Some(stat) = restaurant_stat(reviews, &rec.restaurant) {
            println!(
                "       {}",
                format!(
                    "Average rating: {:.2} | Reviews: {}",
                    stat.mean_rating, stat.review_count
                )
                .dimmed()
            );
        }
    }
    println!();
}

/// Display a popularity ranking.
pub fn display_top_rated(ranked: &[RestaurantStats], min_reviews: usize) {
    println!(
        "\n{}",
        format!("=== Top Rated Restaurants (min {min_reviews} reviews) ===").bold()
    );
    if ranked.is_empty() {
        println!("  No restaurant has {min_reviews} or more reviews yet.");
        return;
    }
    for (i, stat) in ranked.iter().enumerate() {
        println!(
            "  {:>3}. {:<width$} {} ({} reviews)",
            i + 1,
            truncate_chars(&stat.restaurant, NAME_WIDTH),
            stars(stat.mean_rating),
            stat.review_count,
            width = NAME_WIDTH + 3,
        );
    }
}

/// Display restaurants ordered by review count.
pub fn display_most_reviewed(ranked: &[RestaurantStats]) {
    println!("\n{}", "=== Most Reviewed Restaurants ===".bold());
    for (i, stat) in ranked.iter().enumerate() {
        println!(
            "  {:>3}. {:<width$} {} reviews ({})",
            i + 1,
            truncate_chars(&stat.restaurant, NAME_WIDTH),
            stat.review_count,
            stars(stat.mean_rating),
            width = NAME_WIDTH + 3,
        );
    }
}

/// Display headline dataset numbers.
pub fn display_summary(summary: &DatasetSummary) {
    println!("\n{}", "=== Dataset Info ===".bold());
    println!("  Total users:       {}", summary.users);
    println!("  Total restaurants: {}", summary.restaurants);
    println!("  Total reviews:     {}", summary.reviews);
    println!("  Avg rating:        {:.2}", summary.mean_rating);
}

/// Display a user's previous reviews.
pub fn display_history(user_id: &str, history: &[&Review]) {
    if history.is_empty() {
        println!("No reviews found for user {user_id}.");
        return;
    }
    println!(
        "\n{}",
        format!("=== Previous reviews by {user_id} ===").bold()
    );
    for review in history {
        println!(
            "  {}: {}",
            truncate_chars(&review.restaurant, NAME_WIDTH).bold(),
            stars(review.rating)
        );
    }
}

/// Display a list of user ids.
pub fn display_users(users: &[&str], total: usize) {
    println!("\n{}", format!("=== Users ({total}) ===").bold());
    for user in users {
        println!("  {user}");
    }
    if users.len() < total {
        println!("  {}", format!("... and {} more", total - users.len()).dimmed());
    }
}

/// Where a score sits on the configured rating scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScoreBand {
    High,
    Middle,
    Low,
}

/// Top quarter of the scale is high, the half point and up is middle.
/// On the default 1 to 5 scale that puts the cuts at 4.0 and 3.0.
fn score_band(score: f64, scale: &RatingScale) -> ScoreBand {
    let span = scale.max - scale.min;
    if span <= 0.0 {
        return ScoreBand::High;
    }
    match (score - scale.min) / span {
        f if f >= 0.75 => ScoreBand::High,
        f if f >= 0.5 => ScoreBand::Middle,
        _ => ScoreBand::Low,
    }
}

fn colorize_score(score: f64, scale: &RatingScale) -> colored::ColoredString {
    let text = format!("{score:.2}");
    match score_band(score, scale) {
        ScoreBand::High => text.green().bold(),
        ScoreBand::Middle => text.yellow(),
        ScoreBand::Low => text.red(),
    }
}
