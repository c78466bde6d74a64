// Composition tests: the full path a caller takes:
//   review file -> JsonFileSource -> Catalog -> recommend / stats
// Files are written to a tempdir; nothing touches the network.

use std::fs;
use std::sync::Arc;

use savor::ratings::stats::{most_reviewed, summarize, user_history};
use savor::ratings::{JsonFileSource, RatingScale, ReviewSource};
use savor::{recommend, Algorithm, Catalog, RecommendError, RecommendationRequest};

const REVIEWS_JSON: &str = r#"[
    {"reviewerId": "ana",  "title": "Café Olé",      "stars": 5},
    {"reviewerId": "ana",  "title": "Noodle Bar",    "stars": 4},
    {"reviewerId": "ben",  "title": "Café Olé",      "stars": 5},
    {"reviewerId": "ben",  "title": "Noodle Bar",    "stars": 4},
    {"reviewerId": "ben",  "title": "Pizza Palace",  "stars": 4.5},
    {"reviewerId": "cruz", "title": "Café Olé",      "stars": 4},
    {"reviewerId": "cruz", "title": "Pizza Palace",  "stars": 2},
    {"reviewerId": "cruz", "title": "Taco Truck",    "stars": 5},
    {"reviewerId": "dee",  "title": "Taco Truck",    "stars": 3}
]"#;

fn write_temp(name: &str, contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn json_file_to_recommendations() {
    let (_dir, path) = write_temp("reviews.json", REVIEWS_JSON);
    let source = JsonFileSource::new(&path);
    let catalog = Catalog::load(&source, &RatingScale::default()).unwrap();

    let recs = recommend(&catalog, &RecommendationRequest::new("ana", 5));
    let names: Vec<&str> = recs.iter().map(|r| r.restaurant.as_str()).collect();
    assert!(names.contains(&"Pizza Palace"));
    assert!(!names.contains(&"Café Olé"));
    assert!(!names.contains(&"Noodle Bar"));
}

#[test]
fn json_lines_source_matches_json_array() {
    let reviews: Vec<serde_json::Value> = serde_json::from_str(REVIEWS_JSON).unwrap();
    let lines: Vec<String> = reviews.iter().map(|r| r.to_string()).collect();
    let (_dir, path) = write_temp("reviews.jsonl", &lines.join("\n"));
    let (_dir2, array_path) = write_temp("reviews.json", REVIEWS_JSON);

    let from_lines = JsonFileSource::new(&path).load_reviews().unwrap();
    let from_array = JsonFileSource::new(&array_path).load_reviews().unwrap();
    assert_eq!(from_lines, from_array);
}

#[test]
fn stats_from_loaded_catalog() {
    let (_dir, path) = write_temp("reviews.json", REVIEWS_JSON);
    let catalog = Catalog::load(&JsonFileSource::new(&path), &RatingScale::default()).unwrap();

    let summary = summarize(catalog.reviews());
    assert_eq!(summary.users, 4);
    assert_eq!(summary.restaurants, 4);
    assert_eq!(summary.reviews, 9);

    let top = most_reviewed(catalog.reviews(), 1);
    assert_eq!(top[0].restaurant, "Café Olé");
    assert_eq!(top[0].review_count, 3);

    let history = user_history(catalog.reviews(), "cruz", Some(2));
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].restaurant, "Café Olé");
}

#[test]
fn popularity_for_a_user_with_no_history() {
    let (_dir, path) = write_temp("reviews.json", REVIEWS_JSON);
    let catalog = Catalog::load(&JsonFileSource::new(&path), &RatingScale::default()).unwrap();

    let cf = recommend(&catalog, &RecommendationRequest::new("newcomer", 3));
    assert!(cf.is_empty());

    let popular = recommend(
        &catalog,
        &RecommendationRequest::new("newcomer", 3).with_algorithm(Algorithm::PopularityBased),
    );
    // Only Café Olé has 3 reviews
    assert_eq!(popular.len(), 1);
    assert_eq!(popular[0].restaurant, "Café Olé");
}

#[test]
fn out_of_scale_file_is_rejected() {
    let (_dir, path) = write_temp(
        "reviews.json",
        r#"[{"reviewerId": "x", "title": "Diner", "stars": 9}]"#,
    );
    let err = Catalog::load(&JsonFileSource::new(&path), &RatingScale::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RecommendError>(),
        Some(RecommendError::InvalidInput(_))
    ));
}

#[test]
fn ten_point_scale_accepts_what_five_star_rejects() {
    let (_dir, path) = write_temp(
        "reviews.json",
        r#"[{"reviewerId": "x", "title": "Diner", "stars": 9}]"#,
    );
    let scale = RatingScale::new(1.0, 10.0).unwrap();
    let catalog = Catalog::load(&JsonFileSource::new(&path), &scale).unwrap();
    assert_eq!(catalog.matrix().rating("x", "Diner"), Some(9.0));
}

#[test]
fn shared_snapshot_across_threads() {
    let (_dir, path) = write_temp("reviews.json", REVIEWS_JSON);
    let catalog =
        Arc::new(Catalog::load(&JsonFileSource::new(&path), &RatingScale::default()).unwrap());
    let expected = recommend(&catalog, &RecommendationRequest::new("ana", 5));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            std::thread::spawn(move || recommend(&catalog, &RecommendationRequest::new("ana", 5)))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn numeric_reviewer_ids_load_and_match_string_ids() {
    let (_dir, path) = write_temp(
        "reviews.jsonl",
        r#"{"reviewerId": 101, "title": "Diner", "stars": 5}
{"reviewerId": 202, "title": "Diner", "stars": 5}
{"reviewerId": "202", "title": "Ramen Shop", "stars": 4}
"#,
    );
    let catalog = Catalog::load(&JsonFileSource::new(&path), &RatingScale::default()).unwrap();
    assert_eq!(catalog.matrix().user_count(), 2);

    let recs = recommend(&catalog, &RecommendationRequest::new("101", 5));
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].restaurant, "Ramen Shop");
}
