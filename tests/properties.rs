// Property tests for the recommendation pipeline.
//
// Random review collections over small id spaces, so users overlap often
// enough to produce real neighborhoods.

use proptest::prelude::*;

use savor::ratings::{build_matrix, RatingScale, Review};
use savor::recommend::{popularity_rank, select_neighbors};
use savor::similarity::compute_similarity;
use savor::{get_recommendations, NeighborhoodParams};

fn reviews_strategy(max_users: usize, max_restaurants: usize) -> impl Strategy<Value = Vec<Review>> {
    prop::collection::vec(
        (0..max_users, 0..max_restaurants, 2u8..=10),
        1..80,
    )
    .prop_map(|rows| {
        rows.into_iter()
            // Half-star steps between 1.0 and 5.0
            .map(|(u, r, half_stars)| {
                Review::new(format!("u{u}"), format!("r{r}"), f64::from(half_stars) / 2.0)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn similarity_is_symmetric_bounded_with_unit_diagonal(reviews in reviews_strategy(8, 10)) {
        let matrix = build_matrix(&reviews, &RatingScale::default()).unwrap();
        let sim = compute_similarity(&matrix);
        for i in 0..sim.len() {
            prop_assert_eq!(sim.get(i, i), 1.0);
            for j in 0..sim.len() {
                let v = sim.get(i, j);
                prop_assert!(v.is_finite());
                prop_assert!((-1.0..=1.0).contains(&v));
                prop_assert_eq!(v, sim.get(j, i));
            }
        }
    }

    #[test]
    fn neighborhood_is_bounded_thresholded_and_excludes_self(
        reviews in reviews_strategy(25, 6),
        pick in any::<prop::sample::Index>(),
    ) {
        let matrix = build_matrix(&reviews, &RatingScale::default()).unwrap();
        let sim = compute_similarity(&matrix);
        let target = pick.get(matrix.users()).clone();
        let params = NeighborhoodParams::default();
        let neighbors = select_neighbors(&sim, &target, &params).unwrap();

        prop_assert!(neighbors.len() <= params.max_neighbors);
        for n in &neighbors {
            prop_assert_ne!(&n.user_id, &target);
            prop_assert!(n.similarity > params.min_similarity);
        }
        for pair in neighbors.windows(2) {
            prop_assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn recommendations_skip_rated_are_sorted_and_bounded(
        reviews in reviews_strategy(8, 10),
        pick in any::<prop::sample::Index>(),
        k in 0usize..8,
    ) {
        let matrix = build_matrix(&reviews, &RatingScale::default()).unwrap();
        let target = pick.get(matrix.users()).clone();
        let recs = get_recommendations(&target, &matrix, k, &NeighborhoodParams::default());

        prop_assert!(recs.len() <= k);
        for rec in &recs {
            prop_assert!(matrix.rating(&target, &rec.restaurant).is_none());
            // A weighted average of positive weights stays on the rating scale
            prop_assert!(rec.score >= 1.0 - 1e-9 && rec.score <= 5.0 + 1e-9);
        }
        for pair in recs.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn recommendations_are_deterministic(
        reviews in reviews_strategy(8, 10),
        pick in any::<prop::sample::Index>(),
    ) {
        let matrix = build_matrix(&reviews, &RatingScale::default()).unwrap();
        let target = pick.get(matrix.users()).clone();
        let params = NeighborhoodParams::default();
        prop_assert_eq!(
            get_recommendations(&target, &matrix, 5, &params),
            get_recommendations(&target, &matrix, 5, &params)
        );
    }

    #[test]
    fn popularity_never_admits_small_restaurants(
        reviews in reviews_strategy(8, 10),
        min_count in 1usize..5,
    ) {
        let ranked = popularity_rank(&reviews, min_count, 100);
        for stat in &ranked {
            let actual = reviews.iter().filter(|r| r.restaurant == stat.restaurant).count();
            prop_assert_eq!(actual, stat.review_count);
            prop_assert!(stat.review_count >= min_count);
        }
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].mean_rating >= pair[1].mean_rating);
        }
    }
}
