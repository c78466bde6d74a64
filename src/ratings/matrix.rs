// User-item rating matrix: the dense table every downstream stage reads.
//
// Rows are users, columns are restaurants, both ordered lexicographically by
// identifier. A cell is `None` when the user never rated the restaurant.
// Cosine similarity reads missing cells as 0.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use super::review::{RatingScale, Review};
use crate::error::{RecommendError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct UserItemMatrix {
    users: Vec<String>,
    restaurants: Vec<String>,
    user_index: HashMap<String, usize>,
    restaurant_index: HashMap<String, usize>,
    /// Row-major, `users.len() * restaurants.len()` cells.
    cells: Vec<Option<f64>>,
}

/// Build the user-item matrix from a review collection.
///
/// Repeated (user, restaurant) pairs are averaged. Fails on an empty
/// collection or on any review the scale rejects.
pub fn build_matrix(reviews: &[Review], scale: &RatingScale) -> Result<UserItemMatrix> {
    if reviews.is_empty() {
        return Err(RecommendError::invalid("review collection is empty"));
    }

    let mut users = BTreeSet::new();
    let mut restaurants = BTreeSet::new();
    let mut totals: BTreeMap<(&str, &str), (f64, u32)> = BTreeMap::new();

    for review in reviews {
        scale.validate(review)?;
        users.insert(review.user_id.as_str());
        restaurants.insert(review.restaurant.as_str());
        let entry = totals
            .entry((review.user_id.as_str(), review.restaurant.as_str()))
            .or_insert((0.0, 0));
        entry.0 += review.rating;
        entry.1 += 1;
    }

    let users: Vec<String> = users.into_iter().map(str::to_string).collect();
    let restaurants: Vec<String> = restaurants.into_iter().map(str::to_string).collect();
    let user_index = index_of(&users);
    let restaurant_index = index_of(&restaurants);

    let mut cells = vec![None; users.len() * restaurants.len()];
    let mut duplicates = 0usize;
    for ((user, restaurant), (sum, count)) in totals {
        let row = user_index[user];
        let col = restaurant_index[restaurant];
        if count > 1 {
            duplicates += 1;
        }
        cells[row * restaurants.len() + col] = Some(sum / f64::from(count));
    }

    debug!(
        users = users.len(),
        restaurants = restaurants.len(),
        reviews = reviews.len(),
        averaged_pairs = duplicates,
        "Rating matrix built"
    );

    Ok(UserItemMatrix {
        users,
        restaurants,
        user_index,
        restaurant_index,
        cells,
    })
}

fn index_of(ids: &[String]) -> HashMap<String, usize> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), i))
        .collect()
}

impl UserItemMatrix {
    /// User ids in row order.
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Restaurant ids in column order.
    pub fn restaurants(&self) -> &[String] {
        &self.restaurants
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn restaurant_count(&self) -> usize {
        self.restaurants.len()
    }

    pub fn user_row(&self, user_id: &str) -> Option<usize> {
        self.user_index.get(user_id).copied()
    }

    pub fn restaurant_column(&self, restaurant: &str) -> Option<usize> {
        self.restaurant_index.get(restaurant).copied()
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.user_index.contains_key(user_id)
    }

    /// All cells of one user's row.
    pub fn row(&self, row: usize) -> &[Option<f64>] {
        let width = self.restaurants.len();
        &self.cells[row * width..(row + 1) * width]
    }

    /// Rating at (row, column), `None` if unrated.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells[row * self.restaurants.len() + col]
    }

    /// Rating lookup by identifiers.
    pub fn rating(&self, user_id: &str, restaurant: &str) -> Option<f64> {
        let row = self.user_row(user_id)?;
        let col = self.restaurant_column(restaurant)?;
        self.get(row, col)
    }
}
