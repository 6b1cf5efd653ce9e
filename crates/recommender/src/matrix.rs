//! Sparse user x movie rating matrix.
//!
//! Built from the cleaned rating table, the matrix keeps both
//! orientations: rows (one rating vector per user) for the user-based
//! recommender, and columns (one rating vector per movie) for the
//! item-based one. A missing entry means "not rated", never zero.
//!
//! Both orientations hold a copy of every cleaned rating, so peak memory
//! is O(2 x cleaned ratings), the one scalability limit of the whole
//! pipeline on large exports.

use dataset::{MovieId, RatingTable, UserId};
use std::collections::{BTreeMap, HashMap};

/// Sparse rating matrix with row and column access.
///
/// Vectors are BTreeMaps so iteration order is deterministic; the
/// documented tie-break rules depend on that.
#[derive(Debug)]
pub struct RatingMatrix {
    /// user -> (movie -> rating)
    rows: HashMap<UserId, BTreeMap<MovieId, f32>>,
    /// movie -> (user -> rating)
    cols: HashMap<MovieId, BTreeMap<UserId, f32>>,
}

impl RatingMatrix {
    /// Pivot the cleaned table into both orientations.
    pub fn from_table(table: &RatingTable) -> Self {
        let mut rows: HashMap<UserId, BTreeMap<MovieId, f32>> = HashMap::new();
        let mut cols: HashMap<MovieId, BTreeMap<UserId, f32>> = HashMap::new();

        for rating in table.rows() {
            rows.entry(rating.user_id)
                .or_default()
                .insert(rating.movie_id, rating.rating);
            cols.entry(rating.movie_id)
                .or_default()
                .insert(rating.user_id, rating.rating);
        }

        Self { rows, cols }
    }

    /// A user's rating vector, keyed by movie
    pub fn user_row(&self, user_id: UserId) -> Option<&BTreeMap<MovieId, f32>> {
        self.rows.get(&user_id)
    }

    /// A movie's rating vector, keyed by user
    pub fn movie_column(&self, movie_id: MovieId) -> Option<&BTreeMap<UserId, f32>> {
        self.cols.get(&movie_id)
    }

    /// The movies a user has rated, ascending by id.
    ///
    /// For the target user this is the "target item set"; it is exactly
    /// the set of defined cells in their row. Unknown users get an empty
    /// set, and everything downstream degrades to empty output.
    pub fn movies_rated_by(&self, user_id: UserId) -> Vec<MovieId> {
        self.rows
            .get(&user_id)
            .map(|row| row.keys().copied().collect())
            .unwrap_or_default()
    }

    /// All user ids with at least one rating, in arbitrary order
    pub fn users(&self) -> impl Iterator<Item = UserId> + '_ {
        self.rows.keys().copied()
    }

    /// All movie ids with at least one rating, ascending
    pub fn movie_ids(&self) -> Vec<MovieId> {
        let mut ids: Vec<MovieId> = self.cols.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn user_count(&self) -> usize {
        self.rows.len()
    }

    pub fn movie_count(&self) -> usize {
        self.cols.len()
    }
}
