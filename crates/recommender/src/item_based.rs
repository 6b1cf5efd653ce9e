//! Item-based similarity.
//!
//! "Movies rated like the one you just loved."
//!
//! ## Algorithm
//! 1. Take the reference movie's rating column (all users' ratings of it)
//! 2. Correlate every other movie's column against it, pairwise over the
//!    users both columns share (at least two needed)
//! 3. Rank descending by coefficient and return the top entries
//!
//! The reference movie itself is excluded from the result: its trivial
//! self-correlation of 1.0 carries no information.

use crate::correlation::pairwise_pearson;
use crate::error::{RecommendError, Result};
use crate::matrix::RatingMatrix;
use crate::types::ScoredMovie;
use dataset::MovieId;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ranks movies by rating-vector correlation with a reference movie
pub struct ItemBasedRecommender {
    /// Shared reference to the rating matrix (read-only, so no Mutex needed)
    matrix: Arc<RatingMatrix>,
}

impl ItemBasedRecommender {
    pub fn new(matrix: Arc<RatingMatrix>) -> Self {
        Self { matrix }
    }

    /// The movies most similar to `reference`, up to `limit`.
    ///
    /// Columns with fewer than two users in common with the reference
    /// have an undefined coefficient and are skipped. Equal coefficients
    /// keep ascending movie-id order.
    #[instrument(skip(self))]
    pub fn similar_to(&self, reference: MovieId, limit: usize) -> Result<Vec<ScoredMovie>> {
        let reference_column = self
            .matrix
            .movie_column(reference)
            .ok_or(RecommendError::UnknownMovie {
                movie_id: reference,
            })?;

        // movie_ids() is ascending and rayon's collect preserves input
        // order, so the stable sort below sees a deterministic sequence
        let mut scored: Vec<ScoredMovie> = self
            .matrix
            .movie_ids()
            .par_iter()
            .filter_map(|&movie_id| {
                if movie_id == reference {
                    return None;
                }
                let column = self.matrix.movie_column(movie_id)?;
                let correlation = pairwise_pearson(reference_column, column)?;
                Some(ScoredMovie {
                    movie_id,
                    score: correlation,
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);

        debug!(similar = scored.len(), "item similarity done");
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::{DataSet, Genre, Movie, Rating, RatingTable, UserId};

    fn insert_movie(data: &mut DataSet, id: MovieId) {
        data.insert_movie(Movie {
            id,
            title: format!("Movie {id} (2000)"),
            genres: vec![Genre::Thriller],
        });
    }

    fn insert_rating(data: &mut DataSet, user_id: UserId, movie_id: MovieId, rating: f32) {
        data.insert_rating(Rating {
            user_id,
            movie_id,
            rating,
            timestamp: 1_000_000,
        });
    }

    /// Movie 1 is the reference. Movie 2 tracks it exactly, movie 3
    /// inverts it, movie 4 shares only one rater.
    fn create_test_matrix() -> Arc<RatingMatrix> {
        let mut data = DataSet::new();
        for id in 1..=4 {
            insert_movie(&mut data, id);
        }

        let reference = [(1, 5.0), (2, 4.0), (3, 3.0), (4, 1.0)];
        for (user_id, value) in reference {
            insert_rating(&mut data, user_id, 1, value);
            insert_rating(&mut data, user_id, 2, value);
            insert_rating(&mut data, user_id, 3, 6.0 - value);
        }
        insert_rating(&mut data, 1, 4, 2.0);

        let table = RatingTable::build(Arc::new(data), 0);
        Arc::new(RatingMatrix::from_table(&table))
    }

    #[test]
    fn test_similar_ranks_by_correlation() {
        let matrix = create_test_matrix();
        let recommender = ItemBasedRecommender::new(matrix);

        let scored = recommender.similar_to(1, 5).unwrap();

        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].movie_id, 2);
        assert_eq!(scored[0].score, 1.0);
        assert_eq!(scored[1].movie_id, 3);
        assert_eq!(scored[1].score, -1.0);
    }

    #[test]
    fn test_reference_is_excluded_from_its_own_results() {
        let matrix = create_test_matrix();
        let recommender = ItemBasedRecommender::new(matrix);

        let scored = recommender.similar_to(1, 5).unwrap();
        assert!(scored.iter().all(|s| s.movie_id != 1));
    }

    #[test]
    fn test_single_shared_rater_is_undefined() {
        let matrix = create_test_matrix();
        let recommender = ItemBasedRecommender::new(matrix);

        // movie 4 shares only user 1 with the reference: no coefficient
        let scored = recommender.similar_to(1, 5).unwrap();
        assert!(scored.iter().all(|s| s.movie_id != 4));
    }

    #[test]
    fn test_unknown_reference_is_an_error() {
        let matrix = create_test_matrix();
        let recommender = ItemBasedRecommender::new(matrix);

        assert!(matches!(
            recommender.similar_to(99, 5),
            Err(RecommendError::UnknownMovie { movie_id: 99 })
        ));
    }

    #[test]
    fn test_limit_truncates() {
        let matrix = create_test_matrix();
        let recommender = ItemBasedRecommender::new(matrix);

        let scored = recommender.similar_to(1, 1).unwrap();
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].movie_id, 2);
    }
}
