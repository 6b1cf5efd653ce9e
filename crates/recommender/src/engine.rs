//! The recommendation engine.
//!
//! Owns the cleaned table and the rating matrix, wires the two
//! recommenders to them, and joins scored movie ids back to metadata for
//! presentation. The table and matrix are built once per process; every
//! query after that is read-only.

use crate::error::{RecommendError, Result};
use crate::item_based::ItemBasedRecommender;
use crate::matrix::RatingMatrix;
use crate::types::{DatasetSummary, Recommendation, ScoredMovie, SimilarMovies};
use crate::user_based::UserBasedRecommender;
use dataset::{DEFAULT_MIN_TITLE_RATINGS, DataSet, RatingTable, UserId};
use std::sync::Arc;
use tracing::info;

pub struct RecommendationEngine {
    table: RatingTable,
    matrix: Arc<RatingMatrix>,
    user_based: UserBasedRecommender,
    item_based: ItemBasedRecommender,
}

impl RecommendationEngine {
    /// Build an engine over the cleaned dataset with the default
    /// popularity threshold.
    pub fn new(data: Arc<DataSet>) -> Self {
        Self::with_min_title_ratings(data, DEFAULT_MIN_TITLE_RATINGS)
    }

    /// Build an engine with an explicit popularity threshold.
    pub fn with_min_title_ratings(data: Arc<DataSet>, min_title_ratings: u32) -> Self {
        let table = RatingTable::build(data, min_title_ratings);
        let matrix = Arc::new(RatingMatrix::from_table(&table));

        info!(
            users = matrix.user_count(),
            movies = matrix.movie_count(),
            "rating matrix ready"
        );

        Self {
            user_based: UserBasedRecommender::new(matrix.clone()),
            item_based: ItemBasedRecommender::new(matrix.clone()),
            table,
            matrix,
        }
    }

    /// The cleaned table backing this engine
    pub fn table(&self) -> &RatingTable {
        &self.table
    }

    /// The rating matrix backing this engine
    pub fn matrix(&self) -> &Arc<RatingMatrix> {
        &self.matrix
    }

    /// User-based recommendations with metadata, up to `limit`.
    ///
    /// An unknown user, an empty neighbor set, or nothing above the score
    /// threshold all produce an empty list, never an error.
    pub fn recommend_for_user(&self, user_id: UserId, limit: usize) -> Vec<Recommendation> {
        let scored = self.user_based.recommend(user_id, limit);
        self.join_metadata(scored)
    }

    /// Item-based recommendations seeded by the user's most recent
    /// 5.0-rated movie.
    pub fn similar_to_recent_favorite(&self, user_id: UserId, limit: usize) -> Result<SimilarMovies> {
        let reference = self
            .table
            .latest_max_rated(user_id)
            .ok_or(RecommendError::NoReferenceItem { user_id })?;

        let reference_movie = self
            .table
            .data()
            .get_movie(reference.movie_id)
            .cloned()
            // table rows always join to a known movie
            .ok_or(RecommendError::UnknownMovie {
                movie_id: reference.movie_id,
            })?;

        let scored = self.item_based.similar_to(reference.movie_id, limit)?;

        Ok(SimilarMovies {
            reference: reference_movie,
            movies: self.join_metadata(scored),
        })
    }

    /// Summarize the raw and cleaned dataset for reporting.
    pub fn summary(&self) -> DatasetSummary {
        let data = self.table.data();
        let (movie_count, user_count, rating_count) = data.counts();

        let mut rating_min = f32::INFINITY;
        let mut rating_max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        for rating in data.ratings() {
            rating_min = rating_min.min(rating.rating);
            rating_max = rating_max.max(rating.rating);
            sum += rating.rating as f64;
        }
        let rating_mean = if rating_count > 0 {
            sum / rating_count as f64
        } else {
            0.0
        };

        DatasetSummary {
            movie_count,
            user_count,
            rating_count,
            unmatched_ratings: data.unmatched_rating_count(),
            rating_mean,
            rating_min: if rating_count > 0 { rating_min } else { 0.0 },
            rating_max: if rating_count > 0 { rating_max } else { 0.0 },
            cleaned_rating_count: self.table.len(),
            retained_title_count: self.table.title_count(),
            most_rated: self.table.most_rated_titles(5),
        }
    }

    fn join_metadata(&self, scored: Vec<ScoredMovie>) -> Vec<Recommendation> {
        let data = self.table.data();
        scored
            .into_iter()
            .filter_map(|scored| {
                let movie = data.get_movie(scored.movie_id)?;
                Some(Recommendation {
                    movie_id: scored.movie_id,
                    title: movie.title.clone(),
                    genres: movie.genres.clone(),
                    score: scored.score,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::{Genre, Movie, Rating};

    fn create_test_data() -> Arc<DataSet> {
        let mut data = DataSet::new();

        for id in 1..=5 {
            data.insert_movie(Movie {
                id,
                title: format!("Movie {id} (2000)"),
                genres: vec![Genre::Comedy],
            });
        }

        // target user 1, twin user 2, contrarian user 3 (rates against
        // the target, and gives out no 5.0 at all)
        for (movie_id, value) in [(1, 5.0), (2, 4.0), (3, 3.0)] {
            data.insert_rating(Rating { user_id: 1, movie_id, rating: value, timestamp: movie_id as i64 });
            data.insert_rating(Rating { user_id: 2, movie_id, rating: value, timestamp: movie_id as i64 });
        }
        data.insert_rating(Rating { user_id: 2, movie_id: 4, rating: 5.0, timestamp: 10 });
        for (movie_id, value) in [(1, 2.0), (2, 2.5), (3, 4.5)] {
            data.insert_rating(Rating { user_id: 3, movie_id, rating: value, timestamp: 20 + movie_id as i64 });
        }

        Arc::new(data)
    }

    #[test]
    fn test_recommendations_carry_metadata() {
        let engine = RecommendationEngine::with_min_title_ratings(create_test_data(), 0);

        let recommendations = engine.recommend_for_user(1, 5);

        // Twin neighbor scores movies 1 and 4 at 5.0 and movie 2 at 4.0;
        // the 5.0 tie resolves to the lower movie id.
        let ids: Vec<_> = recommendations.iter().map(|r| r.movie_id).collect();
        assert_eq!(ids, vec![1, 4, 2]);
        assert_eq!(recommendations[1].title, "Movie 4 (2000)");
        assert_eq!(recommendations[1].genres, vec![Genre::Comedy]);
    }

    #[test]
    fn test_similar_to_recent_favorite() {
        let engine = RecommendationEngine::with_min_title_ratings(create_test_data(), 0);

        let similar = engine.similar_to_recent_favorite(1, 5).unwrap();
        // user 1's only 5.0 rating is movie 1
        assert_eq!(similar.reference.id, 1);
        assert!(similar.movies.iter().all(|m| m.movie_id != 1));
        // movie 2's column tracks movie 1's exactly across all raters
        assert_eq!(similar.movies[0].movie_id, 2);
        assert_eq!(similar.movies[0].score, 1.0);
    }

    #[test]
    fn test_no_reference_item_is_an_error() {
        let engine = RecommendationEngine::with_min_title_ratings(create_test_data(), 0);

        // user 3 rated movies, but never at 5.0
        assert!(matches!(
            engine.similar_to_recent_favorite(3, 5),
            Err(RecommendError::NoReferenceItem { user_id: 3 })
        ));
    }

    #[test]
    fn test_summary_counts() {
        let engine = RecommendationEngine::with_min_title_ratings(create_test_data(), 0);

        let summary = engine.summary();
        assert_eq!(summary.movie_count, 5);
        assert_eq!(summary.user_count, 3);
        assert_eq!(summary.rating_count, 10);
        assert_eq!(summary.unmatched_ratings, 0);
        assert_eq!(summary.cleaned_rating_count, 10);
        assert_eq!(summary.rating_max, 5.0);
        // movie 5 was never rated, so only four titles have counts
        assert_eq!(summary.retained_title_count, 4);
    }
}
