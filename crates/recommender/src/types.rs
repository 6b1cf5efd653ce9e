//! Shared result types for the recommenders.

use dataset::{Genre, Movie, MovieId, UserId};
use serde::Serialize;

/// A user retained by the neighbor selection, with their correlation to
/// the target user
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    pub user_id: UserId,
    pub correlation: f64,
}

/// A movie id with its recommendation score.
///
/// For the user-based recommender the score is a correlation-weighted
/// mean rating; for the item-based one it is a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredMovie {
    pub movie_id: MovieId,
    pub score: f64,
}

/// A scored movie joined back to its metadata for presentation
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: Vec<Genre>,
    pub score: f64,
}

/// Item-based result: the movies most similar to the reference movie
#[derive(Debug, Clone, Serialize)]
pub struct SimilarMovies {
    /// The target user's most recent 5.0-rated movie
    pub reference: Movie,
    pub movies: Vec<Recommendation>,
}

/// Console summary of the loaded and cleaned dataset
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub movie_count: usize,
    pub user_count: usize,
    pub rating_count: usize,
    /// Ratings referencing a movie id missing from movie.csv
    pub unmatched_ratings: usize,
    pub rating_mean: f64,
    pub rating_min: f32,
    pub rating_max: f32,
    /// Rows that survived the join + popularity filter
    pub cleaned_rating_count: usize,
    /// Titles that survived the popularity filter
    pub retained_title_count: usize,
    /// Most-rated surviving titles with their counts
    pub most_rated: Vec<(String, u32)>,
}
