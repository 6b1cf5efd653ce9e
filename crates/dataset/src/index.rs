//! DataSet building and validation.
//!
//! This module assembles the in-memory store from the two CSV files:
//! - Parse movie.csv and rating.csv in parallel
//! - Build the per-user and per-movie indices
//! - Validate the loaded data

use crate::error::{DataError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

impl DataSet {
    /// Load a MovieLens dataset from a directory containing
    /// movie.csv and rating.csv.
    ///
    /// This is the main entry point for loading data.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        let movies_path = data_dir.join("movie.csv");
        let ratings_path = data_dir.join("rating.csv");

        // Parse both files in parallel; rayon's `join` runs the closures
        // on separate threads and the ? operator handles either failure.
        let (movies, ratings) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_ratings(&ratings_path),
        );
        let movies = movies?;
        let ratings = ratings?;

        info!(
            movies = movies.len(),
            ratings = ratings.len(),
            "parsed MovieLens CSV files"
        );

        let mut data = DataSet::new();

        for movie in movies {
            data.insert_movie(movie);
        }

        // Ratings referencing an unknown movie id are kept here; the
        // cleaned table drops them (left-join + null-filter semantics).
        for rating in ratings {
            data.insert_rating(rating);
        }

        data.validate()?;

        let (movie_count, user_count, rating_count) = data.counts();
        info!(
            movies = movie_count,
            users = user_count,
            ratings = rating_count,
            "dataset loaded and validated"
        );

        Ok(data)
    }

    /// Validate the loaded data.
    ///
    /// Checks that:
    /// - Rating values are in the valid range (0.5 - 5.0)
    /// - There is at most one rating per (user, movie) pair
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<(UserId, MovieId)> = HashSet::with_capacity(self.ratings.len());

        for rating in &self.ratings {
            if rating.rating < MIN_RATING || rating.rating > MAX_RATING {
                return Err(DataError::InvalidValue {
                    field: "rating".to_string(),
                    value: rating.rating.to_string(),
                });
            }
            if !seen.insert((rating.user_id, rating.movie_id)) {
                return Err(DataError::ValidationError(format!(
                    "duplicate rating for user {} and movie {}",
                    rating.user_id, rating.movie_id
                )));
            }
        }

        Ok(())
    }
}
