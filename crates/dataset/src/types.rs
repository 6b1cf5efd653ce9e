//! Core domain types for the MovieLens CSV export.
//!
//! This module defines the fundamental data structures used throughout the
//! system: typed ids, movies, rating events, and the in-memory `DataSet`
//! that indexes them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user ids with movie ids

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Rating Scale
// =============================================================================

/// Lowest rating a user can give (half-star scale in the 20M export)
pub const MIN_RATING: f32 = 0.5;

/// Highest rating a user can give
pub const MAX_RATING: f32 = 5.0;

// =============================================================================
// Movie-related Types
// =============================================================================

/// Represents a movie in the dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    /// Title as shipped in movie.csv, usually with the year in parentheses,
    /// e.g. "Toy Story (1995)"
    pub title: String,
    /// Genres for this movie; empty when the export says "(no genres listed)"
    pub genres: Vec<Genre>,
}

/// Movie genres from the MovieLens 20M export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Children,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    FilmNoir,
    Horror,
    Imax,
    Musical,
    Mystery,
    Romance,
    SciFi,
    Thriller,
    War,
    Western,
}

// =============================================================================
// Rating Type
// =============================================================================

/// Represents a single rating event from a user for a movie
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value from 0.5 to 5.0
    pub rating: f32,
    /// Epoch seconds when the rating was made
    pub timestamp: i64,
}

// =============================================================================
// DataSet - The Core In-Memory Store
// =============================================================================

/// Main data structure that holds the raw movies and ratings plus indices.
///
/// Provides O(1) lookups for movies and per-user/per-movie rating slices.
/// The full rating list is kept in ingestion order because the downstream
/// table build and tie-break rules depend on it.
#[derive(Debug)]
pub struct DataSet {
    // Primary data stores
    pub(crate) movies: HashMap<MovieId, Movie>,
    /// All ratings, in file order
    pub(crate) ratings: Vec<Rating>,

    // Rating indices for fast lookups
    /// All ratings made by each user
    pub(crate) user_ratings: HashMap<UserId, Vec<Rating>>,
    /// All ratings received by each movie
    pub(crate) movie_ratings: HashMap<MovieId, Vec<Rating>>,
}

impl DataSet {
    /// Creates a new, empty DataSet
    pub fn new() -> Self {
        Self {
            movies: HashMap::new(),
            ratings: Vec::new(),
            user_ratings: HashMap::new(),
            movie_ratings: HashMap::new(),
        }
    }

    // Getters - these return references, not owned values

    /// Get a movie by id
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// All ratings in ingestion order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Get all ratings made by a user
    ///
    /// Returns an empty slice if the user has no ratings
    pub fn get_user_ratings(&self, user_id: UserId) -> &[Rating] {
        self.user_ratings
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all ratings for a movie
    pub fn get_movie_ratings(&self, movie_id: MovieId) -> &[Rating] {
        self.movie_ratings
            .get(&movie_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct users that rated anything
    pub fn user_count(&self) -> usize {
        self.user_ratings.len()
    }

    /// Ratings that reference a movie id missing from movie.csv.
    ///
    /// These are legal here; the cleaned table drops them.
    pub fn unmatched_rating_count(&self) -> usize {
        self.ratings
            .iter()
            .filter(|r| !self.movies.contains_key(&r.movie_id))
            .count()
    }

    // Mutators - used during data loading

    /// Insert a movie into the store
    pub fn insert_movie(&mut self, movie: Movie) {
        self.movies.insert(movie.id, movie);
    }

    /// Insert a rating and update indices
    pub fn insert_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);

        self.user_ratings
            .entry(rating.user_id)
            .or_default()
            .push(rating);

        self.movie_ratings
            .entry(rating.movie_id)
            .or_default()
            .push(rating);
    }

    /// Get counts for reporting/validation: (movies, users, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.movies.len(), self.user_ratings.len(), self.ratings.len())
    }
}

impl Default for DataSet {
    fn default() -> Self {
        Self::new()
    }
}
