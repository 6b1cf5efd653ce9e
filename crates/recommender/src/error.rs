//! Error types for the recommender crate.

use dataset::{MovieId, UserId};
use thiserror::Error;

/// Errors that can occur while generating recommendations.
///
/// Degenerate inputs (unknown user, empty target item set, nothing above
/// a threshold) are NOT errors; those produce empty result lists. The
/// variants here are the conditions with no meaningful empty output.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// The user has no maximum-rated row to seed item similarity from
    #[error("user {user_id} has no 5.0-rated movie to seed item similarity")]
    NoReferenceItem { user_id: UserId },

    /// The movie is not present in the rating matrix
    #[error("movie {movie_id} is not in the rating matrix")]
    UnknownMovie { movie_id: MovieId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommendError>;
