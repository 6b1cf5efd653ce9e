//! # Recommender Crate
//!
//! Correlation-based movie recommendations over the cleaned MovieLens
//! rating table.
//!
//! ## Components
//!
//! ### User-based recommender
//! "Users who rate like you": neighbors are users who rated enough of
//! the target's movies and correlate strongly with them; their ratings,
//! weighted by correlation, score the candidate movies.
//!
//! ### Item-based recommender
//! "Movies rated like this one": every movie's rating column is
//! correlated against a reference movie (the target's most recent
//! 5.0-rated one) and ranked by coefficient.
//!
//! ### Engine
//! Builds the rating matrix once, wires both recommenders to it, joins
//! results back to titles and genres.
//!
//! ## Example Usage
//!
//! ```ignore
//! use dataset::DataSet;
//! use recommender::RecommendationEngine;
//! use std::sync::Arc;
//!
//! let data = Arc::new(DataSet::load_from_files("data/ml-20m".as_ref())?);
//! let engine = RecommendationEngine::new(data);
//!
//! for rec in engine.recommend_for_user(1000, 5) {
//!     println!("{}  {:.2}", rec.title, rec.score);
//! }
//! ```

// Public modules
pub mod correlation;
pub mod engine;
pub mod error;
pub mod item_based;
pub mod matrix;
pub mod types;
pub mod user_based;

// Re-export commonly used types
pub use engine::RecommendationEngine;
pub use error::{RecommendError, Result};
pub use item_based::ItemBasedRecommender;
pub use matrix::RatingMatrix;
pub use types::{DatasetSummary, Neighbor, Recommendation, ScoredMovie, SimilarMovies};
pub use user_based::UserBasedRecommender;
