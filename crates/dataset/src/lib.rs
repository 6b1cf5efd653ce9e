//! # Dataset Crate
//!
//! This crate handles loading and cleaning the MovieLens CSV export.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, DataSet)
//! - **parser**: Parse movie.csv / rating.csv into Rust structs
//! - **index**: Load, index, and validate the dataset
//! - **table**: The cleaned long-format rating table (join + popularity filter)
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use dataset::{DataSet, RatingTable, DEFAULT_MIN_TITLE_RATINGS};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! // Load movie.csv and rating.csv
//! let data = Arc::new(DataSet::load_from_files(Path::new("data/ml-20m"))?);
//!
//! // Drop unmatched ratings and rare titles
//! let table = RatingTable::build(data, DEFAULT_MIN_TITLE_RATINGS);
//!
//! println!("{} cleaned rating rows", table.len());
//! ```

// Public modules
pub mod error;
pub mod index;
pub mod parser;
pub mod table;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataError, Result};
pub use table::{DEFAULT_MIN_TITLE_RATINGS, RatingTable};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Movie,
    Rating,
    DataSet,
    // Enums
    Genre,
    // Rating scale
    MIN_RATING,
    MAX_RATING,
};
