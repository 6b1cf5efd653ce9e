//! User-based collaborative filtering.
//!
//! "Users who rate like you rated these movies highly."
//!
//! ## Algorithm
//! 1. Take the target user's rated movies (the target item set)
//! 2. Keep users who rated strictly more than 60% of that set
//! 3. Correlate each survivor with the target over their commonly-rated
//!    movies; keep coefficients >= 0.65, ranked descending
//! 4. Weight every neighbor rating by that neighbor's correlation and
//!    average per movie
//! 5. Keep means strictly above 3.5, return the top entries

use crate::correlation::pairwise_pearson;
use crate::matrix::RatingMatrix;
use crate::types::{Neighbor, ScoredMovie};
use dataset::{MovieId, UserId};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Fraction of the target item set a user must have rated (strict >)
pub const DEFAULT_OVERLAP_RATIO: f64 = 0.60;

/// Minimum correlation with the target user (inclusive)
pub const DEFAULT_MIN_CORRELATION: f64 = 0.65;

/// Minimum mean weighted rating for a movie to be recommended (strict >)
pub const DEFAULT_SCORE_THRESHOLD: f64 = 3.5;

/// Recommends movies from the ratings of correlated neighbor users
pub struct UserBasedRecommender {
    /// Shared reference to the rating matrix (read-only, so no Mutex needed)
    matrix: Arc<RatingMatrix>,

    overlap_ratio: f64,
    min_correlation: f64,
    score_threshold: f64,
}

impl UserBasedRecommender {
    pub fn new(matrix: Arc<RatingMatrix>) -> Self {
        Self {
            matrix,
            overlap_ratio: DEFAULT_OVERLAP_RATIO,
            min_correlation: DEFAULT_MIN_CORRELATION,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }

    /// Configure the overlap ratio (default: 0.60)
    pub fn with_overlap_ratio(mut self, ratio: f64) -> Self {
        self.overlap_ratio = ratio;
        self
    }

    /// Configure the minimum neighbor correlation (default: 0.65)
    pub fn with_min_correlation(mut self, min: f64) -> Self {
        self.min_correlation = min;
        self
    }

    /// Configure the minimum recommendation score (default: 3.5)
    pub fn with_score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Find the target user's neighbors, ranked by correlation descending.
    ///
    /// The target user is never part of the result. Equal coefficients
    /// keep ascending user-id order.
    #[instrument(skip(self, target), fields(user_id = target))]
    pub fn neighbors(&self, target: UserId) -> Vec<Neighbor> {
        let Some(target_row) = self.matrix.user_row(target) else {
            // unknown user or no surviving ratings: no neighbors
            return Vec::new();
        };

        let required_overlap = self.overlap_ratio * target_row.len() as f64;

        // Users who rated strictly more than the required share of the
        // target item set, in ascending id order for determinism.
        let mut candidates: Vec<UserId> = self
            .matrix
            .users()
            .filter(|&user_id| user_id != target)
            .filter(|&user_id| {
                let row = match self.matrix.user_row(user_id) {
                    Some(row) => row,
                    None => return false,
                };
                let overlap = target_row
                    .keys()
                    .filter(|&movie_id| row.contains_key(movie_id))
                    .count();
                overlap as f64 > required_overlap
            })
            .collect();
        candidates.sort_unstable();

        debug!(
            candidates = candidates.len(),
            target_items = target_row.len(),
            "overlap filter done"
        );

        let mut neighbors: Vec<Neighbor> = candidates
            .par_iter()
            .filter_map(|&user_id| {
                let row = self.matrix.user_row(user_id)?;
                let correlation = pairwise_pearson(target_row, row)?;
                (correlation >= self.min_correlation).then_some(Neighbor {
                    user_id,
                    correlation,
                })
            })
            .collect();

        // stable sort keeps ascending user ids on equal coefficients
        neighbors.sort_by(|a, b| {
            b.correlation
                .partial_cmp(&a.correlation)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(neighbors = neighbors.len(), "correlation filter done");
        neighbors
    }

    /// Recommend up to `limit` movies for the target user.
    ///
    /// Every rating event of every neighbor is weighted by that
    /// neighbor's correlation; scores are per-movie means of the weighted
    /// ratings. The target user's own events never contribute. Equal
    /// scores keep ascending movie-id order.
    #[instrument(skip(self, target), fields(user_id = target))]
    pub fn recommend(&self, target: UserId, limit: usize) -> Vec<ScoredMovie> {
        let neighbors = self.neighbors(target);
        if neighbors.is_empty() {
            return Vec::new();
        }

        // (sum of weighted ratings, event count) per movie; BTreeMap so
        // the later stable sort sees movies in ascending-id order
        let mut totals: BTreeMap<MovieId, (f64, u32)> = BTreeMap::new();
        for neighbor in &neighbors {
            if neighbor.user_id == target {
                continue;
            }
            let Some(row) = self.matrix.user_row(neighbor.user_id) else {
                continue;
            };
            for (&movie_id, &rating) in row {
                let weighted = neighbor.correlation * rating as f64;
                let entry = totals.entry(movie_id).or_insert((0.0, 0));
                entry.0 += weighted;
                entry.1 += 1;
            }
        }

        let mut scored: Vec<ScoredMovie> = totals
            .into_iter()
            .map(|(movie_id, (sum, count))| ScoredMovie {
                movie_id,
                score: sum / count as f64,
            })
            .filter(|scored| scored.score > self.score_threshold)
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);

        debug!(recommendations = scored.len(), "scoring done");
        scored
    }
}
