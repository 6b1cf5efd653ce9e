//! The cleaned long-format rating table.
//!
//! `RatingTable` is the joined and filtered view the recommenders work on:
//! ratings are matched to a known movie (rows with no matching movie are
//! dropped), and every title whose total rating count falls at or below the
//! popularity threshold is removed together with all of its rows.
//!
//! Counts are aggregated per *title*, not per movie id, so distinct movie
//! ids that share a title pool their counts, matching how the popularity
//! rule is defined over titles.

use crate::types::*;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Titles with a total rating count at or below this are considered rare
/// and excluded from the table.
pub const DEFAULT_MIN_TITLE_RATINGS: u32 = 1000;

/// Cleaned long-format table of rating rows, in ingestion order.
#[derive(Debug)]
pub struct RatingTable {
    data: Arc<DataSet>,
    /// Surviving rows, in the same order they appeared in rating.csv
    rows: Vec<Rating>,
    /// Total rating count per surviving title
    title_counts: HashMap<String, u32>,
}

impl RatingTable {
    /// Build the cleaned table from a loaded DataSet.
    ///
    /// Two passes:
    /// 1. Count ratings per title, over rows that join to a known movie
    /// 2. Keep rows whose title count is strictly above `min_title_ratings`
    pub fn build(data: Arc<DataSet>, min_title_ratings: u32) -> Self {
        let mut title_counts: HashMap<String, u32> = HashMap::new();
        for rating in data.ratings() {
            if let Some(movie) = data.get_movie(rating.movie_id) {
                *title_counts.entry(movie.title.clone()).or_insert(0) += 1;
            }
        }

        let rows: Vec<Rating> = data
            .ratings()
            .iter()
            .filter(|rating| {
                data.get_movie(rating.movie_id).is_some_and(|movie| {
                    title_counts
                        .get(&movie.title)
                        .is_some_and(|&count| count > min_title_ratings)
                })
            })
            .copied()
            .collect();

        title_counts.retain(|_, count| *count > min_title_ratings);

        info!(
            rows = rows.len(),
            titles = title_counts.len(),
            min_title_ratings,
            "built cleaned rating table"
        );

        Self {
            data,
            rows,
            title_counts,
        }
    }

    /// The underlying store, for metadata lookups
    pub fn data(&self) -> &Arc<DataSet> {
        &self.data
    }

    /// Surviving rows in ingestion order
    pub fn rows(&self) -> &[Rating] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct titles that survived the popularity filter
    pub fn title_count(&self) -> usize {
        self.title_counts.len()
    }

    /// Total rating count for a surviving title (0 if filtered out)
    pub fn ratings_for_title(&self, title: &str) -> u32 {
        self.title_counts.get(title).copied().unwrap_or(0)
    }

    /// The most-rated surviving titles, descending by count.
    /// Ties are broken alphabetically so the output is deterministic.
    pub fn most_rated_titles(&self, n: usize) -> Vec<(String, u32)> {
        let mut titles: Vec<(String, u32)> = self
            .title_counts
            .iter()
            .map(|(title, &count)| (title.clone(), count))
            .collect();
        titles.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        titles.truncate(n);
        titles
    }

    /// The user's most recent maximum-rated (5.0) row, if any.
    ///
    /// Timestamp ties resolve to the earliest-ingested row.
    pub fn latest_max_rated(&self, user_id: UserId) -> Option<&Rating> {
        let mut best: Option<&Rating> = None;
        for rating in &self.rows {
            if rating.user_id != user_id || rating.rating != MAX_RATING {
                continue;
            }
            // strict > keeps the first-seen row on equal timestamps
            match best {
                Some(current) if rating.timestamp <= current.timestamp => {}
                _ => best = Some(rating),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            genres: vec![Genre::Drama],
        }
    }

    fn rating(user_id: UserId, movie_id: MovieId, value: f32, timestamp: i64) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: value,
            timestamp,
        }
    }

    /// Two movies: id 1 rated by 3 users, id 2 rated by 2 users.
    fn create_test_data() -> DataSet {
        let mut data = DataSet::new();
        data.insert_movie(movie(1, "Popular (1999)"));
        data.insert_movie(movie(2, "Rare (2001)"));

        for user_id in 1..=3 {
            data.insert_rating(rating(user_id, 1, 4.0, 1_000_000 + user_id as i64));
        }
        for user_id in 1..=2 {
            data.insert_rating(rating(user_id, 2, 3.0, 2_000_000 + user_id as i64));
        }

        data
    }

    #[test]
    fn test_threshold_is_strict() {
        let data = Arc::new(create_test_data());

        // count <= 2 excluded: movie 2 has exactly 2 ratings and must go
        let table = RatingTable::build(data.clone(), 2);
        assert_eq!(table.len(), 3);
        assert!(table.rows().iter().all(|r| r.movie_id == 1));
        assert_eq!(table.ratings_for_title("Rare (2001)"), 0);

        // count <= 3 excludes everything
        let table = RatingTable::build(data, 3);
        assert!(table.is_empty());
        assert_eq!(table.title_count(), 0);
    }

    #[test]
    fn test_default_threshold_boundary() {
        let mut data = DataSet::new();
        data.insert_movie(movie(1, "Exactly Threshold (2000)"));
        data.insert_movie(movie(2, "Just Above (2000)"));

        // 1000 ratings: excluded (count <= 1000). 1001 ratings: kept.
        for user_id in 0..1000 {
            data.insert_rating(rating(user_id, 1, 3.0, 1_000_000));
        }
        for user_id in 0..1001 {
            data.insert_rating(rating(user_id, 2, 3.0, 1_000_000));
        }

        let table = RatingTable::build(Arc::new(data), DEFAULT_MIN_TITLE_RATINGS);
        assert_eq!(table.len(), 1001);
        assert_eq!(table.ratings_for_title("Exactly Threshold (2000)"), 0);
        assert_eq!(table.ratings_for_title("Just Above (2000)"), 1001);
    }

    #[test]
    fn test_unmatched_ratings_are_dropped() {
        let mut data = DataSet::new();
        data.insert_movie(movie(1, "Known (1999)"));
        data.insert_rating(rating(1, 1, 4.0, 1));
        // movie 99 is not in movie.csv
        data.insert_rating(rating(1, 99, 5.0, 2));

        assert_eq!(data.unmatched_rating_count(), 1);

        let table = RatingTable::build(Arc::new(data), 0);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].movie_id, 1);
    }

    #[test]
    fn test_shared_title_pools_counts() {
        let mut data = DataSet::new();
        // Two distinct ids carry the same title; together they clear a
        // threshold neither clears alone.
        data.insert_movie(movie(1, "Twin (1998)"));
        data.insert_movie(movie(2, "Twin (1998)"));
        for user_id in 1..=2 {
            data.insert_rating(rating(user_id, 1, 4.0, 1));
            data.insert_rating(rating(user_id, 2, 4.0, 2));
        }

        let table = RatingTable::build(Arc::new(data), 3);
        assert_eq!(table.len(), 4);
        assert_eq!(table.ratings_for_title("Twin (1998)"), 4);
    }

    #[test]
    fn test_latest_max_rated() {
        let mut data = DataSet::new();
        data.insert_movie(movie(1, "First (1990)"));
        data.insert_movie(movie(2, "Second (1991)"));
        data.insert_movie(movie(3, "Third (1992)"));
        data.insert_movie(movie(4, "Fourth (1993)"));

        data.insert_rating(rating(7, 1, 5.0, 100));
        data.insert_rating(rating(7, 2, 5.0, 300));
        // same timestamp as movie 2: earlier ingestion wins, so movie 2 stays
        data.insert_rating(rating(7, 3, 5.0, 300));
        // newer but below the maximum rating, so it never seeds
        data.insert_rating(rating(7, 4, 4.5, 400));

        let table = RatingTable::build(Arc::new(data), 0);
        let reference = table.latest_max_rated(7).unwrap();
        assert_eq!(reference.movie_id, 2);
        assert_eq!(reference.timestamp, 300);
    }

    #[test]
    fn test_latest_max_rated_none_without_five_star() {
        let mut data = DataSet::new();
        data.insert_movie(movie(1, "Fine (1990)"));
        data.insert_rating(rating(7, 1, 4.5, 100));

        let table = RatingTable::build(Arc::new(data), 0);
        assert!(table.latest_max_rated(7).is_none());
        assert!(table.latest_max_rated(8).is_none());
    }
}
