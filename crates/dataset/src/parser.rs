//! Parsers for the MovieLens CSV files.
//!
//! This module handles the two inputs:
//! - movie.csv: movieId,title,genres
//! - rating.csv: userId,movieId,rating,timestamp
//!
//! Titles are quoted and may contain commas, so rows go through a real CSV
//! reader with serde-derived records instead of a hand-rolled split.
//! Genres are pipe-separated: "Adventure|Animation|Children|Comedy|Fantasy".

use crate::error::{DataError, Result};
use crate::types::*;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Raw movie.csv record as serde sees it
#[derive(Debug, Deserialize)]
struct MovieRecord {
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    title: String,
    genres: String,
}

/// Raw rating.csv record as serde sees it
///
/// The timestamp stays a string here because the 20M export ships it as a
/// "YYYY-MM-DD HH:MM:SS" datetime while older exports use epoch seconds.
#[derive(Debug, Deserialize)]
struct RatingRecord {
    #[serde(rename = "userId")]
    user_id: UserId,
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    rating: f32,
    timestamp: String,
}

/// Parse the movie.csv file
///
/// Format: movieId,title,genres
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let file = std::fs::File::open(path)?;
    read_movies(file, "movie.csv")
}

/// Parse the rating.csv file
///
/// Format: userId,movieId,rating,timestamp
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let file = std::fs::File::open(path)?;
    read_ratings(file, "rating.csv")
}

fn read_movies<R: Read>(input: R, file: &str) -> Result<Vec<Movie>> {
    let mut reader = csv::Reader::from_reader(input);
    let mut movies = Vec::new();

    for (idx, record) in reader.deserialize().enumerate() {
        // Data rows are 1-based; the header occupies line 1
        let line = idx + 2;
        let record: MovieRecord = record.map_err(|e| DataError::ParseError {
            file: file.to_string(),
            line,
            reason: e.to_string(),
        })?;

        movies.push(Movie {
            id: record.movie_id,
            title: record.title,
            genres: parse_genres(&record.genres)?,
        });
    }

    Ok(movies)
}

fn read_ratings<R: Read>(input: R, file: &str) -> Result<Vec<Rating>> {
    let mut reader = csv::Reader::from_reader(input);
    let mut ratings = Vec::new();

    for (idx, record) in reader.deserialize().enumerate() {
        let line = idx + 2;
        let record: RatingRecord = record.map_err(|e| DataError::ParseError {
            file: file.to_string(),
            line,
            reason: e.to_string(),
        })?;

        ratings.push(Rating {
            user_id: record.user_id,
            movie_id: record.movie_id,
            rating: record.rating,
            timestamp: parse_timestamp(&record.timestamp)?,
        });
    }

    Ok(ratings)
}

/// Parse a rating timestamp into epoch seconds.
///
/// Accepts either raw epoch seconds ("978300760") or the datetime form
/// shipped in the 20M export ("2005-04-02 23:53:47", naive UTC).
fn parse_timestamp(s: &str) -> Result<i64> {
    let s = s.trim();

    if let Ok(epoch) = s.parse::<i64>() {
        return Ok(epoch);
    }

    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|_| DataError::InvalidValue {
            field: "timestamp".to_string(),
            value: s.to_string(),
        })
}

/// Parse a genre string into the Genre enum
///
/// Example: "Action" -> Ok(Genre::Action)
///          "Sci-Fi" -> Ok(Genre::SciFi)
fn parse_genre(s: &str) -> Result<Genre> {
    match s {
        "Action" => Ok(Genre::Action),
        "Adventure" => Ok(Genre::Adventure),
        "Animation" => Ok(Genre::Animation),
        // The 1M export spells this "Children's"
        "Children" | "Children's" => Ok(Genre::Children),
        "Comedy" => Ok(Genre::Comedy),
        "Crime" => Ok(Genre::Crime),
        "Documentary" => Ok(Genre::Documentary),
        "Drama" => Ok(Genre::Drama),
        "Fantasy" => Ok(Genre::Fantasy),
        "Film-Noir" => Ok(Genre::FilmNoir),
        "Horror" => Ok(Genre::Horror),
        "IMAX" => Ok(Genre::Imax),
        "Musical" => Ok(Genre::Musical),
        "Mystery" => Ok(Genre::Mystery),
        "Romance" => Ok(Genre::Romance),
        "Sci-Fi" => Ok(Genre::SciFi),
        "Thriller" => Ok(Genre::Thriller),
        "War" => Ok(Genre::War),
        "Western" => Ok(Genre::Western),
        _ => Err(DataError::InvalidValue {
            field: "genre".to_string(),
            value: s.to_string(),
        }),
    }
}

/// Parse pipe-separated genres
///
/// The "(no genres listed)" marker maps to an empty list.
fn parse_genres(s: &str) -> Result<Vec<Genre>> {
    if s == "(no genres listed)" {
        return Ok(Vec::new());
    }

    let mut genres = Vec::new();
    for genre_str in s.split('|') {
        genres.push(parse_genre(genre_str)?);
    }
    Ok(genres)
}
