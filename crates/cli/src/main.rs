use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dataset::{DataSet, UserId};
use recommender::{DatasetSummary, Recommendation, RecommendationEngine};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Flickmate - Correlation-based Movie Recommendations
#[derive(Parser)]
#[command(name = "flickmate")]
#[command(about = "Movie recommendations from MovieLens rating correlations", long_about = None)]
struct Cli {
    /// Path to the directory containing movie.csv and rating.csv
    #[arg(short, long, default_value = "data/ml-20m")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies for a user from correlated neighbor users
    Recommend {
        /// User ID to get recommendations for
        #[arg(long, default_value = "1000")]
        user_id: UserId,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Recommend movies similar to the user's most recent 5-star movie
    Similar {
        /// User ID whose latest favorite seeds the search
        #[arg(long, default_value = "1000")]
        user_id: UserId,

        /// Number of similar movies to return
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print a summary of the loaded and cleaned dataset
    Stats {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the dataset (this may take a moment for the full 20M export)
    println!("Loading MovieLens dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let data = Arc::new(
        DataSet::load_from_files(&cli.data_dir)
            .context("Failed to load MovieLens dataset")?,
    );
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    let engine = RecommendationEngine::new(data);

    match cli.command {
        Commands::Recommend {
            user_id,
            limit,
            json,
        } => handle_recommend(&engine, user_id, limit, json)?,
        Commands::Similar {
            user_id,
            limit,
            json,
        } => handle_similar(&engine, user_id, limit, json)?,
        Commands::Stats { json } => handle_stats(&engine, json)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: &RecommendationEngine,
    user_id: UserId,
    limit: usize,
    json: bool,
) -> Result<()> {
    let recommendations = engine.recommend_for_user(user_id, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        println!(
            "No recommendations for user {}: no neighbors cleared the overlap \
             and correlation thresholds, or no movie scored high enough.",
            user_id
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("Recommendations for user {}:", user_id).bold().blue()
    );
    print_recommendations(&recommendations);
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(
    engine: &RecommendationEngine,
    user_id: UserId,
    limit: usize,
    json: bool,
) -> Result<()> {
    let similar = engine
        .similar_to_recent_favorite(user_id, limit)
        .with_context(|| format!("item-based recommendation for user {} failed", user_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&similar)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Because user {} rated \"{}\" five stars:",
            user_id, similar.reference.title
        )
        .bold()
        .blue()
    );

    if similar.movies.is_empty() {
        println!("No movie shares enough raters with it to compare.");
        return Ok(());
    }

    print_recommendations(&similar.movies);
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(engine: &RecommendationEngine, json: bool) -> Result<()> {
    let summary = engine.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_summary(&summary);
    Ok(())
}

/// Helper function to format and print a recommendation list
fn print_recommendations(recommendations: &[Recommendation]) {
    for (rank, rec) in recommendations.iter().enumerate() {
        let genres = rec
            .genres
            .iter()
            .map(|g| format!("{:?}", g))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{}. {} [{}] - Score: {:.3}",
            (rank + 1).to_string().green(),
            rec.title,
            genres,
            rec.score
        );
    }
}

/// Helper function to print the dataset summary
fn print_summary(summary: &DatasetSummary) {
    println!("{}", "Dataset summary:".bold().blue());
    println!("{}Movies: {}", "• ".green(), summary.movie_count);
    println!("{}Users: {}", "• ".green(), summary.user_count);
    println!("{}Ratings: {}", "• ".green(), summary.rating_count);
    println!(
        "{}Ratings without a matching movie: {}",
        "• ".green(),
        summary.unmatched_ratings
    );
    println!(
        "{}Rating range: {:.1} - {:.1} (mean {:.3})",
        "• ".cyan(),
        summary.rating_min,
        summary.rating_max,
        summary.rating_mean
    );
    println!(
        "{}After cleaning: {} ratings across {} titles",
        "• ".cyan(),
        summary.cleaned_rating_count,
        summary.retained_title_count
    );
    println!("Most rated titles:");
    for (title, count) in &summary.most_rated {
        println!("  - {} ({} ratings)", title, count);
    }
}
