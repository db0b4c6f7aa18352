use std::collections::BTreeMap;

use sea_orm::FromQueryResult;
use serde::Serialize;

/// A movie row joined with its actor count (zero when no actors).
#[derive(Clone, Debug, FromQueryResult, Serialize)]
pub struct MovieWithActorCount {
    pub id: i64,
    pub imdb_id: String,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub rating: String,
    pub genres: String,
    pub runtime: i32,
    pub country: String,
    pub language: String,
    pub imdb_score: f64,
    pub imdb_votes: i64,
    pub metacritic_score: f64,
    pub actor_count: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct ActorEntry {
    pub id: i64,
    pub imdb_id: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct MostActors {
    pub movie: MovieWithActorCount,
    pub actors: Vec<ActorEntry>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MovieSummary {
    pub title: String,
    pub imdb_score: f64,
    pub year: i32,
    pub director: String,
    pub actor_count: i64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct RatingBreakdown {
    pub total_in_top: usize,
    pub categories: BTreeMap<String, Vec<MovieSummary>>,
    pub distribution: BTreeMap<String, usize>,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct DatabaseStats {
    pub total_movies: u64,
    pub total_actors: u64,
    pub average_runtime: f64,
    pub average_score: f64,
    pub year_range: Option<YearRange>,
    pub rating_distribution: BTreeMap<String, i64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub longest_running: Option<MovieWithActorCount>,
    pub most_actors: Option<MostActors>,
    pub breakdown: RatingBreakdown,
    pub stats: DatabaseStats,
}
