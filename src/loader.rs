use sea_orm::{DatabaseConnection, EntityTrait, Set, SqlErr};
use tracing::{debug, warn};

use crate::{
    entities::{actor, movie},
    error::AppResult,
    parser::{self, ActorRecord, MovieRecord},
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadSummary {
    pub inserted: usize,
    /// Rows dropped on a uniqueness or foreign-key violation.
    pub skipped_rows: usize,
    /// Statements that did not match the expected shape.
    pub unparsed: usize,
}

/// Loads movie statements from a dump. Movies must be loaded before actors;
/// the actor foreign key is checked at insert time.
pub async fn load_movies(db: &DatabaseConnection, src: &str) -> AppResult<LoadSummary> {
    let mut summary = LoadSummary::default();

    for parsed in parser::movie_statements(src) {
        let record = match parsed {
            Ok(record) => record,
            Err(err) => {
                debug!(error = %err, "skipping unparsed movie statement");
                summary.unparsed += 1;
                continue;
            },
        };
        let id = record.id;
        match movie::Entity::insert(movie_model(record)).exec(db).await {
            Ok(_) => summary.inserted += 1,
            Err(err) if is_constraint_violation(&err) => {
                warn!(id, error = %err, "could not insert movie");
                summary.skipped_rows += 1;
            },
            Err(err) => return Err(err.into()),
        }
    }

    if summary.unparsed > 0 {
        warn!(count = summary.unparsed, "movie statements did not match the expected shape");
    }
    debug!(inserted = summary.inserted, skipped = summary.skipped_rows, "movies loaded");
    Ok(summary)
}

pub async fn load_actors(db: &DatabaseConnection, src: &str) -> AppResult<LoadSummary> {
    let mut summary = LoadSummary::default();

    for parsed in parser::actor_statements(src) {
        let record = match parsed {
            Ok(record) => record,
            Err(err) => {
                debug!(error = %err, "skipping unparsed actor statement");
                summary.unparsed += 1;
                continue;
            },
        };
        let id = record.id;
        match actor::Entity::insert(actor_model(record)).exec(db).await {
            Ok(_) => summary.inserted += 1,
            Err(err) if is_constraint_violation(&err) => {
                warn!(id, error = %err, "could not insert actor");
                summary.skipped_rows += 1;
            },
            Err(err) => return Err(err.into()),
        }
    }

    if summary.unparsed > 0 {
        warn!(count = summary.unparsed, "actor statements did not match the expected shape");
    }
    debug!(inserted = summary.inserted, skipped = summary.skipped_rows, "actors loaded");
    Ok(summary)
}

fn is_constraint_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_) | SqlErr::ForeignKeyConstraintViolation(_))
    )
}

fn movie_model(record: MovieRecord) -> movie::ActiveModel {
    movie::ActiveModel {
        id: Set(record.id),
        imdb_id: Set(record.imdb_id),
        title: Set(record.title),
        director: Set(record.director),
        year: Set(record.year),
        rating: Set(record.rating),
        genres: Set(record.genres),
        runtime: Set(record.runtime),
        country: Set(record.country),
        language: Set(record.language),
        imdb_score: Set(record.imdb_score),
        imdb_votes: Set(record.imdb_votes),
        metacritic_score: Set(record.metacritic_score),
    }
}

fn actor_model(record: ActorRecord) -> actor::ActiveModel {
    actor::ActiveModel {
        id: Set(record.id),
        movie_id: Set(record.movie_id),
        imdb_id: Set(record.imdb_id),
        name: Set(record.name),
    }
}
