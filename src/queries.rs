use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
    sea_query::{Alias, Expr, Func},
};

use crate::{
    entities::{actor, movie},
    error::AppResult,
    models::{
        ActorEntry, DatabaseStats, MostActors, MovieSummary, MovieWithActorCount, RatingBreakdown,
        Report, YearRange,
    },
};

fn movies_with_counts() -> Select<movie::Entity> {
    movie::Entity::find()
        .column_as(actor::Column::Id.count(), "actor_count")
        .join(JoinType::LeftJoin, movie::Relation::Actor.def())
        .group_by(movie::Column::Id)
}

/// Maximum runtime, ties broken by storage order.
pub async fn longest_running_movie(
    db: &DatabaseConnection,
) -> AppResult<Option<MovieWithActorCount>> {
    let movie = movies_with_counts()
        .order_by_desc(movie::Column::Runtime)
        .into_model::<MovieWithActorCount>()
        .one(db)
        .await?;
    Ok(movie)
}

/// Maximum actor count (zero counts included), with the movie's full cast
/// sorted by name.
pub async fn movie_with_most_actors(db: &DatabaseConnection) -> AppResult<Option<MostActors>> {
    let top = movies_with_counts()
        .order_by_desc(Expr::col(Alias::new("actor_count")))
        .into_model::<MovieWithActorCount>()
        .one(db)
        .await?;

    let Some(top) = top else {
        return Ok(None);
    };

    let actors = actor::Entity::find()
        .filter(actor::Column::MovieId.eq(top.id))
        .order_by_asc(actor::Column::Name)
        .all(db)
        .await?
        .into_iter()
        .map(|a| ActorEntry { id: a.id, imdb_id: a.imdb_id, name: a.name })
        .collect();

    Ok(Some(MostActors { movie: top, actors }))
}

/// Top N movies by score, grouped by rating category.
pub async fn top_movies_by_rating_breakdown(
    db: &DatabaseConnection,
    top_n: u64,
) -> AppResult<RatingBreakdown> {
    let top = movies_with_counts()
        .order_by_desc(movie::Column::ImdbScore)
        .limit(top_n)
        .into_model::<MovieWithActorCount>()
        .all(db)
        .await?;
    Ok(group_by_rating(top))
}

pub(crate) fn group_by_rating(top: Vec<MovieWithActorCount>) -> RatingBreakdown {
    let mut breakdown = RatingBreakdown { total_in_top: top.len(), ..Default::default() };
    for movie in top {
        *breakdown.distribution.entry(movie.rating.clone()).or_insert(0) += 1;
        breakdown.categories.entry(movie.rating.clone()).or_default().push(MovieSummary {
            title: movie.title,
            imdb_score: movie.imdb_score,
            year: movie.year,
            director: movie.director,
            actor_count: movie.actor_count,
        });
    }
    breakdown
}

#[derive(Debug, Default, FromQueryResult)]
struct AggregateRow {
    avg_runtime: Option<f64>,
    avg_score: Option<f64>,
    min_year: Option<i32>,
    max_year: Option<i32>,
}

#[derive(Debug, FromQueryResult)]
struct RatingCount {
    rating: String,
    count: i64,
}

pub async fn database_stats(db: &DatabaseConnection) -> AppResult<DatabaseStats> {
    let total_movies = movie::Entity::find().count(db).await?;
    let total_actors = actor::Entity::find().count(db).await?;

    let agg = movie::Entity::find()
        .select_only()
        .column_as(Expr::expr(Func::avg(Expr::col(movie::Column::Runtime))), "avg_runtime")
        .column_as(Expr::expr(Func::avg(Expr::col(movie::Column::ImdbScore))), "avg_score")
        .column_as(movie::Column::Year.min(), "min_year")
        .column_as(movie::Column::Year.max(), "max_year")
        .into_model::<AggregateRow>()
        .one(db)
        .await?
        .unwrap_or_default();

    let rating_distribution = movie::Entity::find()
        .select_only()
        .column(movie::Column::Rating)
        .column_as(movie::Column::Id.count(), "count")
        .group_by(movie::Column::Rating)
        .into_model::<RatingCount>()
        .all(db)
        .await?
        .into_iter()
        .map(|row| (row.rating, row.count))
        .collect();

    let year_range = match (agg.min_year, agg.max_year) {
        (Some(min), Some(max)) => Some(YearRange { min, max }),
        _ => None,
    };

    Ok(DatabaseStats {
        total_movies,
        total_actors,
        average_runtime: agg.avg_runtime.map(round2).unwrap_or(0.0),
        average_score: agg.avg_score.map(round2).unwrap_or(0.0),
        year_range,
        rating_distribution,
    })
}

/// Substring match on the director name. SQLite LIKE, so ASCII
/// case-insensitive.
pub async fn movies_by_director(
    db: &DatabaseConnection,
    director: &str,
) -> AppResult<Vec<MovieWithActorCount>> {
    let movies = movies_with_counts()
        .filter(movie::Column::Director.contains(director))
        .order_by_desc(movie::Column::ImdbScore)
        .into_model::<MovieWithActorCount>()
        .all(db)
        .await?;
    Ok(movies)
}

pub async fn movies_by_rating(
    db: &DatabaseConnection,
    rating: &str,
) -> AppResult<Vec<MovieWithActorCount>> {
    let movies = movies_with_counts()
        .filter(movie::Column::Rating.eq(rating))
        .order_by_desc(movie::Column::ImdbScore)
        .into_model::<MovieWithActorCount>()
        .all(db)
        .await?;
    Ok(movies)
}

pub async fn full_report(db: &DatabaseConnection, top_n: u64) -> AppResult<Report> {
    Ok(Report {
        longest_running: longest_running_movie(db).await?,
        most_actors: movie_with_most_actors(db).await?,
        breakdown: top_movies_by_rating_breakdown(db, top_n).await?,
        stats: database_stats(db).await?,
    })
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, rating: &str, score: f64) -> MovieWithActorCount {
        MovieWithActorCount {
            id: 0,
            imdb_id: String::new(),
            title: title.to_string(),
            director: String::new(),
            year: 2000,
            rating: rating.to_string(),
            genres: String::new(),
            runtime: 100,
            country: String::new(),
            language: String::new(),
            imdb_score: score,
            imdb_votes: 0,
            metacritic_score: 0.0,
            actor_count: 0,
        }
    }

    #[test]
    fn groups_top_movies_by_rating() {
        let top = vec![
            movie("A", "PG", 9.0),
            movie("B", "PG", 8.5),
            movie("C", "R", 8.5),
        ];
        let breakdown = group_by_rating(top);

        assert_eq!(breakdown.total_in_top, 3);
        assert_eq!(breakdown.distribution.get("PG"), Some(&2));
        assert_eq!(breakdown.distribution.get("R"), Some(&1));
        let pg: Vec<_> = breakdown.categories["PG"].iter().map(|m| m.title.as_str()).collect();
        assert_eq!(pg, ["A", "B"]);
    }

    #[test]
    fn empty_top_yields_empty_breakdown() {
        let breakdown = group_by_rating(Vec::new());
        assert_eq!(breakdown.total_in_top, 0);
        assert!(breakdown.categories.is_empty());
        assert!(breakdown.distribution.is_empty());
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(8.876), 8.88);
        assert_eq!(round2(120.0), 120.0);
    }
}
