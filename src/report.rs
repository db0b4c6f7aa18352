use crate::{
    error::AppResult,
    models::{MovieWithActorCount, Report},
};

const RULE: &str = "--------------------------------------------------------------------------------";

pub fn render_json(report: &Report) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_text(report: &Report, top_n: u64) -> String {
    let mut out = String::new();

    out.push_str("1. LONGEST-RUNNING MOVIE\n");
    out.push_str(RULE);
    out.push('\n');
    match &report.longest_running {
        Some(movie) => {
            push_movie_lines(&mut out, movie);
            out.push_str(&format!("   Runtime: {} minutes\n", movie.runtime));
        },
        None => out.push_str("   (no movies loaded)\n"),
    }

    out.push_str("\n2. MOVIE WITH THE MOST ACTORS\n");
    out.push_str(RULE);
    out.push('\n');
    match &report.most_actors {
        Some(most) => {
            push_movie_lines(&mut out, &most.movie);
            out.push_str("   Cast:\n");
            for (i, actor) in most.actors.iter().enumerate() {
                out.push_str(&format!("   {}. {}\n", i + 1, actor.name));
            }
        },
        None => out.push_str("   (no movies loaded)\n"),
    }

    out.push_str(&format!("\n3. TOP {top_n} MOVIES BY RATING\n"));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("   Movies in top: {}\n", report.breakdown.total_in_top));
    out.push_str("   Rating distribution:\n");
    for (rating, count) in &report.breakdown.distribution {
        out.push_str(&format!("   - {rating}: {count} movie(s)\n"));
    }
    for (rating, movies) in &report.breakdown.categories {
        out.push_str(&format!("\n   {rating}:\n"));
        for movie in movies {
            out.push_str(&format!(
                "      - {} ({}) - score: {}, actors: {}\n",
                movie.title, movie.year, movie.imdb_score, movie.actor_count
            ));
        }
    }

    out.push_str("\n4. DATABASE STATISTICS\n");
    out.push_str(RULE);
    out.push('\n');
    let stats = &report.stats;
    out.push_str(&format!("   Total movies: {}\n", stats.total_movies));
    out.push_str(&format!("   Total actors: {}\n", stats.total_actors));
    out.push_str(&format!("   Average runtime: {} minutes\n", stats.average_runtime));
    out.push_str(&format!("   Average score: {}\n", stats.average_score));
    match stats.year_range {
        Some(range) => out.push_str(&format!("   Year range: {} - {}\n", range.min, range.max)),
        None => out.push_str("   Year range: n/a\n"),
    }
    out.push_str("   Rating distribution:\n");
    for (rating, count) in &stats.rating_distribution {
        out.push_str(&format!("   - {rating}: {count} movie(s)\n"));
    }

    out
}

fn push_movie_lines(out: &mut String, movie: &MovieWithActorCount) {
    out.push_str(&format!("   Title: {}\n", movie.title));
    out.push_str(&format!("   Year: {}\n", movie.year));
    out.push_str(&format!("   Director: {}\n", movie.director));
    out.push_str(&format!("   Score: {}\n", movie.imdb_score));
    out.push_str(&format!("   Actors: {}\n", movie.actor_count));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DatabaseStats, RatingBreakdown};

    fn empty_report() -> Report {
        Report {
            longest_running: None,
            most_actors: None,
            breakdown: RatingBreakdown::default(),
            stats: DatabaseStats::default(),
        }
    }

    #[test]
    fn renders_all_sections_for_empty_report() {
        let text = render_text(&empty_report(), 10);
        assert!(text.contains("LONGEST-RUNNING MOVIE"));
        assert!(text.contains("MOVIE WITH THE MOST ACTORS"));
        assert!(text.contains("TOP 10 MOVIES BY RATING"));
        assert!(text.contains("DATABASE STATISTICS"));
        assert!(text.contains("(no movies loaded)"));
        assert!(text.contains("Year range: n/a"));
    }

    #[test]
    fn json_report_is_valid() {
        let json = render_json(&empty_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stats"]["total_movies"], 0);
        assert!(value["longest_running"].is_null());
    }
}
