use std::fs;

use anyhow::Context;
use tracing::info;

use cinedex::{
    config::{Config, ReportFormat},
    db, loader, queries, report,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,cinedex=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let movies_path = config.data_dir.join("movies.sql");
    let actors_path = config.data_dir.join("actors.sql");
    let movies_src = fs::read_to_string(&movies_path)
        .with_context(|| format!("movies.sql not found in {}", config.data_dir.display()))?;
    let actors_src = fs::read_to_string(&actors_path)
        .with_context(|| format!("actors.sql not found in {}", config.data_dir.display()))?;

    let db = db::connect(&config.database_url).await?;
    db::reinitialize(&db).await?;

    // Movies first: actor rows reference them by foreign key.
    let movies = loader::load_movies(&db, &movies_src).await?;
    info!(inserted = movies.inserted, skipped = movies.skipped_rows, "movies loaded");
    let actors = loader::load_actors(&db, &actors_src).await?;
    info!(inserted = actors.inserted, skipped = actors.skipped_rows, "actors loaded");

    let report = queries::full_report(&db, config.top_n).await?;
    match config.report_format {
        ReportFormat::Json => println!("{}", report::render_json(&report)?),
        ReportFormat::Text => print!("{}", report::render_text(&report, config.top_n)),
    }

    Ok(())
}
