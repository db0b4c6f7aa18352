use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::error::AppResult;

pub async fn connect(database_url: &str) -> AppResult<DatabaseConnection> {
    // PRAGMAs are per-connection; a single writer also matches how the tool
    // is used, so the pool is capped at one connection.
    let mut options = ConnectOptions::new(database_url.to_string());
    options.max_connections(1);

    let db = Database::connect(options).await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA journal_mode=WAL".to_string(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys=ON".to_string(),
    ))
    .await?;

    Ok(db)
}

/// Drops and recreates both tables. Destructive by design.
pub async fn reinitialize(db: &DatabaseConnection) -> AppResult<()> {
    Migrator::fresh(db).await?;
    tracing::debug!("database reinitialized");
    Ok(())
}
