//! Database configuration module for the budget tracker.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL. Creation is idempotent and safe to run on
//! every startup.

use crate::entities::{Contribution, Contributor, Expense};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info};

/// Default database location used when neither config.toml nor `DATABASE_URL` set one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/budget_tracker.sqlite?mode=rwc";

/// Returns the directory an `SQLite` file URL points into, if it has one.
///
/// In-memory URLs and non-`SQLite` URLs yield `None`.
#[must_use]
pub fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

/// Establishes a connection to the database at `database_url`.
///
/// For file-backed `SQLite` the parent directory is created first.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(dir) = sqlite_parent_dir(database_url) {
        std::fs::create_dir_all(dir)?;
    }

    debug!("Connecting to database at {}", database_url);
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the contributors, contributions and expenses tables if they are missing.
///
/// Contributors are created first so the foreign key from contributions has a
/// target table.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut contributor_table = schema.create_table_from_entity(Contributor);
    let mut contribution_table = schema.create_table_from_entity(Contribution);
    let mut expense_table = schema.create_table_from_entity(Expense);

    contributor_table.if_not_exists();
    contribution_table.if_not_exists();
    expense_table.if_not_exists();

    db.execute(builder.build(&contributor_table)).await?;
    db.execute(builder.build(&contribution_table)).await?;
    db.execute(builder.build(&expense_table)).await?;

    info!("Database tables are in place");
    Ok(())
}
