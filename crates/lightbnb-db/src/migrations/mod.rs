//! Database migrations module
//!
//! This module handles SQLite database schema migrations for lightbnb.
//! Migrations are embedded in the binary and executed in order.

use lightbnb_common::{Error, Result};
use rusqlite::Connection;

/// A single migration with its SQL content
struct Migration {
    version: usize,
    name: &'static str,
    sql: &'static str,
}

/// All available migrations
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial",
    sql: include_str!("001_initial.sql"),
}];

/// Initialize the migrations table if it doesn't exist
fn init_migrations_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;
    Ok(())
}

/// Get the current schema version
fn get_current_version(conn: &Connection) -> rusqlite::Result<usize> {
    conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
        row.get::<_, Option<usize>>(0)
    })
    .map(|version| version.unwrap_or(0))
}

/// Apply a single migration
fn apply_migration(conn: &Connection, migration: &Migration) -> Result<()> {
    conn.execute_batch(migration.sql).map_err(|e| {
        Error::database(format!("Migration {} failed: {e}", migration.version))
    })?;

    conn.execute(
        "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
        rusqlite::params![migration.version, migration.name],
    )
    .map_err(|e| Error::database(format!("Migration {} failed: {e}", migration.version)))?;

    Ok(())
}

/// Run all pending migrations
///
/// Creates the tracking table when missing, then applies every migration
/// newer than the recorded version, each inside its own transaction.
///
/// # Returns
///
/// * `Ok(usize)` - Number of migrations applied
/// * `Err(Error)` - If any migration fails
pub fn run_migrations(conn: &Connection) -> Result<usize> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| Error::database(e.to_string()))?;

    init_migrations_table(conn).map_err(|e| Error::database(e.to_string()))?;

    let current_version = get_current_version(conn).map_err(|e| Error::database(e.to_string()))?;

    let pending_migrations: Vec<_> = MIGRATIONS
        .iter()
        .filter(|m| m.version > current_version)
        .collect();

    if pending_migrations.is_empty() {
        return Ok(0);
    }

    let mut applied_count = 0;
    for migration in pending_migrations {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| Error::database(e.to_string()))?;

        apply_migration(&tx, migration)?;

        tx.commit().map_err(|e| {
            Error::database(format!("Migration {} failed: {e}", migration.version))
        })?;

        applied_count += 1;

        tracing::info!(
            version = migration.version,
            name = migration.name,
            "Applied migration"
        );
    }

    Ok(applied_count)
}

/// Get the current schema version without applying migrations
pub fn current_version(conn: &Connection) -> Result<usize> {
    init_migrations_table(conn).map_err(|e| Error::database(e.to_string()))?;

    get_current_version(conn).map_err(|e| Error::database(e.to_string()))
}

/// Get the latest available migration version
pub fn latest_version() -> usize {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}
