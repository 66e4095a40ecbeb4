//! Database connection pool management.
//!
//! This module provides connection pooling for SQLite using r2d2.
//! It handles pool initialization, connection customization, and running migrations.

use std::time::Duration;

use lightbnb_common::{Error, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::migrations;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Runtime tunables for the connection pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum number of pooled SQLite connections.
    pub max_size: u32,

    /// Busy timeout for SQLite connections, in milliseconds.
    pub busy_timeout_ms: u64,

    /// How long a caller waits for a free connection, in milliseconds.
    pub connection_timeout_ms: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_size: 4,
            busy_timeout_ms: 5_000,
            connection_timeout_ms: 30_000,
        }
    }
}

fn manager_for(target: String, settings: &PoolSettings) -> SqliteConnectionManager {
    let busy_timeout_ms = settings.busy_timeout_ms;
    SqliteConnectionManager::file(target).with_init(move |conn| {
        conn.execute_batch(&format!(
            "PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = {busy_timeout_ms};"
        ))
    })
}

fn build_pool(manager: SqliteConnectionManager, settings: &PoolSettings) -> Result<DbPool> {
    let pool = Pool::builder()
        .max_size(settings.max_size)
        .connection_timeout(Duration::from_millis(settings.connection_timeout_ms))
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create connection pool: {e}")))?;

    let conn = pool
        .get()
        .map_err(|e| Error::database(format!("Failed to get connection for migrations: {e}")))?;

    migrations::run_migrations(&conn)?;

    Ok(pool)
}

/// Initialize a new database pool with the given file path.
///
/// This function will:
/// - Create the SQLite database file if it doesn't exist
/// - Enable foreign key constraints and the busy timeout on all connections
/// - Run pending database migrations
///
/// # Example
///
/// ```no_run
/// use lightbnb_db::pool::{init_pool, PoolSettings};
///
/// let pool = init_pool("/var/lib/lightbnb/lightbnb.db", &PoolSettings::default()).unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_pool(db_path: &str, settings: &PoolSettings) -> Result<DbPool> {
    build_pool(manager_for(db_path.to_string(), settings), settings)
}

/// Initialize an in-memory database pool for testing.
///
/// Each call creates a uniquely-named shared-cache in-memory database so
/// that parallel tests do not interfere with each other, while all
/// connections within a single pool still share state.
///
/// # Example
///
/// ```
/// use lightbnb_db::pool::init_memory_pool;
///
/// let pool = init_memory_pool().unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_memory_pool() -> Result<DbPool> {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let uri = format!("file:lightbnb_mem_{}_{n}?mode=memory&cache=shared", std::process::id());

    build_pool(manager_for(uri, &PoolSettings::default()), &PoolSettings::default())
}

/// Get a connection from the pool.
///
/// Convenience wrapper around `pool.get()` that converts the r2d2 error
/// into the common Error type.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {e}")))
}
