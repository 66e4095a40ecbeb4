use lightbnb_db::pool::PoolSettings;
use lightbnb_db::search::DEFAULT_LIMIT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite database file. A leading `~` expands to the home directory.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum number of pooled connections
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,

    /// SQLite busy timeout in milliseconds
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// How long to wait for a free pooled connection, in milliseconds
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,
}

fn default_db_path() -> String {
    "./lightbnb.db".to_string()
}

fn default_pool_max_size() -> u32 {
    PoolSettings::default().max_size
}

fn default_busy_timeout_ms() -> u64 {
    PoolSettings::default().busy_timeout_ms
}

fn default_connection_timeout_ms() -> u64 {
    PoolSettings::default().connection_timeout_ms
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            pool_max_size: default_pool_max_size(),
            busy_timeout_ms: default_busy_timeout_ms(),
            connection_timeout_ms: default_connection_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// Database path with `~` expanded.
    pub fn resolved_path(&self) -> String {
        shellexpand::tilde(&self.path).into_owned()
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_size: self.pool_max_size,
            busy_timeout_ms: self.busy_timeout_ms,
            connection_timeout_ms: self.connection_timeout_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Row cap for property and reservation listings when none is given
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}
