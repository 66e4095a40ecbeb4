//! LightBnB-DB: Database schema, migrations, and query operations
//!
//! This crate provides database functionality for lightbnb using SQLite
//! with rusqlite and r2d2 connection pooling.
//!
//! # Modules
//!
//! - `migrations` - Database schema migrations
//! - `pool` - Connection pool management
//! - `models` - Rust models matching database schema
//! - `queries` - Database query operations
//! - `search` - Property search query builder
//! - `seed` - JSON fixture loading
//!
//! # Example
//!
//! ```no_run
//! use lightbnb_db::pool::{get_conn, init_pool, PoolSettings};
//! use lightbnb_db::queries::properties;
//! use lightbnb_db::search::PropertySearch;
//!
//! let pool = init_pool("/var/lib/lightbnb/lightbnb.db", &PoolSettings::default()).unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let search = PropertySearch {
//!     city: Some("Vancouver".to_string()),
//!     ..PropertySearch::default()
//! };
//! for listing in properties::get_all_properties(&conn, &search, 5).unwrap() {
//!     println!("{} ({:.1})", listing.property.title, listing.average_rating);
//! }
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
pub mod search;
pub mod seed;
