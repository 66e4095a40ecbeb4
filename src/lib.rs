//! LightBnB: async data access over the LightBnB SQLite store.
//!
//! The [`store::Store`] facade wraps the `lightbnb-db` query functions;
//! [`config`] loads the TOML settings used to open it.

pub mod config;
pub mod store;

pub use store::Store;
