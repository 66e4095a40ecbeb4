//! LightBnB-Common: Shared types and utilities.
//!
//! This crate provides common functionality used across lightbnb:
//!
//! - **Typed IDs**: Integer key wrappers for users, properties, reservations and reviews
//! - **Money**: Dollar to cent conversion for nightly prices
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use lightbnb_common::{money::dollars_to_cents, Error, Result, UserId};
//!
//! let owner = UserId::new(1);
//! assert_eq!(owner.get(), 1);
//!
//! assert_eq!(dollars_to_cents(150.0), 15_000);
//!
//! fn example() -> Result<()> {
//!     Err(Error::conflict("email taken"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub use error::{Error, Result};
pub use ids::*;
